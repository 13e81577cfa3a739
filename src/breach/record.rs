/// One row of the breach table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    pub id: String,
    pub records: f64,
    pub organization: String,
    pub source: String,
    pub group: String,
    pub year: i32,
    pub continent: String,
}

impl Record {
    /// Builds a record from named fields. Missing or malformed fields fall back to
    /// zero or the empty string; an empty id becomes `row-<index>`.
    pub(super) fn from_fields<F>(index: usize, field: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str| {
            field(name)
                .map(|value| value.trim().to_owned())
                .unwrap_or_default()
        };

        let mut id = text("id");
        if id.is_empty() {
            id = format!("row-{index}");
        }

        Self {
            id,
            records: parse_magnitude(&text("records")),
            organization: text("organization"),
            source: text("source"),
            group: text("group"),
            year: parse_year(&text("year")),
            continent: text("continent"),
        }
    }
}

pub(super) fn parse_magnitude(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

pub(super) fn parse_year(raw: &str) -> i32 {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return year;
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() < i32::MAX as f64 => value.trunc() as i32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn record_from(pairs: &[(&str, &str)]) -> Record {
        let fields = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect::<HashMap<_, _>>();
        Record::from_fields(7, |name| fields.get(name).cloned())
    }

    #[test]
    fn parses_a_complete_row() {
        let record = record_from(&[
            ("id", "12"),
            ("records", "4500"),
            ("organization", "Acme Health"),
            ("source", "Hacking"),
            ("group", "Email"),
            ("year", "2019"),
            ("continent", "North America"),
        ]);

        assert_eq!(record.id, "12");
        assert_eq!(record.records, 4500.0);
        assert_eq!(record.organization, "Acme Health");
        assert_eq!(record.source, "Hacking");
        assert_eq!(record.group, "Email");
        assert_eq!(record.year, 2019);
        assert_eq!(record.continent, "North America");
    }

    #[test]
    fn malformed_numbers_become_zero() {
        let record = record_from(&[("id", "1"), ("records", "lots"), ("year", "n/a")]);
        assert_eq!(record.records, 0.0);
        assert_eq!(record.year, 0);

        assert_eq!(parse_magnitude("NaN"), 0.0);
        assert_eq!(parse_magnitude("inf"), 0.0);
        assert_eq!(parse_magnitude(" 12.5 "), 12.5);
        assert_eq!(parse_year("2017.0"), 2017);
    }

    #[test]
    fn missing_fields_default_to_neutral_values() {
        let record = record_from(&[]);
        assert_eq!(record.id, "row-7");
        assert_eq!(record.records, 0.0);
        assert!(record.organization.is_empty());
        assert!(record.source.is_empty());
        assert_eq!(record.year, 0);
    }
}
