use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use super::record::Record;

pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file =
        File::open(path).with_context(|| format!("failed to open data file {}", path.display()))?;
    let reader = BufReader::new(file);

    let is_json = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    let records = if is_json {
        parse_json(reader)
    } else {
        parse_csv(reader)
    }
    .with_context(|| format!("failed to read breach records from {}", path.display()))?;

    if records.is_empty() {
        return Err(anyhow!("{} contains no breach records", path.display()));
    }

    Ok(records)
}

pub(super) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .byte_headers()
        .context("missing CSV header row")?
        .clone();
    let columns = headers
        .iter()
        .enumerate()
        .map(|(column, name)| {
            let name = String::from_utf8_lossy(name).trim().to_ascii_lowercase();
            (name, column)
        })
        .collect::<HashMap<_, _>>();

    // Byte records so a stray non-UTF-8 field degrades to U+FFFD instead of
    // failing the whole file.
    let mut records = Vec::new();
    for (index, row) in reader.byte_records().enumerate() {
        let row = row.with_context(|| format!("invalid CSV row {}", index + 1))?;
        records.push(Record::from_fields(index, |name| {
            columns
                .get(name)
                .and_then(|&column| row.get(column))
                .map(|field| String::from_utf8_lossy(field).into_owned())
        }));
    }

    Ok(records)
}

pub(super) fn parse_json<R: Read>(reader: R) -> Result<Vec<Record>> {
    let rows: Vec<Map<String, Value>> =
        serde_json::from_reader(reader).context("expected a JSON array of objects")?;

    Ok(rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            Record::from_fields(index, |name| {
                row.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value_text(value))
            })
        })
        .collect())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
id,records,organization,source,group,year,continent
1,100,Clinic A,Hacking,Email,2020,Europe
2,400,Hospital B,Theft/Loss,Paper/Films,2021,Asia
3,,Insurer C,Hacking,Other,2016
";

    #[test]
    fn reads_csv_rows_in_order() {
        let records = parse_csv(SAMPLE_CSV.as_bytes()).expect("csv parses");

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].organization, "Hospital B");
        assert_eq!(records[1].source, "Theft/Loss");
        assert_eq!(records[1].year, 2021);
        assert_eq!(records[2].records, 0.0);
        assert!(records[2].continent.is_empty());
    }

    #[test]
    fn csv_header_names_are_case_insensitive() {
        let csv = "ID,Records,Organization,Source,Group,Year,Continent\n\
                   9,5,Org,Hacking,Email,2018,Africa\n";
        let records = parse_csv(csv.as_bytes()).expect("csv parses");

        assert_eq!(records[0].id, "9");
        assert_eq!(records[0].records, 5.0);
        assert_eq!(records[0].year, 2018);
    }

    #[test]
    fn latin1_bytes_in_a_field_do_not_drop_rows() {
        let mut csv = b"id,records,organization,source,group,year\n\
                        1,10,Clinic A,Hacking,Email,2019\n\
                        2,20,Caf"
            .to_vec();
        csv.push(0xE9);
        csv.extend_from_slice(b" Medical,Hacking,Email,2020\n");

        let records = parse_csv(csv.as_slice()).expect("csv parses");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].organization, "Clinic A");
        assert_eq!(records[1].organization, "Caf\u{FFFD} Medical");
        assert_eq!(records[1].records, 20.0);
        assert_eq!(records[1].year, 2020);
    }

    #[test]
    fn reads_json_numbers_and_strings() {
        let json = r#"[
            {"id": 1, "records": 100, "organization": "Clinic A", "source": "Hacking", "group": "Email", "year": 2020},
            {"id": "2", "records": "400", "organization": "Hospital B", "source": "Theft/Loss", "group": "Paper/Films", "year": "2021", "continent": null}
        ]"#;
        let records = parse_json(json.as_bytes()).expect("json parses");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].records, 100.0);
        assert_eq!(records[1].records, 400.0);
        assert_eq!(records[1].year, 2021);
        assert!(records[1].continent.is_empty());
    }

    #[test]
    fn rejects_json_that_is_not_a_table() {
        assert!(parse_json(r#"{"id": 1}"#.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let error = load_records(Path::new("/nonexistent/breaches.csv")).unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/breaches.csv"));
    }
}
