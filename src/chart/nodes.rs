use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::breach::Record;
use crate::config::Canvas;

pub const MIN_RADIUS: f32 = 4.0;
pub const MAX_RADIUS: f32 = 30.0;

#[derive(Clone, Debug)]
pub struct VisualNode {
    pub id: String,
    pub name: String,
    pub radius: f32,
    pub value: f64,
    pub category: String,
    pub source: String,
    pub year: i32,
    pub continent: String,
    pub pos: Vec2,
    pub velocity: Vec2,
}

/// Square-root scale from `[0, max_amount]` onto `[MIN_RADIUS, MAX_RADIUS]`.
#[derive(Clone, Copy, Debug)]
pub struct RadiusScale {
    max_amount: f64,
}

impl RadiusScale {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let max_amount = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max);
        Self { max_amount }
    }

    pub fn radius(self, value: f64) -> f32 {
        if self.max_amount <= 0.0 || !value.is_finite() {
            return MIN_RADIUS;
        }

        let normalized = (value.max(0.0) / self.max_amount).clamp(0.0, 1.0);
        MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * normalized.sqrt() as f32
    }
}

pub fn build_nodes<R: Rng>(records: &[Record], canvas: Canvas, rng: &mut R) -> Vec<VisualNode> {
    let scale = RadiusScale::from_values(records.iter().map(|record| record.records));

    let mut nodes = records
        .iter()
        .map(|record| VisualNode {
            id: record.id.clone(),
            name: record.organization.clone(),
            radius: scale.radius(record.records),
            value: record.records,
            category: record.group.clone(),
            source: record.source.clone(),
            year: record.year,
            continent: record.continent.clone(),
            pos: vec2(
                spawn_coordinate(rng, canvas.spawn_width),
                spawn_coordinate(rng, canvas.spawn_height),
            ),
            velocity: Vec2::ZERO,
        })
        .collect::<Vec<_>>();

    // Stable sort: equal values keep their input order.
    nodes.sort_by(|a, b| b.value.total_cmp(&a.value));
    nodes
}

fn spawn_coordinate<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn record(id: &str, records: f64) -> Record {
        Record {
            id: id.to_owned(),
            records,
            ..Record::default()
        }
    }

    fn build(records: &[Record]) -> Vec<VisualNode> {
        build_nodes(records, Canvas::default(), &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn one_node_per_record_with_ids_preserved() {
        let records = (0..25)
            .map(|index| record(&format!("r{index}"), (index * 37 % 11) as f64))
            .collect::<Vec<_>>();
        let nodes = build(&records);

        assert_eq!(nodes.len(), records.len());
        let mut ids = nodes.iter().map(|node| node.id.clone()).collect::<Vec<_>>();
        let mut expected = records.iter().map(|record| record.id.clone()).collect::<Vec<_>>();
        ids.sort();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn radius_is_monotonic_and_spans_the_range() {
        let scale = RadiusScale::from_values([0.0, 50.0, 400.0]);

        assert_eq!(scale.radius(0.0), MIN_RADIUS);
        assert_eq!(scale.radius(400.0), MAX_RADIUS);
        assert_eq!(scale.radius(100.0), 17.0);

        let mut previous = scale.radius(0.0);
        for step in 1..=400 {
            let radius = scale.radius(step as f64);
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn all_zero_values_use_the_minimum_radius() {
        let nodes = build(&[record("a", 0.0), record("b", 0.0)]);
        assert!(nodes.iter().all(|node| node.radius == MIN_RADIUS));

        let scale = RadiusScale::from_values([0.0]);
        assert_eq!(scale.radius(10.0), MIN_RADIUS);
    }

    #[test]
    fn negative_values_clamp_to_the_minimum_radius() {
        let scale = RadiusScale::from_values([-20.0, 80.0]);
        assert_eq!(scale.radius(-20.0), MIN_RADIUS);
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let nodes = build(&[
            record("a", 5.0),
            record("b", 9.0),
            record("c", 5.0),
            record("d", 1.0),
            record("e", 9.0),
        ]);
        let order = nodes.iter().map(|node| node.id.as_str()).collect::<Vec<_>>();
        assert_eq!(order, ["b", "e", "a", "c", "d"]);
    }

    #[test]
    fn larger_breach_sorts_first_with_larger_radius() {
        let mut small = record("1", 100.0);
        small.year = 2020;
        small.source = "Hacking".to_owned();
        small.group = "Email".to_owned();
        let mut large = record("2", 400.0);
        large.year = 2021;
        large.source = "Theft/Loss".to_owned();
        large.group = "Paper/Films".to_owned();

        let nodes = build(&[small, large]);
        assert_eq!(nodes[0].id, "2");
        assert!(nodes[0].radius > nodes[1].radius);
        assert_eq!(nodes[0].category, "Paper/Films");
        assert_eq!(nodes[1].source, "Hacking");
    }

    #[test]
    fn spawn_positions_stay_inside_the_spawn_area() {
        let canvas = Canvas::default();
        let records = (0..200).map(|index| record(&index.to_string(), 1.0)).collect::<Vec<_>>();
        let nodes = build(&records);

        for node in &nodes {
            assert!((0.0..canvas.spawn_width).contains(&node.pos.x));
            assert!((0.0..canvas.spawn_height).contains(&node.pos.y));
            assert_eq!(node.velocity, Vec2::ZERO);
        }
    }
}
