use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::breach::load_records;
use crate::chart::{BubbleChart, Mode, TitleLabel, VisualNode};
use crate::config::ChartConfig;

#[derive(Serialize)]
struct LayoutSnapshot<'a> {
    mode: Mode,
    ticks: usize,
    settled: bool,
    titles: &'a [TitleLabel],
    nodes: Vec<NodeSnapshot<'a>>,
}

#[derive(Serialize)]
struct NodeSnapshot<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    source: &'a str,
    year: i32,
    continent: &'a str,
    value: f64,
    radius: f32,
    x: f32,
    y: f32,
}

impl<'a> From<&'a VisualNode> for NodeSnapshot<'a> {
    fn from(node: &'a VisualNode) -> Self {
        Self {
            id: &node.id,
            name: &node.name,
            category: &node.category,
            source: &node.source,
            year: node.year,
            continent: &node.continent,
            value: node.value,
            radius: node.radius,
            x: node.pos.x,
            y: node.pos.y,
        }
    }
}

/// Lays the chart out without a window and writes the settled positions as JSON.
pub fn run(data_path: &Path, config: &ChartConfig, mode: Mode, max_ticks: usize) -> Result<()> {
    let records = load_records(data_path).inspect_err(|error| {
        log::error!("failed to load breach records: {error:#}");
    })?;
    log::info!("loaded {} breach records from {}", records.len(), data_path.display());

    let mut chart = BubbleChart::new(&records, config);
    chart.set_observer(Box::new(|nodes: &[VisualNode]| {
        let energy = nodes
            .iter()
            .map(|node| node.velocity.length_sq())
            .sum::<f32>();
        log::trace!("tick: kinetic energy {energy:.4}");
    }));
    chart.set_mode(mode);

    let ticks = chart.settle(max_ticks);
    let settled = !chart.is_running();
    if settled {
        log::info!("layout settled after {ticks} ticks");
    } else {
        log::warn!("layout still moving after {ticks} ticks");
    }

    let snapshot = LayoutSnapshot {
        mode: chart.mode(),
        ticks,
        settled,
        titles: chart.titles(),
        nodes: chart.nodes().iter().map(NodeSnapshot::from).collect(),
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &snapshot)
        .context("failed to write layout snapshot")?;
    writeln!(stdout).context("failed to write layout snapshot")?;
    Ok(())
}
