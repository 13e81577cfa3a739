mod app;
mod breach;
mod chart;
mod config;
mod headless;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use chart::Mode;
use config::ChartConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Breach table: CSV with a header row, or a JSON array of objects.
    #[arg(default_value = "bubblechart.csv")]
    data: PathBuf,
    /// JSON file with `canvas`, `layout` and `seed` sections.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Initial view: `all`, `year` or `source`.
    #[arg(long, default_value = "all")]
    mode: String,
    /// Print settled positions as JSON instead of opening a window.
    #[arg(long)]
    headless: bool,
    #[arg(long, default_value_t = 2000)]
    max_ticks: usize,
}

impl Args {
    fn chart_config(&self) -> Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::load(path)?,
            None => ChartConfig::default(),
        };

        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.chart_config()?;
    let mode = Mode::from_command(&args.mode);

    if args.headless {
        return headless::run(&args.data, &config, mode, args.max_ticks);
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "breach-bubbles",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::BubbleChartApp::new(
                cc,
                args.data.clone(),
                config.clone(),
                mode,
            )))
        }),
    )
    .map_err(|error| anyhow!("failed to open the chart window: {error}"))
}
