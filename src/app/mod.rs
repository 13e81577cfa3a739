use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Color32, Context, Vec2};

use crate::breach::{Record, load_records};
use crate::chart::{BubbleChart, Mode};
use crate::config::ChartConfig;

mod interaction;
mod render_utils;
mod toolbar;
mod view;

pub struct BubbleChartApp {
    config: ChartConfig,
    initial_mode: Mode,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<Record>, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    chart: BubbleChart,
    fill_colors: Vec<Color32>,
    record_count: usize,
    pan: Vec2,
    zoom: f32,
    hovered: Option<usize>,
    shown_at: Option<f64>,
}

impl BubbleChartApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_path: PathBuf,
        config: ChartConfig,
        initial_mode: Mode,
    ) -> Self {
        Self {
            config,
            initial_mode,
            state: AppState::Loading {
                rx: Self::spawn_load(data_path),
            },
        }
    }

    fn spawn_load(data_path: PathBuf) -> Receiver<Result<Vec<Record>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_records(&data_path).map_err(|error| format!("{error:#}"));
            if let Ok(records) = &result {
                log::info!(
                    "loaded {} breach records from {}",
                    records.len(),
                    data_path.display()
                );
            }
            let _ = tx.send(result);
        });

        rx
    }
}

impl eframe::App for BubbleChartApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(records)) => {
                        let model = ViewModel::new(&records, &self.config, self.initial_mode);
                        transition = Some(AppState::Ready(Box::new(model)));
                    }
                    Ok(Err(error)) => {
                        log::error!("failed to load breach records: {error}");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        log::error!("breach loader exited without a result");
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading breach records...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load breach records");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
