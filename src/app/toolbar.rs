use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::breach::Record;
use crate::chart::{BubbleChart, Mode};
use crate::config::ChartConfig;

use super::ViewModel;
use super::render_utils::CategoryPalette;

impl ViewModel {
    pub(super) fn new(records: &[Record], config: &ChartConfig, initial_mode: Mode) -> Self {
        let mut chart = BubbleChart::new(records, config);
        if initial_mode != chart.mode() {
            chart.set_mode(initial_mode);
        }

        let mut palette = CategoryPalette::new();
        let fill_colors = chart
            .nodes()
            .iter()
            .map(|node| palette.color_for(&node.category))
            .collect();

        Self {
            chart,
            fill_colors,
            record_count: records.len(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            hovered: None,
            shown_at: None,
        }
    }

    pub(super) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("toolbar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Data breaches");
                    ui.separator();
                    for mode in Mode::ALL {
                        let active = self.chart.mode() == mode;
                        let button = egui::Button::new(mode.label()).selected(active);
                        if ui.add(button).clicked() {
                            self.chart.apply_command(mode.command());
                        }
                    }
                    ui.separator();
                    let stop_button =
                        ui.add_enabled(self.chart.is_running(), egui::Button::new("Stop"));
                    if stop_button.clicked() {
                        self.chart.stop();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| self.draw_chart(ui));
    }

    fn status_text(&self) -> String {
        let engine = self.chart.engine();
        if engine.is_running() {
            format!(
                "{} breaches  |  settling (alpha {:.3})",
                self.record_count,
                engine.alpha()
            )
        } else {
            format!(
                "{} breaches  |  settled after {} ticks",
                self.record_count,
                engine.ticks()
            )
        }
    }
}
