use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui, Vec2, vec2};

use crate::util::ease_cubic_in_out;

use super::ViewModel;
use super::render_utils::{circle_visible, darker, draw_background, world_to_screen};

const GROW_SECONDS: f64 = 2.0;
const STROKE_WIDTH: f32 = 2.0;

impl ViewModel {
    pub(super) fn world_origin(&self) -> Vec2 {
        let canvas = self.chart.canvas();
        vec2(canvas.center_x(), canvas.center_y())
    }

    fn grow_progress(&mut self, now: f64) -> f32 {
        let shown_at = *self.shown_at.get_or_insert(now);
        ease_cubic_in_out(((now - shown_at) / GROW_SECONDS) as f32)
    }

    pub(super) fn draw_chart(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        self.handle_chart_zoom(ui, rect, &response);
        self.handle_chart_pan(&response);

        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        self.chart.advance(frame_delta_seconds);

        let now = ui.ctx().input(|input| input.time);
        let grow = self.grow_progress(now);
        if self.chart.is_running() || grow < 1.0 || response.dragged() {
            ui.ctx().request_repaint();
        }

        let scale = self.view_scale(rect);
        let origin = self.world_origin();

        for title in self.chart.titles() {
            let position = world_to_screen(rect, self.pan, scale, origin, vec2(title.x, title.y));
            painter.text(
                position,
                Align2::CENTER_BOTTOM,
                &title.text,
                FontId::proportional(16.0),
                Color32::from_gray(40),
            );
        }

        self.hovered = self.hovered_node(ui, rect, grow);
        if self.hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        for (index, node) in self.chart.nodes().iter().enumerate() {
            let position = world_to_screen(rect, self.pan, scale, origin, node.pos);
            let radius = node.radius * scale * grow;
            if radius <= 0.0 || !circle_visible(rect, position, radius) {
                continue;
            }

            let fill = self
                .fill_colors
                .get(index)
                .copied()
                .unwrap_or(Color32::GRAY);
            let border = if self.hovered == Some(index) {
                Color32::BLACK
            } else {
                darker(fill)
            };

            painter.circle_filled(position, radius, fill);
            painter.circle_stroke(position, radius, Stroke::new(STROKE_WIDTH, border));
        }

        if let Some(tooltip) = self.hovered.and_then(|index| self.chart.tooltip(index)) {
            response.on_hover_ui_at_pointer(|ui| {
                egui::Grid::new("breach_tooltip")
                    .num_columns(2)
                    .show(ui, |ui| {
                        for (label, value) in tooltip.rows() {
                            ui.label(RichText::new(format!("{label}:")).strong());
                            ui.label(value);
                            ui.end_row();
                        }
                    });
            });
        }
    }
}
