use eframe::egui::{self, Rect, Ui};

use super::ViewModel;
use super::render_utils::{fit_scale, screen_to_world};

impl ViewModel {
    pub(super) fn view_scale(&self, rect: Rect) -> f32 {
        fit_scale(rect, self.chart.canvas()) * self.zoom
    }

    pub(super) fn handle_chart_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let origin = self.world_origin();
        let world_before = screen_to_world(rect, self.pan, self.view_scale(rect), origin, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.25, 6.0);
        self.pan = pointer - rect.center() - (world_before - origin) * self.view_scale(rect);
    }

    pub(super) fn handle_chart_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }

        if response.double_clicked() {
            self.pan = egui::Vec2::ZERO;
            self.zoom = 1.0;
        }
    }

    /// Node under the pointer, if any. `grow` is the current grow-in factor.
    pub(super) fn hovered_node(&self, ui: &Ui, rect: Rect, grow: f32) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        let world = screen_to_world(
            rect,
            self.pan,
            self.view_scale(rect),
            self.world_origin(),
            pointer,
        );
        self.chart.node_at(world, grow)
    }
}
