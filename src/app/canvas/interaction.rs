use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::BubbleChartApp;
use super::super::render_utils::screen_to_world;

const PAN_BUTTONS: [egui::PointerButton; 2] =
    [egui::PointerButton::Secondary, egui::PointerButton::Middle];

impl BubbleChartApp {
    pub(in crate::app) fn handle_chart_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        fit: f32,
        response: &egui::Response,
    ) {
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
        let world_before = screen_to_world(rect, self.pan, self.zoom * fit, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.25, 8.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom * fit);
    }

    pub(in crate::app) fn handle_chart_pan(&mut self, response: &egui::Response) {
        if PAN_BUTTONS
            .iter()
            .any(|button| response.dragged_by(*button))
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn reset_view(&mut self) {
        self.pan = egui::Vec2::ZERO;
        self.zoom = 1.0;
    }

    pub(in crate::app) fn hovered_index(ui: &Ui, circles: &[(Pos2, f32)]) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        circles
            .iter()
            .enumerate()
            .filter_map(|(index, (center, radius))| {
                let distance = center.distance(pointer);
                (distance <= *radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_drag_does_not_pan() {
        assert!(!PAN_BUTTONS.contains(&egui::PointerButton::Primary));
        assert!(PAN_BUTTONS.contains(&egui::PointerButton::Secondary));
        assert!(PAN_BUTTONS.contains(&egui::PointerButton::Middle));
    }
}
