use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::render_utils::{
    blend_color, circle_visible, dim_color, draw_background, world_to_screen,
};
use super::super::{BubbleChartApp, ChartStatus};

const SEARCH_HIGHLIGHT: Color32 = Color32::from_rgb(103, 196, 255);

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl BubbleChartApp {
    fn fit_scale(&self, rect: Rect) -> f32 {
        let size = self.surface.size();
        (rect.width() / size.x).min(rect.height() / size.y).max(0.05)
    }

    fn search_matches(&self) -> Option<Vec<bool>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.surface
                .bubbles()
                .iter()
                .map(|bubble| fuzzy_match_score(&matcher, &bubble.name, query).is_some())
                .collect(),
        )
    }

    fn empty_chart_text(&self) -> String {
        match &self.status {
            ChartStatus::Loading => "Loading country data...".to_owned(),
            ChartStatus::Ready { .. } => "No records to display.".to_owned(),
            ChartStatus::Error(error) => format!("Chart unavailable: {error}"),
        }
    }

    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let fit = self.fit_scale(rect);
        self.handle_chart_zoom(ui, rect, fit, &response);
        self.handle_chart_pan(&response);

        let zoom = self.zoom * fit;
        let half_size = self.surface.size() * 0.5;
        let surface_frame = Rect::from_min_max(
            world_to_screen(rect, self.pan, zoom, -half_size),
            world_to_screen(rect, self.pan, zoom, half_size),
        );
        draw_background(&painter, rect, surface_frame, zoom);

        if self.surface.bubbles().is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.empty_chart_text(),
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        }

        let circles = self
            .surface
            .bubbles()
            .iter()
            .map(|bubble| {
                (
                    world_to_screen(rect, self.pan, zoom, bubble.position - half_size),
                    bubble.radius * zoom,
                )
            })
            .collect::<Vec<(Pos2, f32)>>();
        let hovered = Self::hovered_index(ui, &circles);
        let matches = self.search_matches();

        for (index, bubble) in self.surface.bubbles().iter().enumerate() {
            let (center, radius) = circles[index];
            if !circle_visible(rect, center, radius) {
                continue;
            }

            let is_match = matches.as_ref().map(|matches| matches[index]);
            let fill = if hovered == Some(index) {
                blend_color(bubble.color, Color32::WHITE, 0.35)
            } else if is_match == Some(false) {
                dim_color(bubble.color, 0.35)
            } else {
                bubble.color
            };
            let stroke = if is_match == Some(true) {
                Stroke::new(1.8, SEARCH_HIGHLIGHT)
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };

            painter.circle_filled(center, radius, fill);
            painter.circle_stroke(center, radius, stroke);
        }

        if let Some(index) = hovered {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
            let tooltip = self.surface.bubbles()[index].tooltip.clone();
            response.on_hover_text_at_pointer(tooltip);
        }
    }
}
