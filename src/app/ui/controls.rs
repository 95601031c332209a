use eframe::egui::Ui;

use crate::countries::DisplayType;

use super::super::{BubbleChartApp, ChartStatus};

impl BubbleChartApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Display");
        ui.separator();
        ui.add_space(4.0);

        let mut selected = self.display;

        ui.label("Per country");
        for display in DisplayType::ALL
            .into_iter()
            .filter(|display| !display.groups_by_region())
        {
            ui.radio_value(&mut selected, display, display.label())
                .on_hover_text(format!("Bubble radius from {}.", display.value()));
        }

        ui.add_space(6.0);
        ui.label("Per region");
        for display in DisplayType::ALL
            .into_iter()
            .filter(|display| display.groups_by_region())
        {
            ui.radio_value(&mut selected, display, display.label())
                .on_hover_text(format!("Group countries by region, sized by {}.", display.value()));
        }

        if selected != self.display {
            self.request_chart(selected);
        }

        ui.separator();

        ui.label("Search")
            .on_hover_text("Fuzzy-highlight bubbles by country name, code or region.");
        ui.text_edit_singleline(&mut self.search);

        ui.add_space(6.0);
        if ui.button("Reset view").clicked() {
            self.reset_view();
        }

        ui.separator();
        match &self.status {
            ChartStatus::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading country data...");
                });
            }
            ChartStatus::Ready { records } => {
                ui.label(format!("{records} bubbles"));
            }
            ChartStatus::Error(error) => {
                ui.colored_label(ui.visuals().error_fg_color, error.as_str());
            }
        }
        if self.pending.is_some() {
            ui.label("Reloading...");
        }
    }
}
