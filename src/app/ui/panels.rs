use eframe::egui::{self, Align, Context, Layout};

use super::super::BubbleChartApp;

impl BubbleChartApp {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("country-bubbles");
                    ui.separator();
                    ui.label(format!("data: {}", self.data_path.display()));
                    ui.label(format!("display: {}", self.display.label()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(layout_text) = self.layout_text() {
                            ui.label(layout_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_chart(ui));
    }
}
