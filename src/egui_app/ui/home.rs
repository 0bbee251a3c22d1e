use super::EguiApp;
use super::{feedback, style};
use crate::egui_app::state::Page;
use eframe::egui::{self, RichText};

const OVERVIEW: &str = "Predict daily rainfall from climatic measurements, or upload newer \
observations to retrain the model and compare its accuracy before saving it.";

impl EguiApp {
    pub(super) fn render_home_page(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let busy = self.controller.is_busy();
        let home = &self.controller.ui.home;

        ui.heading("Home");
        ui.label(OVERVIEW);
        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("Service: {}", home.service_url)).color(palette.text_muted),
        );
        ui.add_space(8.0);

        if let Some(info) = home.info.as_ref() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(info).monospace());
            });
        }
        feedback::render_busy(ui, self.controller.ui.pending, Page::Home);
        feedback::render_notices(ui, &home.notices);

        ui.add_space(10.0);
        if ui
            .add_enabled(!busy, egui::Button::new("Refresh service info"))
            .clicked()
        {
            self.controller.refresh_home();
        }
    }
}
