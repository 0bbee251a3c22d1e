use super::EguiApp;
use super::{feedback, style};
use crate::egui_app::state::Page;
use crate::rainfall_api::ClimateField;
use eframe::egui::{self, RichText};

impl EguiApp {
    pub(super) fn render_predict_page(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let busy = self.controller.is_busy();

        ui.heading("Make a rainfall predictions");
        ui.label(
            RichText::new("Enter climatic parameters to predict rainfall in mm")
                .color(palette.text_muted),
        );
        ui.add_space(10.0);

        let inputs = &mut self.controller.ui.predict.inputs;
        egui::Grid::new("predict_inputs")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                for field in ClimateField::ALL {
                    let range = field.range();
                    ui.label(field.label());
                    ui.add_enabled(
                        !busy,
                        egui::DragValue::new(inputs.value_mut(field))
                            .range(range.clone())
                            .speed(drag_speed(field)),
                    )
                    .on_hover_text(format!("{} to {}", range.start(), range.end()));
                    ui.end_row();
                }
            });

        ui.add_space(12.0);
        let submit = ui
            .add_enabled(!busy, egui::Button::new("Predict Rainfall"))
            .clicked();
        feedback::render_busy(ui, self.controller.ui.pending, Page::Predict);
        feedback::render_notices(ui, &self.controller.ui.predict.notices);

        if submit {
            self.controller.submit_prediction();
        }
    }
}

fn drag_speed(field: ClimateField) -> f64 {
    match field {
        ClimateField::GlobalRadiation => 10.0,
        ClimateField::Sunshine => 0.1,
        _ => 0.5,
    }
}
