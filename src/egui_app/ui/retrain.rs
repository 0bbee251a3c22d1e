use super::EguiApp;
use super::{feedback, style};
use crate::egui_app::state::{Page, RetrainStage};
use crate::rainfall_api::MetricTable;
use crate::rainfall_api::upload::expected_header_line;
use eframe::egui::{self, RichText};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RetrainAction {
    None,
    ChooseFile,
    Reset,
    Evaluate,
    Save,
    Reject,
}

impl EguiApp {
    pub(super) fn render_retrain_page(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let busy = self.controller.is_busy();
        let pending = self.controller.ui.pending;
        let retrain = &self.controller.ui.retrain;
        let stage = &retrain.stage;
        let mut action = RetrainAction::None;

        ui.heading("Update Training Data and Retrain Model");
        ui.label("Upload a CSV file containing the latest climatic data.");
        ui.label("Retrain the model and then compare the performance metrics.");
        ui.label(
            RichText::new(format!("Expected columns: {}", expected_header_line()))
                .small()
                .color(palette.text_muted),
        );
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("Choose a CSV file to upload…"))
                .clicked()
            {
                action = RetrainAction::ChooseFile;
            }
            match stage.upload() {
                Some(upload) => {
                    ui.label(format!(
                        "{} ({} rows)",
                        upload.file.file_name(),
                        upload.file.data_rows()
                    ));
                }
                None => {
                    ui.label(RichText::new("No file selected").color(palette.text_muted));
                }
            }
            if ui
                .add_enabled(
                    !busy && *stage != RetrainStage::Idle,
                    egui::Button::new("Reset"),
                )
                .clicked()
            {
                action = RetrainAction::Reset;
            }
        });

        ui.add_space(8.0);
        if ui
            .add_enabled(
                !busy && stage.can_evaluate(),
                egui::Button::new("Retrain & Evaluate"),
            )
            .clicked()
        {
            action = RetrainAction::Evaluate;
        }
        feedback::render_busy(ui, pending, Page::Retrain);
        feedback::render_notices(ui, &retrain.notices);

        if let Some(evaluation) = stage.evaluation() {
            ui.add_space(12.0);
            ui.label(RichText::new("Metric Evaluations").size(18.0).strong());
            ui.add_space(6.0);
            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Current Model Metrics").strong());
                render_metric_table(&mut columns[0], "current_metrics", &evaluation.current);
                columns[1].label(RichText::new("Updated Dataset Metrics").strong());
                render_metric_table(&mut columns[1], "updated_metrics", &evaluation.updated);
            });
        }

        if stage.awaiting_decision() {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("Save Dataset and Retrain Model"))
                    .clicked()
                {
                    action = RetrainAction::Save;
                }
                if ui
                    .add_enabled(!busy, egui::Button::new("Reject Updates"))
                    .clicked()
                {
                    action = RetrainAction::Reject;
                }
            });
        }

        match action {
            RetrainAction::None => {}
            RetrainAction::ChooseFile => self.controller.choose_upload_via_dialog(),
            RetrainAction::Reset => self.controller.reset_retrain_session(),
            RetrainAction::Evaluate => self.controller.retrain_and_evaluate(),
            RetrainAction::Save => self.controller.save_retrained_model(),
            RetrainAction::Reject => self.controller.reject_updates(),
        }
    }
}

fn render_metric_table(ui: &mut egui::Ui, id: &str, table: &MetricTable) {
    if table.rows.is_empty() {
        ui.label(RichText::new("No rows").color(style::palette().text_muted));
        return;
    }
    egui::Grid::new(id)
        .striped(true)
        .num_columns(MetricTable::COLUMNS.len())
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for heading in MetricTable::COLUMNS {
                ui.label(RichText::new(heading).strong());
            }
            ui.end_row();
            for row in &table.rows {
                ui.label(&row.model);
                ui.label(format_metric(row.mse));
                ui.label(format_metric(row.rmse));
                ui.label(format_metric(row.mape));
                ui.end_row();
            }
        });
}

fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| "—".to_string(), |value| format!("{value:.4}"))
}
