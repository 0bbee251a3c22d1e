//! egui renderer for the application UI.
//!
//! Each frame is drawn from [`UiState`](crate::egui_app::state::UiState);
//! widgets report user intent back as actions that the controller applies.

mod feedback;
mod home;
mod predict;
mod retrain;
pub mod style;

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::Page;
use eframe::egui::{self, Frame, RichText};
use std::time::Duration;

/// Title shown in the window bar and above every page.
pub const APP_TITLE: &str = "Rainfall Prediction Application";
/// Smallest window size that still fits the metric tables side by side.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 560.0);

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(mut controller: EguiController) -> Self {
        let page = controller.ui.page;
        controller.select_page(page);
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_menu(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::SidePanel::left("menu")
            .resizable(false)
            .exact_width(170.0)
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("Menu").strong().color(palette.text_muted));
                ui.add_space(6.0);
                let mut selected = self.controller.ui.page;
                for page in Page::ALL {
                    ui.radio_value(&mut selected, page, page.label());
                }
                if selected != self.controller.ui.page {
                    self.controller.select_page(selected);
                }
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(palette.bg_primary))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).strong());
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                });
            });
    }

    fn render_page(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new(APP_TITLE).size(24.0));
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.controller.ui.page {
                    Page::Home => self.render_home_page(ui),
                    Page::Predict => self.render_predict_page(ui),
                    Page::Retrain => self.render_retrain_page(ui),
                });
        });
    }

    /// Files dropped on the window are treated as uploads on the retrain page.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(path) = dropped.into_iter().find_map(|file| file.path) else {
            return;
        };
        if self.controller.ui.page != Page::Retrain {
            self.controller.select_page(Page::Retrain);
        }
        self.controller.accept_upload(&path);
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.handle_dropped_files(ctx);
        self.render_menu(ctx);
        self.render_status(ctx);
        self.render_page(ctx);
        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}
