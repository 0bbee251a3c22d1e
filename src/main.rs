#![deny(missing_docs)]

//! Entry point for the egui-based rainfall prediction client.
use eframe::egui;
use raincast::config;
use raincast::egui_app::controller::EguiController;
use raincast::egui_app::ui::{APP_TITLE, EguiApp, MIN_VIEWPORT_SIZE};
use raincast::logging;
use raincast::rainfall_api::{HttpTransport, Transport};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 680.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(|_cc| {
            let app: Box<dyn eframe::App> = match build_app() {
                Ok(app) => Box::new(app),
                Err(message) => {
                    tracing::error!("Failed to start: {message}");
                    Box::new(LaunchError { message })
                }
            };
            Ok(app)
        }),
    )?;
    Ok(())
}

fn build_app() -> Result<EguiApp, String> {
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let transport = HttpTransport::from_settings(&settings).map_err(|err| err.to_string())?;
    tracing::info!("Using rainfall service at {}", settings.api.base_url);
    let transport: Arc<dyn Transport> = Arc::new(transport);
    Ok(EguiApp::new(EguiController::new(transport, &settings)))
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
