//! Library exports for the binary and integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Blocking HTTP helpers shared by the API client.
pub(crate) mod http_client;
/// Rolling file logging setup.
pub mod logging;
/// Request building and response parsing for the rainfall service.
pub mod rainfall_api;
