//! Bridges user actions to the rainfall service and keeps [`UiState`] current.

mod home;
mod jobs;
mod predict;
mod retrain;
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

use crate::config::AppSettings;
use crate::egui_app::state::*;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::rainfall_api::{ApiRequest, SaveStyle, Transport, gateway};
use jobs::{ControllerJobs, JobMessage};
use std::sync::Arc;

/// Maintains app state and dispatches calls through a [`Transport`].
pub struct EguiController {
    pub ui: UiState,
    transport: Arc<dyn Transport>,
    jobs: ControllerJobs,
    save_style: SaveStyle,
    next_upload_id: u64,
}

impl EguiController {
    pub fn new(transport: Arc<dyn Transport>, settings: &AppSettings) -> Self {
        let save_style = if settings.api.legacy_put_save {
            SaveStyle::LegacyPut
        } else {
            SaveStyle::ActionQuery
        };
        Self {
            ui: UiState::new(settings.ui.start_page.into(), settings.api.base_url.clone()),
            transport,
            jobs: ControllerJobs::new(),
            save_style,
            next_upload_id: 0,
        }
    }

    /// Switch pages. The home page fetches its landing text on first visit.
    pub fn select_page(&mut self, page: Page) {
        self.ui.page = page;
        if page == Page::Home && !self.ui.home.requested {
            self.refresh_home();
        }
    }

    /// True while a call is in flight; every action is ignored until it settles.
    pub fn is_busy(&self) -> bool {
        self.jobs.in_flight().is_some()
    }

    /// Apply results of finished calls. Call once per frame.
    pub fn poll_background_jobs(&mut self) {
        while let Some(JobMessage { call, result }) = self.jobs.try_recv_message() {
            self.jobs.finish();
            self.ui.pending = None;
            match call {
                PendingCall::Home => self.apply_home_result(result),
                PendingCall::Predict => self.apply_prediction_result(result),
                PendingCall::Evaluate { upload_id } => {
                    self.apply_evaluation_result(upload_id, result)
                }
                PendingCall::Save { upload_id } => self.apply_save_result(upload_id, result),
            }
        }
    }

    fn begin_call(&mut self, call: PendingCall, request: ApiRequest) -> bool {
        tracing::info!("Starting {}", request.describe());
        if !self
            .jobs
            .begin(Arc::clone(&self.transport), call, request)
        {
            return false;
        }
        self.ui.pending = Some(call);
        self.set_status(call.busy_label(), StatusTone::Busy);
        true
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = style::status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}
