//! Shared state types for the egui UI.
//!
//! Everything the renderer draws lives here; the controller is the only
//! writer apart from the prediction inputs, which are edited in place.

use crate::config::StartPage;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::rainfall_api::{ErrorSink, EvaluationResult, PredictionRequest, UploadedFile};
use egui::Color32;

/// Pages reachable from the sidebar menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Predict,
    Retrain,
}

impl Page {
    pub const ALL: [Self; 3] = [Self::Home, Self::Predict, Self::Retrain];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Predict => "Predict",
            Self::Retrain => "Retrain Model",
        }
    }
}

impl From<StartPage> for Page {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Home => Self::Home,
            StartPage::Predict => Self::Predict,
            StartPage::Retrain => Self::Retrain,
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub page: Page,
    pub status: StatusBarState,
    /// The call currently in flight, if any.
    pub pending: Option<PendingCall>,
    pub home: HomeState,
    pub predict: PredictFormState,
    pub retrain: RetrainState,
}

impl UiState {
    pub fn new(page: Page, service_url: impl Into<String>) -> Self {
        Self {
            page,
            status: StatusBarState::idle(),
            pending: None,
            home: HomeState {
                service_url: service_url.into(),
                ..HomeState::default()
            },
            predict: PredictFormState::default(),
            retrain: RetrainState::default(),
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        let (badge_label, badge_color) = style::status_badge(StatusTone::Idle);
        Self {
            text: "Ready".into(),
            badge_label,
            badge_color,
        }
    }
}

/// Outbound call shown with a busy indicator until it settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingCall {
    Home,
    Predict,
    Evaluate { upload_id: u64 },
    Save { upload_id: u64 },
}

impl PendingCall {
    pub fn busy_label(self) -> &'static str {
        match self {
            Self::Home => "Loading...",
            Self::Predict => "Making prediction...",
            Self::Evaluate { .. } => "Retraining model and evaluating...",
            Self::Save { .. } => "Saving data and retraining model...",
        }
    }

    pub fn page(self) -> Page {
        match self {
            Self::Home => Page::Home,
            Self::Predict => Page::Predict,
            Self::Evaluate { .. } | Self::Save { .. } => Page::Retrain,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Info,
    Warning,
    Error,
}

/// A message box shown on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub tone: NoticeTone,
    pub text: String,
}

impl Notice {
    pub fn new(tone: NoticeTone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// Messages produced by the most recent action on a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, tone: NoticeTone, text: impl Into<String>) {
        self.items.push(Notice::new(tone, text));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Texts of every notice with `tone`.
    pub fn texts(&self, tone: NoticeTone) -> Vec<&str> {
        self.items
            .iter()
            .filter(|notice| notice.tone == tone)
            .map(|notice| notice.text.as_str())
            .collect()
    }
}

impl ErrorSink for Notices {
    fn report_error(&mut self, message: String) {
        self.push(NoticeTone::Error, message);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeState {
    /// Base URL of the service, shown for orientation.
    pub service_url: String,
    /// Landing text returned by the service.
    pub info: Option<String>,
    /// Whether the landing text has been requested this session.
    pub requested: bool,
    pub notices: Notices,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictFormState {
    pub inputs: PredictionRequest,
    /// Rainfall in mm from the last successful prediction.
    pub last_prediction: Option<f64>,
    pub notices: Notices,
}

/// An upload tagged with a session-local id so late results can be matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUpload {
    pub id: u64,
    pub file: UploadedFile,
}

/// Progress of the retrain workflow for this session.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RetrainStage {
    #[default]
    Idle,
    Uploaded {
        upload: SessionUpload,
    },
    Evaluated {
        upload: SessionUpload,
        evaluation: EvaluationResult,
    },
    Saved {
        upload: SessionUpload,
        evaluation: EvaluationResult,
    },
    /// The evaluation was discarded; the upload is kept for another attempt.
    Rejected {
        upload: SessionUpload,
    },
}

impl RetrainStage {
    pub fn upload(&self) -> Option<&SessionUpload> {
        match self {
            Self::Idle => None,
            Self::Uploaded { upload }
            | Self::Evaluated { upload, .. }
            | Self::Saved { upload, .. }
            | Self::Rejected { upload } => Some(upload),
        }
    }

    pub fn into_upload(self) -> Option<SessionUpload> {
        match self {
            Self::Idle => None,
            Self::Uploaded { upload }
            | Self::Evaluated { upload, .. }
            | Self::Saved { upload, .. }
            | Self::Rejected { upload } => Some(upload),
        }
    }

    pub fn evaluation(&self) -> Option<&EvaluationResult> {
        match self {
            Self::Evaluated { evaluation, .. } | Self::Saved { evaluation, .. } => {
                Some(evaluation)
            }
            _ => None,
        }
    }

    pub fn can_evaluate(&self) -> bool {
        self.upload().is_some()
    }

    /// Save and reject both need a fresh evaluation.
    pub fn awaiting_decision(&self) -> bool {
        matches!(self, Self::Evaluated { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploaded { .. } => "uploaded",
            Self::Evaluated { .. } => "evaluated",
            Self::Saved { .. } => "saved",
            Self::Rejected { .. } => "rejected",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RetrainState {
    pub stage: RetrainStage,
    pub notices: Notices,
}
