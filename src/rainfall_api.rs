//! Client side of the remote rainfall service.
//!
//! Requests are described by [`ApiRequest`] and executed by a [`Transport`].
//! [`gateway::surface`] turns a failed call into a user-visible message and
//! an empty result.

pub mod evaluation;
pub mod gateway;
pub mod prediction;
pub mod transport;
pub mod upload;

pub use evaluation::{EvaluationParseError, EvaluationResult, MetricRow, MetricTable};
pub use gateway::ErrorSink;
pub use prediction::{ClimateField, PredictionInputError, PredictionOutcome, PredictionRequest};
pub use transport::{HttpTransport, RemoteCallFailure, Transport};
pub use upload::{UploadError, UploadedFile};

/// Query parameter that selects the retrain behavior.
pub const ACTION_PARAM: &str = "action";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Paths exposed by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Home,
    Predict,
    RetrainSave,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Predict => "/predict",
            Self::RetrainSave => "/retrain_save",
        }
    }
}

/// How the retrained model is committed on the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveStyle {
    /// `POST /retrain_save?action=save`
    #[default]
    ActionQuery,
    /// `PUT /retrain_save`
    LegacyPut,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Empty,
    Prediction(PredictionRequest),
    CsvUpload(UploadedFile),
}

/// One outbound call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: Endpoint,
    pub query: Vec<(&'static str, &'static str)>,
    pub payload: Payload,
}

impl ApiRequest {
    /// Landing information shown on the home page.
    pub fn home() -> Self {
        Self {
            method: Method::Get,
            endpoint: Endpoint::Home,
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    pub fn predict(inputs: PredictionRequest) -> Self {
        Self {
            method: Method::Post,
            endpoint: Endpoint::Predict,
            query: Vec::new(),
            payload: Payload::Prediction(inputs),
        }
    }

    /// Retrain a candidate model on `upload` and compare metrics without persisting.
    pub fn evaluate(upload: UploadedFile) -> Self {
        Self {
            method: Method::Post,
            endpoint: Endpoint::RetrainSave,
            query: vec![(ACTION_PARAM, "evaluate")],
            payload: Payload::CsvUpload(upload),
        }
    }

    /// Commit `upload` and the retrained model as the new baseline.
    pub fn save(upload: UploadedFile, style: SaveStyle) -> Self {
        match style {
            SaveStyle::ActionQuery => Self {
                method: Method::Post,
                endpoint: Endpoint::RetrainSave,
                query: vec![(ACTION_PARAM, "save")],
                payload: Payload::CsvUpload(upload),
            },
            SaveStyle::LegacyPut => Self {
                method: Method::Put,
                endpoint: Endpoint::RetrainSave,
                query: Vec::new(),
                payload: Payload::CsvUpload(upload),
            },
        }
    }

    /// Short form for logs, e.g. `POST /retrain_save?action=save`.
    pub fn describe(&self) -> String {
        let mut text = format!("{} {}", self.method.as_str(), self.endpoint.path());
        for (index, (key, value)) in self.query.iter().enumerate() {
            text.push(if index == 0 { '?' } else { '&' });
            text.push_str(key);
            text.push('=');
            text.push_str(value);
        }
        text
    }
}
