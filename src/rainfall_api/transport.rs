//! Executes [`ApiRequest`]s over HTTP.

use serde_json::Value;
use url::Url;

use super::upload::{CSV_CONTENT_TYPE, UPLOAD_FIELD, UPLOAD_FILE_NAME};
use super::{ApiRequest, Payload};
use crate::config::{AppSettings, ConfigError};
use crate::http_client::{self, MultipartBody};

const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Why a call produced no usable JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteCallFailure {
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Transport(String),
    #[error("{code} error for url {url}: {body}")]
    Status { code: u16, url: String, body: String },
    #[error("failed to read response: {0}")]
    Body(String),
    #[error("response was not valid JSON: {0}")]
    InvalidJson(String),
}

/// Performs one call: non-2xx statuses are failures and 2xx bodies must be JSON.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<Value, RemoteCallFailure>;
}

/// Calls the real service with the shared `ureq` agent.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, ConfigError> {
        settings.base_url().map(Self::new)
    }

    /// Full URL for `request`, keeping any path prefix of the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, RemoteCallFailure> {
        let joined = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            request.endpoint.path()
        );
        let mut url =
            Url::parse(&joined).map_err(|err| RemoteCallFailure::InvalidUrl(err.to_string()))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value, RemoteCallFailure> {
        let url = self.url_for(request)?;
        tracing::info!(method = request.method.as_str(), %url, "Calling rainfall API");
        let call = http_client::agent()
            .request(request.method.as_str(), url.as_str())
            .set("Accept", "application/json");
        let outcome = match &request.payload {
            Payload::Empty => call.call(),
            Payload::Prediction(inputs) => call.send_json(inputs),
            Payload::CsvUpload(upload) => {
                let body = MultipartBody::single_file(
                    UPLOAD_FIELD,
                    UPLOAD_FILE_NAME,
                    CSV_CONTENT_TYPE,
                    upload.bytes(),
                );
                call.set("Content-Type", &body.content_type())
                    .send_bytes(body.bytes())
            }
        };

        let response = match outcome {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_text(response).unwrap_or_else(|err| err.to_string());
                return Err(RemoteCallFailure::Status {
                    code,
                    url: url.to_string(),
                    body: summarize(&body),
                });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(RemoteCallFailure::Transport(err.to_string()));
            }
        };
        let body = read_text(response)?;
        parse_json(&body)
    }
}

fn read_text(response: ureq::Response) -> Result<String, RemoteCallFailure> {
    let bytes = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
        .map_err(|err| RemoteCallFailure::Body(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| RemoteCallFailure::Body(err.to_string()))
}

fn parse_json(body: &str) -> Result<Value, RemoteCallFailure> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(RemoteCallFailure::InvalidJson(
            "empty response body".to_string(),
        ));
    }
    serde_json::from_str(trimmed).map_err(|err| RemoteCallFailure::InvalidJson(err.to_string()))
}

fn summarize(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty body)".to_string();
    }
    let mut summary: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        summary.push('…');
    }
    summary
}
