//! Boundary where failed calls become user-facing messages.

use serde_json::Value;

use super::transport::RemoteCallFailure;

/// Prefix of every message produced for a failed call.
pub const ERROR_PREFIX: &str = "Error contacting the API";

/// Receives the message for a failed call.
pub trait ErrorSink {
    fn report_error(&mut self, message: String);
}

/// Pass a successful body through, or report the failure and return `None`.
///
/// Failures never propagate past this point: the caller only sees the
/// absence of a result.
pub fn surface(
    result: Result<Value, RemoteCallFailure>,
    sink: &mut impl ErrorSink,
) -> Option<Value> {
    match result {
        Ok(body) => Some(body),
        Err(failure) => {
            tracing::warn!("Rainfall API call failed: {failure}");
            sink.report_error(format!("{ERROR_PREFIX}: {failure}"));
            None
        }
    }
}
