use super::*;
use crate::rainfall_api::RemoteCallFailure;
use serde_json::Value;

impl EguiController {
    /// Fetch the landing text from the service root.
    pub fn refresh_home(&mut self) {
        if self.is_busy() {
            return;
        }
        self.ui.home.requested = true;
        self.ui.home.notices.clear();
        self.begin_call(PendingCall::Home, ApiRequest::home());
    }

    pub(super) fn apply_home_result(&mut self, result: Result<Value, RemoteCallFailure>) {
        match gateway::surface(result, &mut self.ui.home.notices) {
            Some(body) => {
                self.ui.home.info = Some(landing_text(&body));
                self.set_status("Connected to the rainfall service", StatusTone::Info);
            }
            None => self.set_status("Rainfall service unreachable", StatusTone::Error),
        }
    }
}

/// Render a landing payload as plain text.
pub(super) fn landing_text(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| match value {
                Value::String(text) => format!("{key}: {text}"),
                other => format!("{key}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
