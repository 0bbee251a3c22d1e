use super::*;
use crate::rainfall_api::{PredictionOutcome, RemoteCallFailure};
use serde_json::Value;

impl EguiController {
    /// Validate the form and request a prediction.
    pub fn submit_prediction(&mut self) {
        if self.is_busy() {
            return;
        }
        let form = &mut self.ui.predict;
        form.notices.clear();
        form.last_prediction = None;
        let inputs = form.inputs;
        if let Err(err) = inputs.validate() {
            form.notices.push(NoticeTone::Error, err.to_string());
            self.set_status("Prediction inputs out of range", StatusTone::Warning);
            return;
        }
        self.begin_call(PendingCall::Predict, ApiRequest::predict(inputs));
    }

    pub(super) fn apply_prediction_result(&mut self, result: Result<Value, RemoteCallFailure>) {
        let form = &mut self.ui.predict;
        let Some(body) = gateway::surface(result, &mut form.notices) else {
            self.set_status("Prediction failed", StatusTone::Error);
            return;
        };
        let outcome = PredictionOutcome::from_response(&body);
        match outcome {
            PredictionOutcome::Rainfall(mm) => {
                form.last_prediction = Some(mm);
                form.notices.push(NoticeTone::Success, outcome.message());
                tracing::info!("Predicted rainfall {mm}mm");
                self.set_status("Prediction received", StatusTone::Info);
            }
            PredictionOutcome::Missing => {
                form.notices.push(NoticeTone::Error, outcome.message());
                tracing::warn!("Prediction response had no usable value: {body}");
                self.set_status("Prediction missing from response", StatusTone::Warning);
            }
        }
    }
}
