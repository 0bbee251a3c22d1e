use super::*;
use crate::rainfall_api::{EvaluationResult, RemoteCallFailure, UploadedFile};
use rfd::FileDialog;
use serde_json::Value;
use std::path::Path;

pub(super) const UPLOAD_ACCEPTED: &str = "File uploaded successfully. Click \"Retrain & Evaluate\"";
pub(super) const EVALUATED: &str = "Model retrained and evaluated";
pub(super) const SAVED: &str = "Dataset and model saved successfully.";
pub(super) const SAVE_FAILED: &str = "Failed to save updated model and dataset";
pub(super) const REJECTED: &str = "Updates rejected. Original model and dataset preserved";
pub(super) const SAVE_NEEDS_EVALUATION: &str =
    "Retrain and evaluate the uploaded data before saving";
pub(super) const EVALUATE_NEEDS_UPLOAD: &str = "Upload a CSV file before retraining";

impl EguiController {
    /// Pick a CSV file with the native dialog and upload it.
    pub fn choose_upload_via_dialog(&mut self) {
        if self.is_busy() {
            return;
        }
        let Some(path) = FileDialog::new()
            .set_title("Choose a CSV file to upload")
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            return;
        };
        self.accept_upload(&path);
    }

    /// Store a CSV file for this session, replacing any earlier upload and
    /// its evaluation. Returns whether the file was accepted.
    pub fn accept_upload(&mut self, path: &Path) -> bool {
        if self.is_busy() {
            return false;
        }
        let retrain = &mut self.ui.retrain;
        retrain.notices.clear();
        match UploadedFile::load(path) {
            Ok(file) => {
                self.next_upload_id += 1;
                tracing::info!(
                    "Accepted upload {} ({} data rows)",
                    file.file_name(),
                    file.data_rows()
                );
                retrain.stage = RetrainStage::Uploaded {
                    upload: SessionUpload {
                        id: self.next_upload_id,
                        file,
                    },
                };
                retrain.notices.push(NoticeTone::Info, UPLOAD_ACCEPTED);
                self.set_status("File uploaded", StatusTone::Info);
                true
            }
            Err(err) => {
                tracing::warn!("Rejected upload {}: {err}", path.display());
                retrain.notices.push(NoticeTone::Error, err.to_string());
                self.set_status("Upload rejected", StatusTone::Warning);
                false
            }
        }
    }

    /// Ask the service to retrain on the uploaded file and report metrics.
    pub fn retrain_and_evaluate(&mut self) {
        if self.is_busy() {
            return;
        }
        let retrain = &mut self.ui.retrain;
        retrain.notices.clear();
        let Some(upload) = retrain.stage.upload().cloned() else {
            retrain.notices.push(NoticeTone::Error, EVALUATE_NEEDS_UPLOAD);
            return;
        };
        self.begin_call(
            PendingCall::Evaluate {
                upload_id: upload.id,
            },
            ApiRequest::evaluate(upload.file),
        );
    }

    /// Commit the evaluated dataset and model. Only valid right after an evaluation.
    pub fn save_retrained_model(&mut self) {
        if self.is_busy() {
            return;
        }
        let retrain = &mut self.ui.retrain;
        retrain.notices.clear();
        let RetrainStage::Evaluated { upload, .. } = &retrain.stage else {
            tracing::warn!("Save requested in {} stage", retrain.stage.name());
            retrain.notices.push(NoticeTone::Error, SAVE_NEEDS_EVALUATION);
            return;
        };
        let upload = upload.clone();
        let request = ApiRequest::save(upload.file, self.save_style);
        self.begin_call(
            PendingCall::Save {
                upload_id: upload.id,
            },
            request,
        );
    }

    /// Discard the evaluation and keep the upload for another attempt.
    pub fn reject_updates(&mut self) {
        if self.is_busy() {
            return;
        }
        let retrain = &mut self.ui.retrain;
        match std::mem::take(&mut retrain.stage) {
            RetrainStage::Evaluated { upload, .. } => {
                retrain.stage = RetrainStage::Rejected { upload };
                retrain.notices.clear();
                retrain.notices.push(NoticeTone::Warning, REJECTED);
                self.set_status("Updates rejected", StatusTone::Warning);
            }
            other => retrain.stage = other,
        }
    }

    /// Forget the upload and any evaluation.
    pub fn reset_retrain_session(&mut self) {
        if self.is_busy() {
            return;
        }
        self.ui.retrain = RetrainState::default();
        self.set_status("Ready", StatusTone::Idle);
    }

    pub(super) fn apply_evaluation_result(
        &mut self,
        upload_id: u64,
        result: Result<Value, RemoteCallFailure>,
    ) {
        let retrain = &mut self.ui.retrain;
        if retrain.stage.upload().map(|upload| upload.id) != Some(upload_id) {
            tracing::debug!("Dropping evaluation for replaced upload {upload_id}");
            return;
        }
        let Some(body) = gateway::surface(result, &mut retrain.notices) else {
            self.set_status("Evaluation failed", StatusTone::Error);
            return;
        };
        match EvaluationResult::from_response(&body) {
            Ok(evaluation) => {
                if let Some(upload) = std::mem::take(&mut retrain.stage).into_upload() {
                    retrain.stage = RetrainStage::Evaluated { upload, evaluation };
                }
                retrain.notices.push(NoticeTone::Success, EVALUATED);
                self.set_status("Evaluation ready", StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Unusable evaluation response: {err}");
                retrain.notices.push(NoticeTone::Error, err.to_string());
                self.set_status("Evaluation incomplete", StatusTone::Warning);
            }
        }
    }

    pub(super) fn apply_save_result(
        &mut self,
        upload_id: u64,
        result: Result<Value, RemoteCallFailure>,
    ) {
        let retrain = &mut self.ui.retrain;
        if retrain.stage.upload().map(|upload| upload.id) != Some(upload_id) {
            tracing::debug!("Dropping save result for replaced upload {upload_id}");
            return;
        }
        let Some(body) = gateway::surface(result, &mut retrain.notices) else {
            retrain.notices.push(NoticeTone::Error, SAVE_FAILED);
            self.set_status("Save failed", StatusTone::Error);
            return;
        };
        if !save_confirmed(&body) {
            tracing::warn!("Save response did not confirm the update: {body}");
            retrain.notices.push(NoticeTone::Error, SAVE_FAILED);
            self.set_status("Save failed", StatusTone::Error);
            return;
        }
        retrain.stage = match std::mem::take(&mut retrain.stage) {
            RetrainStage::Evaluated { upload, evaluation } => {
                RetrainStage::Saved { upload, evaluation }
            }
            other => other,
        };
        retrain.notices.push(NoticeTone::Success, SAVED);
        tracing::info!("Retrained model and dataset saved");
        self.set_status("Model saved", StatusTone::Info);
    }
}

/// An empty or false body means the service did not persist anything.
fn save_confirmed(body: &Value) -> bool {
    match body {
        Value::Null | Value::Bool(false) => false,
        Value::Object(fields) => !fields.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
