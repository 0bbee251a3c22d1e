use super::retrain::{
    EVALUATE_NEEDS_UPLOAD, EVALUATED, REJECTED, SAVE_FAILED, SAVE_NEEDS_EVALUATION, SAVED,
    UPLOAD_ACCEPTED,
};
use super::test_support::{FakeTransport, controller_with, controller_with_settings, settle, write_csv};
use super::*;
use crate::rainfall_api::{
    ClimateField, Endpoint, Method, Payload, PredictionRequest, RemoteCallFailure,
};
use serde_json::json;
use tempfile::tempdir;

const ROW: &str = "20240101,2,7,52,10.6,7,3.3,0.4,101900,0";

fn evaluation_body() -> serde_json::Value {
    json!({
        "Current Evaluation Metrics": [
            { "Model": "Random Forest", "MSE": 4.5, "RMSE": 2.12, "MAPE": 0.31 },
            { "Model": "Gradient Boosting", "MSE": 4.8, "RMSE": 2.19, "MAPE": 0.33 }
        ],
        "New Evaluation Metrics": [
            { "Model": "Random Forest", "MSE": 4.1, "RMSE": 2.02, "MAPE": 0.29 },
            { "Model": "Gradient Boosting", "MSE": 4.6, "RMSE": 2.14, "MAPE": 0.32 }
        ]
    })
}

fn refused() -> RemoteCallFailure {
    RemoteCallFailure::Transport("Connection refused (os error 111)".to_string())
}

fn evaluated_controller(
    transport: &Arc<FakeTransport>,
    dir: &std::path::Path,
) -> EguiController {
    let mut controller = controller_with(transport);
    assert!(controller.accept_upload(&write_csv(dir, "weather.csv", &[ROW])));
    transport.respond(Ok(evaluation_body()));
    controller.retrain_and_evaluate();
    settle(&mut controller);
    assert!(controller.ui.retrain.stage.awaiting_decision());
    controller
}

#[test]
fn prediction_sends_one_call_with_all_fields() {
    let transport = FakeTransport::new();
    transport.respond(Ok(json!({ "Prediction": 0.0 })));
    let mut controller = controller_with(&transport);
    controller.ui.predict.inputs = PredictionRequest {
        cloud_cover: 6.0,
        sunshine: 1.5,
        global_radiation: 35.0,
        max_temp: 8.2,
        mean_temp: 5.1,
        min_temp: -1.0,
        pressure: 101.2,
    };

    controller.submit_prediction();
    settle(&mut controller);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].endpoint, Endpoint::Predict);
    let Payload::Prediction(sent) = &requests[0].payload else {
        panic!("expected a prediction payload");
    };
    let body = serde_json::to_value(sent).unwrap();
    for field in ClimateField::ALL {
        assert_eq!(body[field.key()], json!(controller.ui.predict.inputs.value(field)));
    }
}

#[test]
fn prediction_success_shows_one_decimal() {
    let transport = FakeTransport::new();
    transport.respond(Ok(json!({ "Prediction": 12.34 })));
    let mut controller = controller_with(&transport);

    controller.submit_prediction();
    assert_eq!(controller.ui.pending, Some(PendingCall::Predict));
    settle(&mut controller);

    assert_eq!(controller.ui.pending, None);
    assert_eq!(controller.ui.predict.last_prediction, Some(12.34));
    assert_eq!(
        controller.ui.predict.notices.texts(NoticeTone::Success),
        vec!["The predicted rainfall is 12.3mm"]
    );
}

#[test]
fn prediction_without_value_shows_distinct_error() {
    let transport = FakeTransport::new();
    transport.respond(Ok(json!({ "status": "ok" })));
    let mut controller = controller_with(&transport);

    controller.submit_prediction();
    settle(&mut controller);

    assert_eq!(controller.ui.predict.last_prediction, None);
    assert!(controller.ui.predict.notices.texts(NoticeTone::Success).is_empty());
    assert_eq!(
        controller.ui.predict.notices.texts(NoticeTone::Error),
        vec!["Could not retrieve a valid prediction from the API"]
    );
}

#[test]
fn out_of_range_input_blocks_the_call() {
    let transport = FakeTransport::new();
    let mut controller = controller_with(&transport);
    *controller.ui.predict.inputs.value_mut(ClimateField::Sunshine) = 30.0;

    controller.submit_prediction();

    assert!(!controller.is_busy());
    assert!(transport.requests().is_empty());
    assert_eq!(controller.ui.predict.notices.texts(NoticeTone::Error).len(), 1);
}

#[test]
fn network_failure_becomes_error_notice() {
    let transport = FakeTransport::new();
    transport.respond(Err(refused()));
    let mut controller = controller_with(&transport);

    controller.submit_prediction();
    settle(&mut controller);

    let errors = controller.ui.predict.notices.texts(NoticeTone::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error contacting the API: Connection refused"));
    assert_eq!(controller.ui.predict.last_prediction, None);
    assert!(!controller.is_busy());
}

#[test]
fn second_action_is_ignored_while_busy() {
    let transport = FakeTransport::new();
    transport.respond(Ok(json!({ "Prediction": 1.0 })));
    let mut controller = controller_with(&transport);

    controller.submit_prediction();
    controller.submit_prediction();
    settle(&mut controller);

    assert_eq!(transport.requests().len(), 1);
}

struct PanickingTransport;

impl Transport for PanickingTransport {
    fn send(&self, _request: &ApiRequest) -> Result<serde_json::Value, RemoteCallFailure> {
        panic!("transport exploded");
    }
}

#[test]
fn panicking_worker_releases_busy_state() {
    let transport: Arc<dyn Transport> = Arc::new(PanickingTransport);
    let mut controller = EguiController::new(transport, &AppSettings::default());

    controller.submit_prediction();
    settle(&mut controller);

    let errors = controller.ui.predict.notices.texts(NoticeTone::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("request worker stopped unexpectedly: transport exploded"));
    assert_eq!(controller.ui.pending, None);
}

#[test]
fn upload_moves_to_uploaded_stage() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = controller_with(&transport);

    assert!(controller.accept_upload(&write_csv(dir.path(), "weather.csv", &[ROW])));

    let stage = &controller.ui.retrain.stage;
    assert_eq!(stage.name(), "uploaded");
    assert_eq!(stage.upload().unwrap().file.file_name(), "weather.csv");
    assert_eq!(
        controller.ui.retrain.notices.texts(NoticeTone::Info),
        vec![UPLOAD_ACCEPTED]
    );
    assert!(transport.requests().is_empty());
}

#[test]
fn non_csv_upload_is_rejected_without_network() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("weather.txt");
    std::fs::write(&path, "date,cloud_cover").unwrap();
    let transport = FakeTransport::new();
    let mut controller = controller_with(&transport);

    assert!(!controller.accept_upload(&path));

    assert_eq!(controller.ui.retrain.stage, RetrainStage::Idle);
    assert_eq!(controller.ui.retrain.notices.texts(NoticeTone::Error).len(), 1);
    assert!(transport.requests().is_empty());
}

#[test]
fn evaluate_without_upload_does_nothing() {
    let transport = FakeTransport::new();
    let mut controller = controller_with(&transport);

    controller.retrain_and_evaluate();

    assert!(!controller.is_busy());
    assert!(transport.requests().is_empty());
    assert_eq!(
        controller.ui.retrain.notices.texts(NoticeTone::Error),
        vec![EVALUATE_NEEDS_UPLOAD]
    );
}

#[test]
fn evaluation_tables_mirror_response() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let controller = evaluated_controller(&transport, dir.path());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].describe(), "POST /retrain_save?action=evaluate");

    let evaluation = controller.ui.retrain.stage.evaluation().unwrap();
    let expected = crate::rainfall_api::EvaluationResult::from_response(&evaluation_body()).unwrap();
    assert_eq!(evaluation, &expected);
    let models: Vec<&str> = evaluation
        .current
        .rows
        .iter()
        .map(|row| row.model.as_str())
        .collect();
    assert_eq!(models, vec!["Random Forest", "Gradient Boosting"]);
    assert_eq!(
        controller.ui.retrain.notices.texts(NoticeTone::Success),
        vec![EVALUATED]
    );
}

#[test]
fn evaluation_missing_tables_keeps_upload_stage() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    transport.respond(Ok(json!({ "Current Evaluation Metrics": [] })));
    let mut controller = controller_with(&transport);
    controller.accept_upload(&write_csv(dir.path(), "weather.csv", &[ROW]));

    controller.retrain_and_evaluate();
    settle(&mut controller);

    assert_eq!(controller.ui.retrain.stage.name(), "uploaded");
    assert_eq!(
        controller.ui.retrain.notices.texts(NoticeTone::Error),
        vec!["The API response did not include New Evaluation Metrics"]
    );
}

#[test]
fn refused_evaluation_keeps_upload_and_reports_once() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    transport.respond(Err(refused()));
    let mut controller = controller_with(&transport);
    controller.accept_upload(&write_csv(dir.path(), "weather.csv", &[ROW]));

    controller.retrain_and_evaluate();
    settle(&mut controller);

    let retrain = &controller.ui.retrain;
    assert_eq!(retrain.stage.name(), "uploaded");
    assert!(retrain.stage.evaluation().is_none());
    let errors = retrain.notices.texts(NoticeTone::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error contacting the API:"));
    assert!(retrain.stage.can_evaluate());
}

#[test]
fn save_before_evaluation_sends_nothing() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = controller_with(&transport);

    controller.save_retrained_model();
    controller.accept_upload(&write_csv(dir.path(), "weather.csv", &[ROW]));
    controller.save_retrained_model();

    assert!(transport.requests().is_empty());
    assert!(!controller.is_busy());
    assert_eq!(
        controller.ui.retrain.notices.texts(NoticeTone::Error),
        vec![SAVE_NEEDS_EVALUATION]
    );
}

#[test]
fn save_after_evaluation_posts_same_file() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = evaluated_controller(&transport, dir.path());
    transport.respond(Ok(json!({ "message": "saved" })));

    controller.save_retrained_model();
    settle(&mut controller);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].describe(), "POST /retrain_save?action=save");
    assert_eq!(requests[0].payload, requests[1].payload);
    assert_eq!(controller.ui.retrain.stage.name(), "saved");
    assert!(controller.ui.retrain.stage.evaluation().is_some());
    assert_eq!(
        controller.ui.retrain.notices.texts(NoticeTone::Success),
        vec![SAVED]
    );
}

#[test]
fn legacy_save_setting_uses_put() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut settings = AppSettings::default();
    settings.api.legacy_put_save = true;
    let mut controller = controller_with_settings(&transport, &settings);
    controller.accept_upload(&write_csv(dir.path(), "weather.csv", &[ROW]));
    transport.respond(Ok(evaluation_body()));
    controller.retrain_and_evaluate();
    settle(&mut controller);
    transport.respond(Ok(json!({ "message": "saved" })));

    controller.save_retrained_model();
    settle(&mut controller);

    assert_eq!(transport.requests()[1].describe(), "PUT /retrain_save");
    assert_eq!(controller.ui.retrain.stage.name(), "saved");
}

#[test]
fn empty_save_response_counts_as_failure() {
    for body in [json!({}), json!([]), json!(null), json!(false)] {
        let dir = tempdir().unwrap();
        let transport = FakeTransport::new();
        let mut controller = evaluated_controller(&transport, dir.path());
        transport.respond(Ok(body.clone()));

        controller.save_retrained_model();
        settle(&mut controller);

        let notices = &controller.ui.retrain.notices;
        assert_eq!(notices.texts(NoticeTone::Error), vec![SAVE_FAILED], "body {body}");
        assert!(notices.texts(NoticeTone::Success).is_empty(), "body {body}");
        assert!(controller.ui.retrain.stage.awaiting_decision(), "body {body}");
    }
}

#[test]
fn failed_save_reports_both_messages_and_stays_evaluated() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = evaluated_controller(&transport, dir.path());
    transport.respond(Err(RemoteCallFailure::Status {
        code: 500,
        url: "http://host/retrain_save?action=save".to_string(),
        body: "(empty body)".to_string(),
    }));

    controller.save_retrained_model();
    settle(&mut controller);

    let errors = controller.ui.retrain.notices.texts(NoticeTone::Error);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Error contacting the API: 500"));
    assert_eq!(errors[1], SAVE_FAILED);
    assert!(controller.ui.retrain.stage.awaiting_decision());
}

#[test]
fn reject_clears_evaluation_but_keeps_upload() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = evaluated_controller(&transport, dir.path());

    controller.reject_updates();

    let stage = &controller.ui.retrain.stage;
    assert_eq!(stage.name(), "rejected");
    assert!(stage.evaluation().is_none());
    assert!(stage.can_evaluate());
    assert_eq!(
        controller.ui.retrain.notices.texts(NoticeTone::Warning),
        vec![REJECTED]
    );

    controller.save_retrained_model();
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn reject_outside_evaluated_stage_is_ignored() {
    let transport = FakeTransport::new();
    let mut controller = controller_with(&transport);

    controller.reject_updates();

    assert_eq!(controller.ui.retrain.stage, RetrainStage::Idle);
    assert!(controller.ui.retrain.notices.is_empty());
}

#[test]
fn reupload_discards_previous_evaluation() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = evaluated_controller(&transport, dir.path());
    let first_id = controller.ui.retrain.stage.upload().unwrap().id;

    assert!(controller.accept_upload(&write_csv(dir.path(), "newer.csv", &[ROW, ROW])));

    let stage = &controller.ui.retrain.stage;
    assert_eq!(stage.name(), "uploaded");
    assert!(stage.evaluation().is_none());
    assert_ne!(stage.upload().unwrap().id, first_id);
    assert_eq!(stage.upload().unwrap().file.data_rows(), 2);
}

#[test]
fn stale_evaluation_result_is_dropped() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = controller_with(&transport);
    controller.accept_upload(&write_csv(dir.path(), "weather.csv", &[ROW]));
    let stale_id = controller.ui.retrain.stage.upload().unwrap().id;
    controller.reset_retrain_session();
    controller.accept_upload(&write_csv(dir.path(), "other.csv", &[ROW]));

    controller.apply_evaluation_result(stale_id, Ok(evaluation_body()));

    assert_eq!(controller.ui.retrain.stage.name(), "uploaded");
}

#[test]
fn reset_returns_to_idle() {
    let dir = tempdir().unwrap();
    let transport = FakeTransport::new();
    let mut controller = evaluated_controller(&transport, dir.path());

    controller.reset_retrain_session();

    assert_eq!(controller.ui.retrain, RetrainState::default());
}

#[test]
fn home_is_fetched_once_on_first_visit() {
    let transport = FakeTransport::new();
    transport.respond(Ok(json!({ "message": "Rainfall API", "version": 2 })));
    let mut controller = controller_with(&transport);

    controller.select_page(Page::Home);
    settle(&mut controller);
    controller.select_page(Page::Predict);
    controller.select_page(Page::Home);

    assert_eq!(transport.requests().len(), 1);
    assert_eq!(transport.requests()[0].describe(), "GET /");
    assert_eq!(
        controller.ui.home.info.as_deref(),
        Some("message: Rainfall API\nversion: 2")
    );
}

#[test]
fn home_failure_is_reported_on_home_page() {
    let transport = FakeTransport::new();
    transport.respond(Err(refused()));
    let mut controller = controller_with(&transport);

    controller.select_page(Page::Home);
    settle(&mut controller);

    assert_eq!(controller.ui.home.info, None);
    assert_eq!(controller.ui.home.notices.texts(NoticeTone::Error).len(), 1);
    assert!(controller.ui.predict.notices.is_empty());
}

#[test]
fn landing_text_handles_plain_strings_and_lists() {
    assert_eq!(home::landing_text(&json!("Welcome")), "Welcome");
    assert_eq!(home::landing_text(&json!([1, 2])), "[\n  1,\n  2\n]");
}

#[test]
fn start_page_comes_from_settings() {
    let transport = FakeTransport::new();
    let mut settings = AppSettings::default();
    settings.ui.start_page = crate::config::StartPage::Retrain;
    let controller = controller_with_settings(&transport, &settings);
    assert_eq!(controller.ui.page, Page::Retrain);
    assert_eq!(controller.ui.home.service_url, crate::config::DEFAULT_BASE_URL);
}
