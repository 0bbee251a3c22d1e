use super::EguiController;
use crate::config::AppSettings;
use crate::rainfall_api::upload::expected_header_line;
use crate::rainfall_api::{ApiRequest, RemoteCallFailure, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport that replays scripted results and records every request.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value, RemoteCallFailure>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, result: Result<Value, RemoteCallFailure>) {
        self.responses.lock().unwrap().push_back(result);
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value, RemoteCallFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteCallFailure::Transport("no scripted response".into())))
    }
}

pub(crate) fn controller_with(transport: &Arc<FakeTransport>) -> EguiController {
    controller_with_settings(transport, &AppSettings::default())
}

pub(crate) fn controller_with_settings(
    transport: &Arc<FakeTransport>,
    settings: &AppSettings,
) -> EguiController {
    let transport: Arc<dyn Transport> = transport.clone();
    EguiController::new(transport, settings)
}

/// Poll until the in-flight call has been applied.
pub(crate) fn settle(controller: &mut EguiController) {
    for _ in 0..1000 {
        controller.poll_background_jobs();
        if !controller.is_busy() {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("call did not settle");
}

pub(crate) fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let mut text = expected_header_line();
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}
