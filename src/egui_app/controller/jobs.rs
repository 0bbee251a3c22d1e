use crate::egui_app::state::PendingCall;
use crate::rainfall_api::{ApiRequest, RemoteCallFailure, Transport};
use serde_json::Value;
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

/// Outcome of one call, delivered back to the UI thread.
#[derive(Debug)]
pub(crate) struct JobMessage {
    pub(crate) call: PendingCall,
    pub(crate) result: Result<Value, RemoteCallFailure>,
}

/// Runs at most one call at a time on a worker thread.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    in_flight: Option<PendingCall>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            in_flight: None,
        }
    }

    pub(super) fn in_flight(&self) -> Option<PendingCall> {
        self.in_flight
    }

    /// Start `request` unless another call is still running.
    pub(super) fn begin(
        &mut self,
        transport: Arc<dyn Transport>,
        call: PendingCall,
        request: ApiRequest,
    ) -> bool {
        if self.in_flight.is_some() {
            tracing::debug!("Ignoring {:?}; {:?} still in flight", call, self.in_flight);
            return false;
        }
        self.in_flight = Some(call);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| transport.send(&request)))
                .unwrap_or_else(|payload| {
                    let reason = panic_reason(payload.as_ref());
                    tracing::error!("{} worker panicked: {reason}", request.describe());
                    Err(RemoteCallFailure::Transport(format!(
                        "request worker stopped unexpectedly: {reason}"
                    )))
                });
            let _ = tx.send(JobMessage { call, result });
        });
        true
    }

    pub(super) fn try_recv_message(&self) -> Option<JobMessage> {
        self.message_rx.try_recv().ok()
    }

    pub(super) fn finish(&mut self) {
        self.in_flight = None;
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|text| text.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
