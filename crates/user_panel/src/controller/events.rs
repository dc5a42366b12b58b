//! Completions sent from backend tasks back to the controller.

use crossbeam_channel::Sender;
use shared::domain::{SubmitKind, UserRecord};

#[derive(Debug)]
pub enum Completion {
    UserList {
        request_id: u64,
        result: anyhow::Result<Vec<UserRecord>>,
    },
    Submit {
        kind: SubmitKind,
        failed: bool,
    },
}

impl Completion {
    pub fn name(&self) -> &'static str {
        match self {
            Completion::UserList { .. } => "user_list",
            Completion::Submit { .. } => "submit",
        }
    }
}

/// Delivers exactly one completion per backend call. If the task is dropped
/// before `deliver` (panic, runtime shutdown) the fallback is sent instead, so
/// the controller always gets to clear its loading flag.
pub(crate) struct CompletionSlot {
    tx: Sender<Completion>,
    fallback: Option<Completion>,
}

impl CompletionSlot {
    pub(crate) fn new(tx: Sender<Completion>, fallback: Completion) -> Self {
        Self {
            tx,
            fallback: Some(fallback),
        }
    }

    pub(crate) fn deliver(mut self, completion: Completion) {
        self.fallback = None;
        send(&self.tx, completion);
    }
}

impl Drop for CompletionSlot {
    fn drop(&mut self) {
        if let Some(fallback) = self.fallback.take() {
            tracing::warn!(
                completion = fallback.name(),
                "backend task ended without completing; sending failure"
            );
            send(&self.tx, fallback);
        }
    }
}

fn send(tx: &Sender<Completion>, completion: Completion) {
    let name = completion.name();
    if tx.send(completion).is_err() {
        tracing::debug!(completion = name, "controller gone; completion dropped");
    }
}
