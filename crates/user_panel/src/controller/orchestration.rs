//! Spawning gateway calls onto the backend runtime.

use std::sync::Arc;

use anyhow::anyhow;
use client_core::UserGateway;
use crossbeam_channel::Sender;
use shared::domain::{SubmitKind, UserRecord};
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::events::{Completion, CompletionSlot};

pub(crate) fn spawn_list_fetch(
    runtime: &Handle,
    users: Arc<dyn UserGateway>,
    tx: Sender<Completion>,
    request_id: u64,
) {
    let slot = CompletionSlot::new(
        tx,
        Completion::UserList {
            request_id,
            result: Err(anyhow!("user list fetch was interrupted")),
        },
    );
    debug!(request_id, "spawning user list fetch");
    runtime.spawn(async move {
        let result = users.list_users().await;
        if let Err(err) = &result {
            warn!(request_id, "user list fetch failed: {err:#}");
        }
        slot.deliver(Completion::UserList { request_id, result });
    });
}

pub(crate) fn spawn_submit(
    runtime: &Handle,
    users: Arc<dyn UserGateway>,
    tx: Sender<Completion>,
    kind: SubmitKind,
    user: UserRecord,
) {
    let slot = CompletionSlot::new(tx, Completion::Submit { kind, failed: true });
    debug!(kind = kind.as_str(), email = %user.email, "spawning submit");
    runtime.spawn(async move {
        let outcome = match kind {
            SubmitKind::Add => users.add_user(&user).await,
            SubmitKind::Edit => users.edit_user(&user).await,
            SubmitKind::Remove => users.remove_user(&user).await,
        };
        if let Err(err) = &outcome {
            warn!(kind = kind.as_str(), email = %user.email, "submit failed: {err:#}");
        }
        slot.deliver(Completion::Submit {
            kind,
            failed: outcome.is_err(),
        });
    });
}
