//! Network backend: a Tokio runtime on its own thread, fed by the UI
//! through a crossbeam channel.
//!
//! Actions are handled one at a time, in arrival order. That includes the
//! reveal ticking of a chat reply, so reply requests are strictly
//! serialized: a second question queues behind the running reveal instead
//! of interleaving with it.

pub mod handlers;

use crossbeam_channel::{Receiver, Sender};
use tokio::runtime::Runtime;

use crate::api::ApiClient;
use crate::protocol::{BackendAction, GuiEvent, RevealGate};

/// Run the backend event loop on a tokio runtime
pub fn run_backend(
    client: ApiClient,
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
    gate: RevealGate,
) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    rt.block_on(async move {
        // recv() fails only when the UI side is gone; exit with it.
        while let Ok(action) = action_rx.recv() {
            handlers::handle_action(&client, action, &event_tx, &gate).await;
        }
    });
}
