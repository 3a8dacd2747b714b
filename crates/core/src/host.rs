//! Minimal host loop.
//!
//! The real host owns command handling and the actual window; both are out
//! of scope here. This loop exists so the binary runs end to end and the
//! integration tests have a live peer: it acks (or, when configured,
//! rejects) submitted messages, tracks a visibility flag, and pushes
//! [`Event`]s back at the UI the way a real host would.

use qb_protocol::{Event, Op};
use tokio::sync::broadcast;
use tokio::sync::mpsc;

use crate::bridge::{HostHandle, HostRequest};
use crate::dispatch::DispatchError;

/// Capacity of the host event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Behavior knobs for the demo host loop.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// Refuse every submitted message. Useful for exercising the failure
    /// path from the UI.
    pub reject_all: bool,
}

/// Spawn the host loop on the current tokio runtime.
///
/// Returns the UI's [`HostHandle`] and the broadcast sender for host
/// events. Subscribe before triggering anything that emits; broadcast
/// channels do not replay.
pub fn spawn_host(config: HostConfig) -> (HostHandle, broadcast::Sender<Event>) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<HostRequest>();
    let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

    let events = events_tx.clone();
    tokio::spawn(async move {
        // The overlay starts visible, matching the UI's initial state.
        let mut visible = true;

        while let Some(request) = request_rx.recv().await {
            match request.op {
                Op::ProcessMessage { text } => {
                    let result = if config.reject_all {
                        tracing::warn!(%text, "rejecting message");
                        let _ = events.send(Event::ErrorReport {
                            message: "message processing is disabled".to_string(),
                        });
                        Err(DispatchError::Rejected)
                    } else {
                        tracing::info!(%text, "message accepted");
                        // A handled command dismisses the overlay; the next
                        // re-show toggle is what requests focus.
                        visible = false;
                        Ok(())
                    };

                    if let Some(reply) = request.reply {
                        let _ = reply.send(result);
                    }
                }
                Op::ToggleVisibility => {
                    visible = !visible;
                    tracing::debug!(visible, "visibility toggled");
                    if visible {
                        // Re-showing the overlay hands focus back to the
                        // input field.
                        let _ = events.send(Event::FocusRequest);
                    }
                }
                Op::Shutdown => {
                    tracing::info!("host loop shutting down");
                    break;
                }
            }
        }
    });

    (HostHandle::new(request_tx), events_tx)
}
