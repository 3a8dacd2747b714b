//! Channel-backed implementation of the collaborator traits.
//!
//! [`HostHandle`] is the UI's end of the host channel. Requests travel as
//! [`HostRequest`] envelopes: the protocol-level [`Op`] plus an optional
//! oneshot reply slot. `Op` itself stays pure data, so the same protocol
//! can later cross a real wire; the reply slot is what gives
//! `process_message` its resolve/reject semantics in-process.

use async_trait::async_trait;
use qb_protocol::Op;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

use crate::dispatch::{DispatchError, DispatchResult, MessageDispatcher, WindowControl};

/// One request to the host: an operation, and a reply slot for the
/// operations that resolve.
#[derive(Debug)]
pub struct HostRequest {
    /// The protocol operation to perform.
    pub op: Op,
    /// Where to send the outcome, for operations that have one.
    pub reply: Option<oneshot::Sender<DispatchResult>>,
}

impl HostRequest {
    /// A fire-and-forget request.
    pub fn notify(op: Op) -> Self {
        Self { op, reply: None }
    }
}

/// The UI's handle to the host process.
///
/// Cloneable; clones share the same underlying channel.
#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: UnboundedSender<HostRequest>,
}

impl HostHandle {
    /// Create a handle over an existing request channel.
    pub fn new(tx: UnboundedSender<HostRequest>) -> Self {
        Self { tx }
    }

    /// Ask the host loop to stop. Fire-and-forget.
    pub fn shutdown(&self) {
        let _ = self.tx.send(HostRequest::notify(Op::Shutdown));
    }
}

#[async_trait]
impl MessageDispatcher for HostHandle {
    async fn process_message(&self, text: &str) -> DispatchResult {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = HostRequest {
            op: Op::ProcessMessage {
                text: text.to_string(),
            },
            reply: Some(reply_tx),
        };

        self.tx
            .send(request)
            .map_err(|_| DispatchError::HostUnavailable)?;

        // A dropped reply sender means the host died mid-request.
        reply_rx.await.map_err(|_| DispatchError::HostUnavailable)?
    }
}

impl WindowControl for HostHandle {
    fn toggle_visibility(&self) {
        let _ = self.tx.send(HostRequest::notify(Op::ToggleVisibility));
    }
}
