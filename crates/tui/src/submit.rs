//! The submission pipeline: validate, dispatch, apply the outcome.
//!
//! Dispatch is spawned, not awaited in place, so the event loop keeps
//! handling keys and host events while a submission is in flight. Each
//! outcome comes back through a channel and is applied on the loop's turn.
//!
//! Overlapping submissions are deliberately not guarded: each Enter press
//! with a non-empty field spawns an independent dispatch, and if several
//! are in flight their outcomes apply in completion order, last write
//! winning on value and status.

use std::sync::Arc;

use qb_core::{DispatchResult, MessageDispatcher};
use tokio::sync::mpsc::UnboundedSender;

use crate::state::{InputState, StatusMessage, DISPATCH_FAILURE_MESSAGE, EMPTY_INPUT_WARNING};

/// The result of one dispatched submission.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub result: DispatchResult,
}

/// Run the submission pipeline over the current input value.
///
/// Empty-after-trim input is a local, synchronous failure: the warning is
/// set and nothing is sent anywhere. Otherwise the trimmed text is handed
/// to the dispatcher on a spawned task and its outcome is forwarded to
/// `outcome_tx`.
pub fn submit(
    state: &mut InputState,
    dispatcher: &Arc<dyn MessageDispatcher>,
    outcome_tx: &UnboundedSender<SubmissionOutcome>,
) {
    let trimmed = state.value().trim();
    if trimmed.is_empty() {
        state.set_status(StatusMessage::warning(EMPTY_INPUT_WARNING));
        return;
    }

    let text = trimmed.to_string();
    let dispatcher = Arc::clone(dispatcher);
    let outcome_tx = outcome_tx.clone();
    tokio::spawn(async move {
        let result = dispatcher.process_message(&text).await;
        let _ = outcome_tx.send(SubmissionOutcome { result });
    });
}

/// Apply a completed submission to the input state.
///
/// Success clears the field and says nothing: it neither sets nor clears a
/// status message. Failure sets the generic failure message and leaves the
/// field as typed so the user can edit and retry.
pub fn apply_outcome(state: &mut InputState, outcome: SubmissionOutcome) {
    match outcome.result {
        Ok(()) => state.clear_value(),
        Err(error) => {
            tracing::warn!(%error, "message dispatch failed");
            state.set_status(StatusMessage::error(DISPATCH_FAILURE_MESSAGE));
        }
    }
}
