//! Collaborator traits between the overlay UI and the host.
//!
//! The UI depends on these traits only, never on a concrete transport.
//! Anything that can carry a line of text to a host and flip a window can
//! stand in for the real thing, which is what the tests do.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a dispatch call can resolve to.
///
/// The UI deliberately does not rely on structured failure detail: any
/// rejection surfaces as the same generic user-facing message. The variants
/// exist for logging and for the host bridge's own bookkeeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The host received the message and refused it.
    #[error("the host rejected the message")]
    Rejected,

    /// The host is gone or never answered.
    #[error("the host is unavailable")]
    HostUnavailable,
}

/// Type alias for Result with DispatchError.
pub type DispatchResult = Result<(), DispatchError>;

/// Asynchronous command dispatch.
///
/// `process_message` resolves once the host has accepted or refused the
/// text. Calls are independent: a second call may be started before the
/// first resolves and neither is queued or merged.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Hand one line of command text to the host.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] if the host refuses the message or
    /// cannot be reached.
    async fn process_message(&self, text: &str) -> DispatchResult;
}

/// Fire-and-forget control over the overlay window.
pub trait WindowControl: Send + Sync {
    /// Ask the host to hide or show the overlay window. No reply is
    /// consumed; failures are the host's problem.
    fn toggle_visibility(&self);
}
