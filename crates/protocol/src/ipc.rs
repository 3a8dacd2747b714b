//! Inter-process communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between the overlay UI and the host process.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: requests sent from the UI to the host
//! - `Event`: signals pushed from the host to the UI
//!
//! Communication is asynchronous and channel-based. The host may push
//! events at any time, in any interleaving with user actions; the UI must
//! tolerate an event arriving mid-keystroke or mid-submission.

use serde::{Deserialize, Serialize};

/// Operations sent from the overlay UI to the host.
///
/// Uses tagged enum serialization so a non-Rust host can speak the same
/// protocol:
/// ```json
/// {
///   "type": "processMessage",
///   "payload": { "text": "buy milk tomorrow" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Hand a submitted command line to the host for processing.
    ///
    /// The text is already trimmed; the UI never submits an empty string.
    ProcessMessage {
        /// The command text to process.
        text: String,
    },

    /// Ask the host to hide or show the overlay window.
    ///
    /// Fire-and-forget; the UI consumes no reply.
    ToggleVisibility,

    /// Shut down the host loop gracefully.
    Shutdown,
}

/// Events pushed from the host to the overlay UI.
///
/// Uses the same tagged representation as [`Op`]:
/// ```json
/// {
///   "type": "errorReport",
///   "payload": { "message": "disk full" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// The input surface should regain keyboard focus and drop any stale
    /// status message.
    FocusRequest,

    /// The host reports an error the user should see.
    ///
    /// The message is shown verbatim; the host is trusted to produce
    /// user-safe text.
    ErrorReport {
        /// Human-readable error detail.
        message: String,
    },
}
