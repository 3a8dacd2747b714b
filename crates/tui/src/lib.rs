//! # qb-tui
//!
//! Spotlight-style command overlay: a single-line input field that captures
//! one line of user text, forwards it to the host for processing, clears
//! itself on success, and surfaces warnings and errors inline.
//!
//! The behavioral core lives in four places:
//!
//! - [`state`]: the input value and status message, the only mutable state
//! - [`input`]: mapping raw key events to submit / cancel / edit actions
//! - [`submit`]: validation, dispatch, and outcome application
//! - [`app`]: the event loop binding keystrokes and host events together
//!
//! Everything else ([`tui`], [`widgets`]) is presentation plumbing.

pub mod app;
pub mod input;
pub mod state;
pub mod submit;
pub mod tui;
pub mod widgets;

pub use app::{run_app, App};
pub use tui::Tui;
