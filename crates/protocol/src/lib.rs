//! # qb-protocol
//!
//! Shared protocol definitions for quickbar.
//!
//! This crate defines the message vocabulary exchanged between the overlay
//! UI and the host process:
//!
//! - [`ipc`]: Operations and Events for UI-host communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde
//! - Pure data: no channels, no handles, nothing runtime-specific, so the
//!   same types can cross a wire transport later without change

pub mod ipc;

pub use ipc::*;
