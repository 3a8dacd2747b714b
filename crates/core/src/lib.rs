//! # qb-core
//!
//! Host-facing collaborators for the quickbar overlay.
//!
//! The overlay UI never talks to the host directly. It goes through two
//! narrow seams defined here:
//!
//! - [`dispatch::MessageDispatcher`]: asynchronous command dispatch
//! - [`dispatch::WindowControl`]: fire-and-forget visibility toggling
//!
//! [`bridge::HostHandle`] implements both over an in-process channel, and
//! [`host::spawn_host`] runs a minimal host loop on the other end so the
//! binary and the integration tests have a live peer. Real command handling
//! belongs to an actual host process, not to this crate.

pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod host;

pub use bridge::HostHandle;
pub use config::{load_config, Config, ConfigError};
pub use dispatch::{DispatchError, DispatchResult, MessageDispatcher, WindowControl};
pub use host::{spawn_host, HostConfig};
