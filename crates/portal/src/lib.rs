//! `medportal-portal`
//!
//! **Responsibility:** composition root of the hospital portal front end.
//!
//! This crate provides:
//! - Portal configuration (session keys, storage area, logging)
//! - [`PortalShell`], which wires the session core to storage, navigation and notices
//! - The Leptos frontend (wasm32 only)

pub mod config;
pub mod shell;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use config::{PortalConfig, StorageArea};
pub use shell::PortalShell;

/// Install process-wide logging for native hosts.
///
/// The browser build installs a panic hook instead (see `frontend`).
pub fn init_logging(config: &PortalConfig) {
    medportal_observability::init_with(&config.log);
}
