//! # projman-app
//!
//! Application core for the projman desktop client: configuration, the
//! login session, the role-based authorization policy, and the
//! policy-gated services the UI layer calls.  Rendering, dialogs and file
//! pickers live in the (external) GUI shell; nothing here depends on a
//! toolkit.
//!
//! The store handle is owned by [`AppState`], constructed once at startup
//! and passed by reference into every service call.

pub mod config;
pub mod error;
pub mod merge;
pub mod policy;
pub mod services;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use session::Session;
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise tracing for the embedding application.
///
/// Respects `RUST_LOG`; without it, application crates log at debug and
/// everything else at warn.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("projman_app=debug,projman_store=info,warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
