//! # projman-store
//!
//! Relational storage for the projman application, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a single
//! `rusqlite::Connection` and provides typed CRUD helpers for every domain
//! model, plus the maintainers for the three association tables
//! (`project_user`, `project_file`, `node_file`).  The schema is created on
//! first open and evolved through versioned migrations; referential
//! integrity (cascades, set-null on project removal) is enforced by the
//! store itself.

pub mod attachments;
pub mod database;
pub mod files;
pub mod members;
pub mod migrations;
pub mod models;
pub mod nodes;
pub mod projects;
pub mod users;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use models::*;

#[cfg(test)]
pub(crate) mod test_support;
