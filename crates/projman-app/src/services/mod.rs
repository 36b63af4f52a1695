//! Policy-gated application services.
//!
//! One module per management area.  Every mutating service resolves the
//! context it needs (typically the owning project), runs the authorization
//! check, and only then issues the store call; a denial never reaches the
//! store.  Read-only listings are ungated and go straight to the store.

pub mod documents;
pub mod nodes;
pub mod projects;
pub mod users;
