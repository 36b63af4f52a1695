//! Composition root owning the store handle and the login session.

use projman_store::Database;

use crate::config::AppConfig;
use crate::error::Result;
use crate::session::Session;

/// Central application state.
///
/// Owned by the embedding application (the GUI shell) for its whole
/// lifetime; every service call borrows the store handle from here.
/// Dropping the state closes the database.
pub struct AppState {
    /// Handle to the SQLite database.
    pub db: Database,

    /// The login session; nobody is signed in after initialization.
    pub session: Session,
}

impl AppState {
    /// Open the store at the configured path.
    ///
    /// Fails if the database cannot be opened or its schema cannot be
    /// created; no partially initialised state is ever returned.
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let db = Database::open_at(&config.database_path)?;
        Ok(Self {
            db,
            session: Session::new(),
        })
    }
}
