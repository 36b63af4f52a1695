//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! that migrations have run and a default administrator exists before any
//! other operation.  The whole application shares one handle for its whole
//! lifetime; dropping it closes the connection.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::migrations;
use crate::models::UserRole;

/// File name used when no explicit path is configured.
pub const DEFAULT_DB_FILE: &str = "projman.db";

/// Login name of the administrator account seeded on first run.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Initial password of the seeded administrator; expected to be changed
/// out-of-band.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database next to the running application,
    /// i.e. `projman.db` in the current working directory.
    pub fn open_default() -> Result<Self> {
        let path = std::env::current_dir()?.join(DEFAULT_DB_FILE);
        Self::open_at(&path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// Sets the recommended pragmas, runs schema migrations, and seeds the
    /// default administrator account if none exists.  Any failure here is
    /// fatal: the handle is only returned once the schema is fully usable.
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        tracing::info!(path = %path.display(), "opening database");

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run_migrations(&conn)?;

        let db = Self { conn };
        db.seed_default_admin()?;
        Ok(db)
    }

    /// Insert the default administrator if no account holds that role.
    ///
    /// Runs on every open so a database whose administrator was removed by
    /// external tooling is repaired rather than left unmanageable.
    fn seed_default_admin(&self) -> Result<()> {
        let admins: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM users WHERE role = ?1",
            params![UserRole::Administrator.code()],
            |row| row.get(0),
        )?;

        if admins == 0 {
            tracing::info!(
                username = DEFAULT_ADMIN_USERNAME,
                "seeding default administrator account"
            );
            self.conn.execute(
                "INSERT INTO users (username, password, role, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    DEFAULT_ADMIN_USERNAME,
                    DEFAULT_ADMIN_PASSWORD,
                    UserRole::Administrator.code(),
                    chrono::Utc::now().to_rfc3339(),
                ],
            )?;
        }

        Ok(())
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed CRUD helpers, but direct access is
    /// occasionally needed for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return a mutable reference to the underlying connection, as needed
    /// for explicit transactions.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}
