//! Login session tracking.
//!
//! A [`Session`] remembers the authenticated user for the lifetime of the
//! UI session.  Credentials are validated against the store; the two
//! failure cases are distinguished so the login dialog can tell the user
//! which part was wrong.

use thiserror::Error;

use projman_store::{Database, StoreError, User};

/// Why a login attempt was rejected.
#[derive(Debug, Error)]
pub enum LoginError {
    /// No account with the given username exists.
    #[error("unknown username")]
    UnknownUser,

    /// The account exists but the password does not match.
    #[error("incorrect password")]
    WrongPassword,

    /// The store could not be queried.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Tracks the signed-in user.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    /// Create a session with nobody signed in.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Validate credentials against the store and remember the user.
    ///
    /// Passwords are compared exactly as stored.
    pub fn login(
        &mut self,
        db: &Database,
        username: &str,
        password: &str,
    ) -> Result<&User, LoginError> {
        let user = db
            .user_by_name(username)?
            .ok_or(LoginError::UnknownUser)?;

        if user.password != password {
            return Err(LoginError::WrongPassword);
        }

        tracing::info!(username = %user.username, role = ?user.role, "user signed in");
        Ok(self.current.insert(user))
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Forget the signed-in user.
    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!(username = %user.username, "user signed out");
        }
    }
}
