//! User account management.

use projman_store::{Database, NewUser, User};

use crate::error::{AppError, Result};
use crate::policy;

/// Add a user account and return its id.
pub fn create_user(db: &Database, actor: &User, new_user: &NewUser) -> Result<i64> {
    policy::ensure_can_create_user(actor)?;

    if new_user.username.trim().is_empty() {
        return Err(AppError::InvalidInput("username must not be empty".into()));
    }

    let id = db.create_user(new_user)?;
    tracing::info!(actor = %actor.username, username = %new_user.username, id, "user account created");
    Ok(id)
}

/// Overwrite an existing account's fields.
pub fn update_user(db: &Database, actor: &User, user: &User) -> Result<()> {
    let target = db.user_by_id(user.id)?.ok_or(AppError::NotFound {
        what: "user",
        id: user.id,
    })?;
    policy::ensure_can_update_user(actor, &target)?;

    db.update_user(user)?;
    tracing::info!(actor = %actor.username, username = %user.username, "user account updated");
    Ok(())
}

/// Delete an account.  Administrator accounts are rejected by policy and,
/// independently, by the store itself.
pub fn delete_user(db: &Database, actor: &User, user_id: i64) -> Result<()> {
    let target = db.user_by_id(user_id)?.ok_or(AppError::NotFound {
        what: "user",
        id: user_id,
    })?;
    policy::ensure_can_delete_user(actor, &target)?;

    if !db.delete_user(user_id)? {
        return Err(AppError::NotFound {
            what: "user",
            id: user_id,
        });
    }
    tracing::info!(actor = %actor.username, username = %target.username, "user account deleted");
    Ok(())
}
