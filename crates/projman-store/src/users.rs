//! CRUD operations for [`User`] records.

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{self, NewUser, User};

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new user account and return its assigned id.
    ///
    /// Fails with a constraint violation if the username is already taken.
    pub fn create_user(&self, user: &NewUser) -> Result<i64> {
        self.conn().execute(
            "INSERT INTO users (username, password, role, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.username,
                user.password,
                user.role.code(),
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a user by unique login name.
    pub fn user_by_name(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn()
            .query_row(
                "SELECT id, username, password, role, created_at
                 FROM users WHERE username = ?1",
                params![username],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Fetch a user by id.
    pub fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = self
            .conn()
            .query_row(
                "SELECT id, username, password, role, created_at
                 FROM users WHERE id = ?1",
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// List every user account, oldest first.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, username, password, role, created_at
             FROM users
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], row_to_user)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Overwrite the mutable fields of a user.  Returns `true` if a row
    /// was updated.
    pub fn update_user(&self, user: &User) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE users SET username = ?1, password = ?2, role = ?3 WHERE id = ?4",
            params![user.username, user.password, user.role.code(), user.id],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a user by id.  Returns `true` if a row was deleted.
    ///
    /// Administrator rows (role 0) are left untouched; the same rule is
    /// enforced again by the authorization layer above.  Files uploaded by
    /// the user go with it (cascade).
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM users WHERE id = ?1 AND role != 0",
            params![id],
        )?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`User`].
fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let username: String = row.get(1)?;
    let password: String = row.get(2)?;
    let role_code: i64 = row.get(3)?;
    let created_str: String = row.get(4)?;

    Ok(User {
        id,
        username,
        password,
        role: models::role_column(3, role_code)?,
        created_at: models::datetime_column(4, created_str)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::models::UserRole;
    use crate::test_support::{add_user, open_db};

    #[test]
    fn duplicate_username_is_rejected() {
        let (_dir, db) = open_db();

        let first = add_user(&db, "alice", UserRole::NormalUser);

        let err = db.create_user(&crate::models::NewUser {
            username: "alice".into(),
            password: "other".into(),
            role: UserRole::ProjectManager,
        });
        assert!(err.is_err());

        // The original row is unchanged.
        let alice = db.user_by_name("alice").unwrap().unwrap();
        assert_eq!(alice.id, first);
        assert_eq!(alice.password, "secret");
        assert_eq!(alice.role, UserRole::NormalUser);
    }

    #[test]
    fn administrator_rows_survive_delete() {
        let (_dir, db) = open_db();

        let admin = db.user_by_name("admin").unwrap().unwrap();
        assert!(!db.delete_user(admin.id).unwrap());
        assert!(db.user_by_id(admin.id).unwrap().is_some());

        let normal = add_user(&db, "carol", UserRole::NormalUser);
        assert!(db.delete_user(normal).unwrap());
        assert!(db.user_by_id(normal).unwrap().is_none());
    }

    #[test]
    fn lookup_miss_is_none() {
        let (_dir, db) = open_db();
        assert!(db.user_by_name("nobody").unwrap().is_none());
        assert!(db.user_by_id(9999).unwrap().is_none());
    }

    #[test]
    fn update_overwrites_mutable_fields() {
        let (_dir, db) = open_db();

        let id = add_user(&db, "dave", UserRole::NormalUser);
        let mut dave = db.user_by_id(id).unwrap().unwrap();
        dave.password = "changed".into();
        dave.role = UserRole::ProjectManager;

        assert!(db.update_user(&dave).unwrap());

        let reloaded = db.user_by_id(id).unwrap().unwrap();
        assert_eq!(reloaded.password, "changed");
        assert_eq!(reloaded.role, UserRole::ProjectManager);

        dave.id = 4242;
        assert!(!db.update_user(&dave).unwrap());
    }
}
