//! Maintenance of the `project_user` association (project membership).
//!
//! Two write patterns exist: an add-only assignment that silently skips
//! pairs already present, and a full replacement that swaps the entire
//! membership set.  Both run inside one transaction so a failing id rolls
//! back the whole batch.

use rusqlite::params;

use crate::database::Database;
use crate::error::Result;
use crate::models::{self, User};

impl Database {
    /// List the members of a project.
    pub fn project_users(&self, project_id: i64) -> Result<Vec<User>> {
        let mut stmt = self.conn().prepare(
            "SELECT u.id, u.username, u.password, u.role, u.created_at
             FROM users u
             JOIN project_user pu ON u.id = pu.user_id
             WHERE pu.project_id = ?1
             ORDER BY u.id ASC",
        )?;

        let rows = stmt.query_map(params![project_id], |row| {
            let role_code: i64 = row.get(3)?;
            let created_str: String = row.get(4)?;
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                role: models::role_column(3, role_code)?,
                created_at: models::datetime_column(4, created_str)?,
            })
        })?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// Add users to a project's membership.  Pairs that already exist are
    /// skipped via the unique constraint; an invalid id fails the whole
    /// batch.
    pub fn assign_users_to_project(&mut self, project_id: i64, user_ids: &[i64]) -> Result<()> {
        let tx = self.conn_mut().transaction()?;

        for &user_id in user_ids {
            tx.execute(
                "INSERT OR IGNORE INTO project_user (project_id, user_id) VALUES (?1, ?2)",
                params![project_id, user_id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Replace a project's entire membership set.
    ///
    /// All existing rows for the project are removed, then one row per
    /// given id is inserted.  Any failure leaves the prior set intact.
    pub fn replace_project_users(&mut self, project_id: i64, user_ids: &[i64]) -> Result<()> {
        let tx = self.conn_mut().transaction()?;

        tx.execute(
            "DELETE FROM project_user WHERE project_id = ?1",
            params![project_id],
        )?;

        for &user_id in user_ids {
            tx.execute(
                "INSERT INTO project_user (project_id, user_id) VALUES (?1, ?2)",
                params![project_id, user_id],
            )?;
        }

        tx.commit()?;

        tracing::debug!(project_id, members = user_ids.len(), "project membership replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::models::UserRole;
    use crate::test_support::{add_project, add_user, open_db};

    #[test]
    fn replace_swaps_the_whole_set() {
        let (_dir, mut db) = open_db();
        let bob = add_user(&db, "bob", UserRole::ProjectManager);
        let alice = add_user(&db, "alice", UserRole::NormalUser);
        let carol = add_user(&db, "carol", UserRole::NormalUser);
        let project = add_project(&mut db, "alpha", bob);

        db.replace_project_users(project, &[alice, carol]).unwrap();
        let ids: Vec<i64> = db
            .project_users(project)
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![alice, carol]);

        // Idempotent: replacing with the same set changes nothing.
        db.replace_project_users(project, &[alice, carol]).unwrap();
        assert_eq!(db.project_users(project).unwrap().len(), 2);

        // The empty set clears every membership, including the manager's.
        db.replace_project_users(project, &[]).unwrap();
        assert!(db.project_users(project).unwrap().is_empty());
    }

    #[test]
    fn assign_skips_existing_pairs() {
        let (_dir, mut db) = open_db();
        let bob = add_user(&db, "bob", UserRole::ProjectManager);
        let alice = add_user(&db, "alice", UserRole::NormalUser);
        let project = add_project(&mut db, "alpha", bob);

        // bob is already a member via project creation.
        db.assign_users_to_project(project, &[bob, alice]).unwrap();
        db.assign_users_to_project(project, &[alice]).unwrap();

        assert_eq!(db.project_users(project).unwrap().len(), 2);
    }

    #[test]
    fn failed_replace_rolls_back() {
        let (_dir, mut db) = open_db();
        let bob = add_user(&db, "bob", UserRole::ProjectManager);
        let alice = add_user(&db, "alice", UserRole::NormalUser);
        let project = add_project(&mut db, "alpha", bob);

        db.replace_project_users(project, &[bob, alice]).unwrap();

        // 4242 violates the user foreign key, so nothing may change.
        let result = db.replace_project_users(project, &[alice, 4242]);
        assert!(result.is_err());

        let ids: Vec<i64> = db
            .project_users(project)
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![bob, alice]);
    }

    #[test]
    fn failed_assign_rolls_back() {
        let (_dir, mut db) = open_db();
        let bob = add_user(&db, "bob", UserRole::ProjectManager);
        let alice = add_user(&db, "alice", UserRole::NormalUser);
        let project = add_project(&mut db, "alpha", bob);

        let result = db.assign_users_to_project(project, &[alice, 4242]);
        assert!(result.is_err());

        // Only the manager from project creation remains.
        let ids: Vec<i64> = db
            .project_users(project)
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![bob]);
    }
}
