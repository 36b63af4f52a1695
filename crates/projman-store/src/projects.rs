//! CRUD operations for [`Project`] records.

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{self, NewProject, Project};

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new project and return its assigned id.
    ///
    /// The manager is seeded as the project's first member in the same
    /// transaction: a project is never visible without its manager on the
    /// membership list.
    pub fn create_project(&mut self, project: &NewProject) -> Result<i64> {
        let tx = self.conn_mut().transaction()?;

        tx.execute(
            "INSERT INTO projects (name, description, manager_id, create_time,
                                   estimated_complete_time, is_completed)
             VALUES (?1, ?2, ?3, ?4, ?5, 0)",
            params![
                project.name,
                project.description,
                project.manager_id,
                chrono::Utc::now().to_rfc3339(),
                project.estimated_complete_time.map(|t| t.to_rfc3339()),
            ],
        )?;
        let project_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT OR IGNORE INTO project_user (project_id, user_id) VALUES (?1, ?2)",
            params![project_id, project.manager_id],
        )?;

        tx.commit()?;

        tracing::debug!(project_id, manager_id = project.manager_id, "project created");
        Ok(project_id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single project by id.
    pub fn project_by_id(&self, id: i64) -> Result<Option<Project>> {
        let project = self
            .conn()
            .query_row(
                "SELECT p.id, p.name, p.description, p.manager_id, u.username,
                        p.create_time, p.estimated_complete_time, p.is_completed
                 FROM projects p
                 JOIN users u ON p.manager_id = u.id
                 WHERE p.id = ?1",
                params![id],
                row_to_project,
            )
            .optional()?;
        Ok(project)
    }

    /// List every project, oldest first.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn().prepare(
            "SELECT p.id, p.name, p.description, p.manager_id, u.username,
                    p.create_time, p.estimated_complete_time, p.is_completed
             FROM projects p
             JOIN users u ON p.manager_id = u.id
             ORDER BY p.id ASC",
        )?;

        let rows = stmt.query_map([], row_to_project)?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(row?);
        }
        Ok(projects)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Overwrite the mutable fields of a project.  Returns `true` if a row
    /// was updated.
    pub fn update_project(&self, project: &Project) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE projects SET name = ?1, description = ?2, manager_id = ?3,
                                 estimated_complete_time = ?4, is_completed = ?5
             WHERE id = ?6",
            params![
                project.name,
                project.description,
                project.manager_id,
                project.estimated_complete_time.map(|t| t.to_rfc3339()),
                project.is_completed as i64,
                project.id,
            ],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a project by id.  Returns `true` if a row was deleted.
    ///
    /// Cascades to the project's nodes (and their attachments) and its
    /// membership/attachment rows; directly linked files only lose their
    /// `project_id`.
    pub fn delete_project(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`Project`].
fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let manager_id: i64 = row.get(3)?;
    let manager_name: String = row.get(4)?;
    let create_str: String = row.get(5)?;
    let estimate_str: Option<String> = row.get(6)?;
    let completed: i64 = row.get(7)?;

    Ok(Project {
        id,
        name,
        description: description.unwrap_or_default(),
        manager_id,
        manager_name,
        create_time: models::datetime_column(5, create_str)?,
        estimated_complete_time: models::opt_datetime_column(6, estimate_str)?,
        is_completed: completed != 0,
    })
}
