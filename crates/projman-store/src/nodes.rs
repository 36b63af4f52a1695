//! CRUD operations for [`ProjectNode`] records.

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{self, NewProjectNode, ProjectNode};

impl Database {
    /// Insert a new node and return its assigned id.
    pub fn create_node(&self, node: &NewProjectNode) -> Result<i64> {
        self.conn().execute(
            "INSERT INTO project_nodes (project_id, name, description, parent_id,
                                        create_time, estimated_completion_time, is_completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
            params![
                node.project_id,
                node.name,
                node.description,
                node.parent_id,
                chrono::Utc::now().to_rfc3339(),
                node.estimated_completion_time.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    /// Fetch a single node by id.
    pub fn node_by_id(&self, id: i64) -> Result<Option<ProjectNode>> {
        let node = self
            .conn()
            .query_row(
                "SELECT id, project_id, name, description, parent_id, create_time,
                        estimated_completion_time, is_completed
                 FROM project_nodes
                 WHERE id = ?1",
                params![id],
                row_to_node,
            )
            .optional()?;
        Ok(node)
    }

    /// List all nodes of a project (every nesting level), oldest first.
    pub fn nodes_by_project(&self, project_id: i64) -> Result<Vec<ProjectNode>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, project_id, name, description, parent_id, create_time,
                    estimated_completion_time, is_completed
             FROM project_nodes
             WHERE project_id = ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![project_id], row_to_node)?;

        let mut nodes = Vec::new();
        for row in rows {
            nodes.push(row?);
        }
        Ok(nodes)
    }

    /// Overwrite the mutable fields of a node.  Returns `true` if a row
    /// was updated.  The owning project is fixed at creation.
    pub fn update_node(&self, node: &ProjectNode) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE project_nodes SET name = ?1, description = ?2, parent_id = ?3,
                                      estimated_completion_time = ?4, is_completed = ?5
             WHERE id = ?6",
            params![
                node.name,
                node.description,
                node.parent_id,
                node.estimated_completion_time.map(|t| t.to_rfc3339()),
                node.is_completed as i64,
                node.id,
            ],
        )?;
        Ok(affected > 0)
    }

    /// Delete a node by id.  Returns `true` if a row was deleted.
    /// Child nodes and attachment rows cascade away with it.
    pub fn delete_node(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM project_nodes WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`ProjectNode`].
fn row_to_node(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectNode> {
    let id: i64 = row.get(0)?;
    let project_id: i64 = row.get(1)?;
    let name: String = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let parent_id: Option<i64> = row.get(4)?;
    let create_str: String = row.get(5)?;
    let estimate_str: Option<String> = row.get(6)?;
    let completed: i64 = row.get(7)?;

    Ok(ProjectNode {
        id,
        project_id,
        name,
        description: description.unwrap_or_default(),
        parent_id,
        create_time: models::datetime_column(5, create_str)?,
        estimated_completion_time: models::opt_datetime_column(6, estimate_str)?,
        is_completed: completed != 0,
    })
}
