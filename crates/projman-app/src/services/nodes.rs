//! Project node (work breakdown) management.

use projman_store::{Database, NewProjectNode, ProjectNode, User};

use crate::error::{AppError, Result};
use crate::policy;

/// Add a node to a project and return its id.
pub fn create_node(db: &Database, actor: &User, node: &NewProjectNode) -> Result<i64> {
    let project = db.project_by_id(node.project_id)?.ok_or(AppError::NotFound {
        what: "project",
        id: node.project_id,
    })?;
    policy::ensure_can_manage_nodes(actor, &project)?;

    if let Some(parent_id) = node.parent_id {
        let parent = db.node_by_id(parent_id)?.ok_or(AppError::NotFound {
            what: "project node",
            id: parent_id,
        })?;
        if parent.project_id != node.project_id {
            return Err(AppError::InvalidInput(
                "parent node belongs to a different project".into(),
            ));
        }
    }

    let id = db.create_node(node)?;
    tracing::info!(actor = %actor.username, project_id = node.project_id, node = %node.name, id, "node created");
    Ok(id)
}

/// Overwrite an existing node's fields.
pub fn update_node(db: &Database, actor: &User, node: &ProjectNode) -> Result<()> {
    let existing = db.node_by_id(node.id)?.ok_or(AppError::NotFound {
        what: "project node",
        id: node.id,
    })?;
    let project = db.project_by_id(existing.project_id)?.ok_or(AppError::NotFound {
        what: "project",
        id: existing.project_id,
    })?;
    policy::ensure_can_manage_nodes(actor, &project)?;

    db.update_node(node)?;
    Ok(())
}

/// Delete a node; child nodes and attachment rows cascade away with it.
pub fn delete_node(db: &Database, actor: &User, node_id: i64) -> Result<()> {
    let node = db.node_by_id(node_id)?.ok_or(AppError::NotFound {
        what: "project node",
        id: node_id,
    })?;
    let project = db.project_by_id(node.project_id)?.ok_or(AppError::NotFound {
        what: "project",
        id: node.project_id,
    })?;
    policy::ensure_can_manage_nodes(actor, &project)?;

    db.delete_node(node_id)?;
    tracing::info!(actor = %actor.username, node_id, "node deleted");
    Ok(())
}
