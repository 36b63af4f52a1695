//! Project management.

use projman_store::{Database, NewProject, Project, User};

use crate::error::{AppError, Result};
use crate::policy;

/// Create a project and return its id.
///
/// The manager is seeded as a member by the store; `member_ids` adds the
/// initially selected members on top.
pub fn create_project(
    db: &mut Database,
    actor: &User,
    project: &NewProject,
    member_ids: &[i64],
) -> Result<i64> {
    policy::ensure_can_create_project(actor)?;

    if project.name.trim().is_empty() {
        return Err(AppError::InvalidInput("project name must not be empty".into()));
    }

    let id = db.create_project(project)?;
    if !member_ids.is_empty() {
        db.assign_users_to_project(id, member_ids)?;
    }

    tracing::info!(actor = %actor.username, project = %project.name, id, "project created");
    Ok(id)
}

/// Overwrite an existing project's fields.
pub fn update_project(db: &Database, actor: &User, project: &Project) -> Result<()> {
    let existing = db.project_by_id(project.id)?.ok_or(AppError::NotFound {
        what: "project",
        id: project.id,
    })?;
    policy::ensure_can_update_project(actor, &existing)?;

    db.update_project(project)?;
    tracing::info!(actor = %actor.username, project = %project.name, "project updated");
    Ok(())
}

/// Delete a project, cascading to its nodes and attachment rows.
pub fn delete_project(db: &Database, actor: &User, project_id: i64) -> Result<()> {
    policy::ensure_can_delete_project(actor)?;

    if !db.delete_project(project_id)? {
        return Err(AppError::NotFound {
            what: "project",
            id: project_id,
        });
    }
    tracing::info!(actor = %actor.username, project_id, "project deleted");
    Ok(())
}

/// Add members to a project without touching the existing set.
pub fn add_members(
    db: &mut Database,
    actor: &User,
    project_id: i64,
    user_ids: &[i64],
) -> Result<()> {
    let project = db.project_by_id(project_id)?.ok_or(AppError::NotFound {
        what: "project",
        id: project_id,
    })?;
    policy::ensure_can_assign_members(actor, &project)?;

    db.assign_users_to_project(project_id, user_ids)?;
    Ok(())
}

/// Replace a project's membership with the given set.
///
/// The manager is always re-inserted: a project cannot lose its manager
/// through membership assignment.
pub fn replace_members(
    db: &mut Database,
    actor: &User,
    project_id: i64,
    user_ids: &[i64],
) -> Result<()> {
    let project = db.project_by_id(project_id)?.ok_or(AppError::NotFound {
        what: "project",
        id: project_id,
    })?;
    policy::ensure_can_assign_members(actor, &project)?;

    let mut members = user_ids.to_vec();
    if !members.contains(&project.manager_id) {
        members.push(project.manager_id);
    }

    db.replace_project_users(project_id, &members)?;
    tracing::info!(actor = %actor.username, project_id, members = members.len(), "project membership updated");
    Ok(())
}
