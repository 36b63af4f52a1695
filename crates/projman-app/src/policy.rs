//! Role-based authorization checks.
//!
//! Every role rule lives here, consulted by the services before any
//! mutating store call.  A failed check is reported to the caller as a
//! [`Denied`] and the store is never touched.  The repository itself
//! performs no authorization (with one exception: administrator rows are
//! also shielded at the SQL level).

use thiserror::Error;

use projman_store::{Project, User, UserRole};

/// A rejected operation, carrying the reason shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Denied(pub String);

fn denied<T>(reason: &str) -> Result<T, Denied> {
    Err(Denied(reason.to_string()))
}

fn is_admin(user: &User) -> bool {
    user.role == UserRole::Administrator
}

/// Administrator, or the project manager who owns this specific project.
fn owns_or_admin(actor: &User, project: &Project) -> bool {
    is_admin(actor)
        || (actor.role == UserRole::ProjectManager && project.manager_id == actor.id)
}

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// Only an administrator may add user accounts.
pub fn ensure_can_create_user(actor: &User) -> Result<(), Denied> {
    if is_admin(actor) {
        Ok(())
    } else {
        denied("only an administrator can add user accounts")
    }
}

/// Only an administrator may edit accounts, and never their own through
/// this interface.
pub fn ensure_can_update_user(actor: &User, target: &User) -> Result<(), Denied> {
    if !is_admin(actor) {
        return denied("only an administrator can edit user accounts");
    }
    if actor.id == target.id {
        return denied("the signed-in account cannot be edited here");
    }
    Ok(())
}

/// Only an administrator may delete accounts; administrator accounts are
/// never deletable, which also covers self-deletion by an administrator.
pub fn ensure_can_delete_user(actor: &User, target: &User) -> Result<(), Denied> {
    if !is_admin(actor) {
        return denied("only an administrator can delete user accounts");
    }
    if target.role == UserRole::Administrator {
        return denied("administrator accounts cannot be deleted");
    }
    if actor.id == target.id {
        return denied("the signed-in account cannot delete itself");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Administrators and project managers may create projects.
pub fn ensure_can_create_project(actor: &User) -> Result<(), Denied> {
    match actor.role {
        UserRole::Administrator | UserRole::ProjectManager => Ok(()),
        UserRole::NormalUser => denied("normal users cannot create projects"),
    }
}

/// An administrator may edit any project; a project manager only their own.
pub fn ensure_can_update_project(actor: &User, project: &Project) -> Result<(), Denied> {
    if owns_or_admin(actor, project) {
        Ok(())
    } else {
        denied("only the managing user or an administrator can edit this project")
    }
}

/// Only an administrator may delete projects.
pub fn ensure_can_delete_project(actor: &User) -> Result<(), Denied> {
    if is_admin(actor) {
        Ok(())
    } else {
        denied("only an administrator can delete projects")
    }
}

// ---------------------------------------------------------------------------
// Nodes and membership
// ---------------------------------------------------------------------------

/// Node changes are reserved to the administrator or the owning manager.
pub fn ensure_can_manage_nodes(actor: &User, project: &Project) -> Result<(), Denied> {
    if owns_or_admin(actor, project) {
        Ok(())
    } else {
        denied("only the managing user or an administrator can change project nodes")
    }
}

/// Membership assignment follows the same ownership rule as nodes.
pub fn ensure_can_assign_members(actor: &User, project: &Project) -> Result<(), Denied> {
    if owns_or_admin(actor, project) {
        Ok(())
    } else {
        denied("only the managing user or an administrator can assign project members")
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Any signed-in role may attach documents.
pub fn ensure_can_attach_documents(_actor: &User) -> Result<(), Denied> {
    Ok(())
}

/// Removing documents from a node is reserved to the administrator or the
/// owning manager.
pub fn ensure_can_remove_documents(actor: &User, project: &Project) -> Result<(), Denied> {
    if owns_or_admin(actor, project) {
        Ok(())
    } else {
        denied("only the managing user or an administrator can remove node documents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user-{id}"),
            password: "pw".into(),
            role,
            created_at: Utc::now(),
        }
    }

    fn project(id: i64, manager_id: i64) -> Project {
        Project {
            id,
            name: format!("project-{id}"),
            description: String::new(),
            manager_id,
            manager_name: format!("user-{manager_id}"),
            create_time: Utc::now(),
            estimated_complete_time: None,
            is_completed: false,
        }
    }

    #[test]
    fn user_management_is_admin_only() {
        let admin = user(1, UserRole::Administrator);
        let manager = user(2, UserRole::ProjectManager);
        let normal = user(3, UserRole::NormalUser);

        assert!(ensure_can_create_user(&admin).is_ok());
        assert!(ensure_can_create_user(&manager).is_err());
        assert!(ensure_can_create_user(&normal).is_err());

        assert!(ensure_can_update_user(&admin, &normal).is_ok());
        assert!(ensure_can_update_user(&manager, &normal).is_err());
    }

    #[test]
    fn accounts_are_shielded_from_self_service() {
        let admin = user(1, UserRole::Administrator);

        assert!(ensure_can_update_user(&admin, &admin).is_err());
        assert!(ensure_can_delete_user(&admin, &admin).is_err());
    }

    #[test]
    fn administrator_accounts_are_never_deletable() {
        let admin = user(1, UserRole::Administrator);
        let other_admin = user(2, UserRole::Administrator);
        let normal = user(3, UserRole::NormalUser);

        assert!(ensure_can_delete_user(&admin, &other_admin).is_err());
        assert!(ensure_can_delete_user(&admin, &normal).is_ok());
    }

    #[test]
    fn project_creation_excludes_normal_users() {
        assert!(ensure_can_create_project(&user(1, UserRole::Administrator)).is_ok());
        assert!(ensure_can_create_project(&user(2, UserRole::ProjectManager)).is_ok());
        assert!(ensure_can_create_project(&user(3, UserRole::NormalUser)).is_err());
    }

    #[test]
    fn project_edit_requires_ownership_for_managers() {
        let admin = user(1, UserRole::Administrator);
        let owner = user(2, UserRole::ProjectManager);
        let other = user(3, UserRole::ProjectManager);
        let p = project(10, owner.id);

        assert!(ensure_can_update_project(&admin, &p).is_ok());
        assert!(ensure_can_update_project(&owner, &p).is_ok());
        assert!(ensure_can_update_project(&other, &p).is_err());
    }

    #[test]
    fn project_deletion_is_admin_only() {
        let owner = user(2, UserRole::ProjectManager);

        assert!(ensure_can_delete_project(&user(1, UserRole::Administrator)).is_ok());
        assert!(ensure_can_delete_project(&owner).is_err());
    }

    #[test]
    fn node_and_member_rules_follow_ownership() {
        let admin = user(1, UserRole::Administrator);
        let owner = user(2, UserRole::ProjectManager);
        let other = user(3, UserRole::ProjectManager);
        let normal = user(4, UserRole::NormalUser);
        let p = project(10, owner.id);

        for check in [ensure_can_manage_nodes, ensure_can_assign_members] {
            assert!(check(&admin, &p).is_ok());
            assert!(check(&owner, &p).is_ok());
            assert!(check(&other, &p).is_err());
            assert!(check(&normal, &p).is_err());
        }
    }

    #[test]
    fn document_rules() {
        let admin = user(1, UserRole::Administrator);
        let owner = user(2, UserRole::ProjectManager);
        let normal = user(4, UserRole::NormalUser);
        let p = project(10, owner.id);

        assert!(ensure_can_attach_documents(&normal).is_ok());
        assert!(ensure_can_remove_documents(&owner, &p).is_ok());
        assert!(ensure_can_remove_documents(&normal, &p).is_err());
    }
}
