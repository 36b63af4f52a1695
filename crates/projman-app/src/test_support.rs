//! Shared fixtures for the application-core tests.

use tempfile::TempDir;

use projman_store::{
    Database, FileType, NewFile, NewProject, NewProjectNode, NewUser, User, UserRole,
};

/// Open a fresh database in a temporary directory.  The directory guard
/// must be kept alive for the duration of the test.
pub(crate) fn open_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("test.db")).unwrap();
    (dir, db)
}

/// The administrator account seeded at open.
pub(crate) fn admin(db: &Database) -> User {
    db.user_by_name(projman_store::database::DEFAULT_ADMIN_USERNAME)
        .unwrap()
        .unwrap()
}

pub(crate) fn make_user(db: &Database, username: &str, role: UserRole) -> User {
    let id = db
        .create_user(&NewUser {
            username: username.into(),
            password: "secret".into(),
            role,
        })
        .unwrap();
    db.user_by_id(id).unwrap().unwrap()
}

pub(crate) fn make_project(db: &mut Database, name: &str, manager_id: i64) -> i64 {
    db.create_project(&NewProject {
        name: name.into(),
        description: String::new(),
        manager_id,
        estimated_complete_time: None,
    })
    .unwrap()
}

pub(crate) fn make_node(db: &Database, project_id: i64, name: &str) -> i64 {
    db.create_node(&NewProjectNode {
        project_id,
        name: name.into(),
        description: String::new(),
        parent_id: None,
        estimated_completion_time: None,
    })
    .unwrap()
}

pub(crate) fn make_file(
    db: &Database,
    name: &str,
    uploader_id: i64,
    is_process_document: bool,
) -> i64 {
    db.insert_file(&NewFile {
        file_name: name.into(),
        file_path: format!("/tmp/{name}.docx"),
        file_extension: "docx".into(),
        file_size: 512,
        uploader_id,
        file_type: FileType::Document,
        project_id: None,
        is_process_document,
    })
    .unwrap()
}
