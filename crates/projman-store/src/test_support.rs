//! Shared fixtures for the store tests.

use tempfile::TempDir;

use crate::database::Database;
use crate::models::{FileType, NewFile, NewProject, NewProjectNode, NewUser, UserRole};

/// Open a fresh database in a temporary directory.  The directory guard
/// must be kept alive for the duration of the test.
pub(crate) fn open_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("test.db")).unwrap();
    (dir, db)
}

pub(crate) fn add_user(db: &Database, username: &str, role: UserRole) -> i64 {
    db.create_user(&NewUser {
        username: username.into(),
        password: "secret".into(),
        role,
    })
    .unwrap()
}

pub(crate) fn add_project(db: &mut Database, name: &str, manager_id: i64) -> i64 {
    db.create_project(&NewProject {
        name: name.into(),
        description: format!("{name} description"),
        manager_id,
        estimated_complete_time: None,
    })
    .unwrap()
}

pub(crate) fn add_node(db: &Database, project_id: i64, name: &str) -> i64 {
    db.create_node(&NewProjectNode {
        project_id,
        name: name.into(),
        description: String::new(),
        parent_id: None,
        estimated_completion_time: None,
    })
    .unwrap()
}

pub(crate) fn add_file(db: &Database, name: &str, uploader_id: i64) -> i64 {
    db.insert_file(&NewFile {
        file_name: name.into(),
        file_path: format!("/tmp/{name}.docx"),
        file_extension: "docx".into(),
        file_size: 512,
        uploader_id,
        file_type: FileType::Document,
        project_id: None,
        is_process_document: false,
    })
    .unwrap()
}
