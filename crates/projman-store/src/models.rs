//! Domain model structs persisted in the projman database.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to the UI layer over IPC.  Enums are stored as small integers;
//! the codes match the column CHECK constraints in the schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Administrator,
    ProjectManager,
    NormalUser,
}

impl UserRole {
    /// Integer code stored in the `users.role` column.
    pub fn code(self) -> i64 {
        match self {
            UserRole::Administrator => 0,
            UserRole::ProjectManager => 1,
            UserRole::NormalUser => 2,
        }
    }

    /// Decode a `users.role` column value.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(UserRole::Administrator),
            1 => Some(UserRole::ProjectManager),
            2 => Some(UserRole::NormalUser),
            _ => None,
        }
    }
}

/// Broad classification of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    Document,
    Other,
}

impl FileType {
    pub fn code(self) -> i64 {
        match self {
            FileType::Document => 0,
            FileType::Other => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(FileType::Document),
            1 => Some(FileType::Other),
            _ => None,
        }
    }

    /// Classify a file by its (lowercased) extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "doc" | "docx" => FileType::Document,
            _ => FileType::Other,
        }
    }
}

/// Lifecycle state of a file record.
///
/// `Deleted` files sit in the recycle bin and can be restored; a permanent
/// delete removes the row entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Normal,
    Deleted,
    Archived,
}

impl FileStatus {
    pub fn code(self) -> i64 {
        match self {
            FileStatus::Normal => 0,
            FileStatus::Deleted => 1,
            FileStatus::Archived => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(FileStatus::Normal),
            1 => Some(FileStatus::Deleted),
            2 => Some(FileStatus::Archived),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Stored credential, compared verbatim at login.
    pub password: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a user; the id and creation time are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A project with an owning manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// The managing user; every project has exactly one.
    pub manager_id: i64,
    /// Login name of the manager, resolved by JOIN for display.
    pub manager_name: String,
    pub create_time: DateTime<Utc>,
    pub estimated_complete_time: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub manager_id: i64,
    pub estimated_complete_time: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// ProjectNode
// ---------------------------------------------------------------------------

/// A unit of a project's work breakdown, optionally nested under another
/// node of the same project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectNode {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: String,
    /// `None` for top-level nodes.
    pub parent_id: Option<i64>,
    pub create_time: DateTime<Utc>,
    pub estimated_completion_time: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProjectNode {
    pub project_id: i64,
    pub name: String,
    pub description: String,
    pub parent_id: Option<i64>,
    pub estimated_completion_time: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// FileInfo
// ---------------------------------------------------------------------------

/// Metadata for an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    pub id: i64,
    pub file_name: String,
    /// Absolute path of the stored copy on disk.
    pub file_path: String,
    pub file_extension: String,
    pub file_size: i64,
    pub uploader_id: i64,
    /// Login name of the uploader, resolved by JOIN for display.
    pub uploader_name: String,
    pub upload_time: DateTime<Utc>,
    pub file_type: FileType,
    pub status: FileStatus,
    /// Direct project link; cleared (not cascaded) when the project goes away.
    pub project_id: Option<i64>,
    /// Interim/working document rather than a deliverable.
    pub is_process_document: bool,
}

/// Fields supplied when registering an upload; new files always start in
/// [`FileStatus::Normal`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFile {
    pub file_name: String,
    pub file_path: String,
    pub file_extension: String,
    pub file_size: i64,
    pub uploader_id: i64,
    pub file_type: FileType,
    pub project_id: Option<i64>,
    pub is_process_document: bool,
}

// ---------------------------------------------------------------------------
// Column codecs shared by the row mappers
// ---------------------------------------------------------------------------

pub(crate) fn datetime_column(
    idx: usize,
    raw: String,
) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

pub(crate) fn opt_datetime_column(
    idx: usize,
    raw: Option<String>,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    raw.map(|s| datetime_column(idx, s)).transpose()
}

pub(crate) fn role_column(idx: usize, code: i64) -> rusqlite::Result<UserRole> {
    UserRole::from_code(code).ok_or_else(|| bad_code(idx, "role", code))
}

pub(crate) fn file_type_column(idx: usize, code: i64) -> rusqlite::Result<FileType> {
    FileType::from_code(code).ok_or_else(|| bad_code(idx, "file_type", code))
}

pub(crate) fn file_status_column(idx: usize, code: i64) -> rusqlite::Result<FileStatus> {
    FileStatus::from_code(code).ok_or_else(|| bad_code(idx, "status", code))
}

fn bad_code(idx: usize, column: &str, code: i64) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Integer,
        format!("invalid {column} code {code}").into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_round_trip() {
        for role in [
            UserRole::Administrator,
            UserRole::ProjectManager,
            UserRole::NormalUser,
        ] {
            assert_eq!(UserRole::from_code(role.code()), Some(role));
        }
        assert_eq!(UserRole::from_code(3), None);
    }

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_extension("docx"), FileType::Document);
        assert_eq!(FileType::from_extension("DOC"), FileType::Document);
        assert_eq!(FileType::from_extension("pdf"), FileType::Other);
    }

    #[test]
    fn user_serializes_for_ipc() {
        let user = User {
            id: 7,
            username: "alice".into(),
            password: "pw".into(),
            role: UserRole::NormalUser,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
