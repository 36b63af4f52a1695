//! CRUD operations for [`FileInfo`] records, including the recycle-bin
//! status transitions (soft delete, restore, permanent purge).

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::models::{self, FileInfo, FileStatus, NewFile};

/// Shared SELECT column list; every file query JOINs `users` so results
/// carry the uploader's login name for display.
const FILE_COLUMNS: &str = "f.id, f.file_name, f.file_path, f.file_extension, f.file_size, \
     f.uploader_id, u.username, f.upload_time, f.file_type, f.status, \
     f.project_id, f.is_process_document";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Register an uploaded file and return its assigned id.  New files
    /// always start in [`FileStatus::Normal`].
    pub fn insert_file(&self, file: &NewFile) -> Result<i64> {
        self.conn().execute(
            "INSERT INTO files (file_name, file_path, file_extension, file_size,
                                uploader_id, upload_time, file_type, status,
                                project_id, is_process_document)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                file.file_name,
                file.file_path,
                file.file_extension,
                file.file_size,
                file.uploader_id,
                chrono::Utc::now().to_rfc3339(),
                file.file_type.code(),
                FileStatus::Normal.code(),
                file.project_id,
                file.is_process_document as i64,
            ],
        )?;
        Ok(self.conn().last_insert_rowid())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single file by id, regardless of its status.
    pub fn file_by_id(&self, id: i64) -> Result<Option<FileInfo>> {
        let sql = format!(
            "SELECT {FILE_COLUMNS} FROM files f
             JOIN users u ON f.uploader_id = u.id
             WHERE f.id = ?1"
        );
        let file = self
            .conn()
            .query_row(&sql, params![id], row_to_file)
            .optional()?;
        Ok(file)
    }

    /// List all files in the given status, oldest upload first.
    pub fn list_files(&self, status: FileStatus) -> Result<Vec<FileInfo>> {
        let sql = format!(
            "SELECT {FILE_COLUMNS} FROM files f
             JOIN users u ON f.uploader_id = u.id
             WHERE f.status = ?1
             ORDER BY f.upload_time ASC, f.id ASC"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![status.code()], row_to_file)?;
        collect_files(rows)
    }

    /// List files directly linked to a project (via `files.project_id`).
    pub fn files_by_project(&self, project_id: i64, status: FileStatus) -> Result<Vec<FileInfo>> {
        let sql = format!(
            "SELECT {FILE_COLUMNS} FROM files f
             JOIN users u ON f.uploader_id = u.id
             WHERE f.project_id = ?1 AND f.status = ?2
             ORDER BY f.upload_time ASC, f.id ASC"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![project_id, status.code()], row_to_file)?;
        collect_files(rows)
    }

    /// List the interim/working documents awaiting consolidation, in
    /// upload order.  Only [`FileStatus::Normal`] files qualify.
    pub fn process_documents(&self) -> Result<Vec<FileInfo>> {
        let sql = format!(
            "SELECT {FILE_COLUMNS} FROM files f
             JOIN users u ON f.uploader_id = u.id
             WHERE f.is_process_document = 1 AND f.status = ?1
             ORDER BY f.upload_time ASC, f.id ASC"
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![FileStatus::Normal.code()], row_to_file)?;
        collect_files(rows)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Overwrite the mutable fields of a file record.  Returns `true` if a
    /// row was updated.
    pub fn update_file(&self, file: &FileInfo) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE files SET file_name = ?1, file_path = ?2, file_extension = ?3,
                              file_size = ?4, file_type = ?5, status = ?6,
                              project_id = ?7, is_process_document = ?8
             WHERE id = ?9",
            params![
                file.file_name,
                file.file_path,
                file.file_extension,
                file.file_size,
                file.file_type.code(),
                file.status.code(),
                file.project_id,
                file.is_process_document as i64,
                file.id,
            ],
        )?;
        Ok(affected > 0)
    }

    // ------------------------------------------------------------------
    // Delete / restore
    // ------------------------------------------------------------------

    /// Delete a file.  By default the row is only marked
    /// [`FileStatus::Deleted`] (recycle bin); with `permanent` the row is
    /// removed for good.  Returns `true` if a row was affected.
    pub fn delete_file(&self, id: i64, permanent: bool) -> Result<bool> {
        let affected = if permanent {
            self.conn()
                .execute("DELETE FROM files WHERE id = ?1", params![id])?
        } else {
            self.conn().execute(
                "UPDATE files SET status = ?1 WHERE id = ?2",
                params![FileStatus::Deleted.code(), id],
            )?
        };
        Ok(affected > 0)
    }

    /// Bring a soft-deleted file back to [`FileStatus::Normal`].  Returns
    /// `false` if the file does not exist or is not currently deleted.
    pub fn restore_file(&self, id: i64) -> Result<bool> {
        let affected = self.conn().execute(
            "UPDATE files SET status = ?1 WHERE id = ?2 AND status = ?3",
            params![
                FileStatus::Normal.code(),
                id,
                FileStatus::Deleted.code()
            ],
        )?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` (in [`FILE_COLUMNS`] order) to a [`FileInfo`].
pub(crate) fn row_to_file(row: &rusqlite::Row<'_>) -> rusqlite::Result<FileInfo> {
    let id: i64 = row.get(0)?;
    let file_name: String = row.get(1)?;
    let file_path: String = row.get(2)?;
    let file_extension: String = row.get(3)?;
    let file_size: i64 = row.get(4)?;
    let uploader_id: i64 = row.get(5)?;
    let uploader_name: String = row.get(6)?;
    let upload_str: String = row.get(7)?;
    let type_code: i64 = row.get(8)?;
    let status_code: i64 = row.get(9)?;
    let project_id: Option<i64> = row.get(10)?;
    let process_flag: i64 = row.get(11)?;

    Ok(FileInfo {
        id,
        file_name,
        file_path,
        file_extension,
        file_size,
        uploader_id,
        uploader_name,
        upload_time: models::datetime_column(7, upload_str)?,
        file_type: models::file_type_column(8, type_code)?,
        status: models::file_status_column(9, status_code)?,
        project_id,
        is_process_document: process_flag != 0,
    })
}

pub(crate) fn collect_files(
    rows: impl Iterator<Item = rusqlite::Result<FileInfo>>,
) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();
    for row in rows {
        files.push(row?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use crate::models::{FileStatus, FileType, NewFile, UserRole};
    use crate::test_support::{add_file, add_user, open_db};

    #[test]
    fn soft_delete_round_trip() {
        let (_dir, db) = open_db();
        let alice = add_user(&db, "alice", UserRole::NormalUser);
        let id = add_file(&db, "notes", alice);

        assert!(db.delete_file(id, false).unwrap());
        assert!(db.list_files(FileStatus::Normal).unwrap().is_empty());
        assert_eq!(db.list_files(FileStatus::Deleted).unwrap().len(), 1);

        assert!(db.restore_file(id).unwrap());
        let normal = db.list_files(FileStatus::Normal).unwrap();
        assert_eq!(normal.len(), 1);
        assert_eq!(normal[0].id, id);

        // Restoring a file that is not in the recycle bin is a no-op.
        assert!(!db.restore_file(id).unwrap());
    }

    #[test]
    fn permanent_delete_removes_the_row() {
        let (_dir, db) = open_db();
        let alice = add_user(&db, "alice", UserRole::NormalUser);
        let id = add_file(&db, "scratch", alice);

        assert!(db.delete_file(id, true).unwrap());
        assert!(db.file_by_id(id).unwrap().is_none());
        assert!(!db.restore_file(id).unwrap());
    }

    #[test]
    fn process_documents_filters_flag_and_status() {
        let (_dir, db) = open_db();
        let alice = add_user(&db, "alice", UserRole::NormalUser);

        let plain = add_file(&db, "deliverable", alice);
        let interim = db
            .insert_file(&NewFile {
                file_name: "draft".into(),
                file_path: "/tmp/draft.docx".into(),
                file_extension: "docx".into(),
                file_size: 256,
                uploader_id: alice,
                file_type: FileType::Document,
                project_id: None,
                is_process_document: true,
            })
            .unwrap();
        let binned = db
            .insert_file(&NewFile {
                file_name: "old-draft".into(),
                file_path: "/tmp/old-draft.docx".into(),
                file_extension: "docx".into(),
                file_size: 256,
                uploader_id: alice,
                file_type: FileType::Document,
                project_id: None,
                is_process_document: true,
            })
            .unwrap();
        db.delete_file(binned, false).unwrap();

        let docs = db.process_documents().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, interim);
        assert_ne!(docs[0].id, plain);
    }

    #[test]
    fn uploader_cascade_removes_their_files() {
        let (_dir, db) = open_db();
        let carol = add_user(&db, "carol", UserRole::NormalUser);
        let id = add_file(&db, "orphan", carol);

        assert!(db.delete_user(carol).unwrap());
        assert!(db.file_by_id(id).unwrap().is_none());
    }
}
