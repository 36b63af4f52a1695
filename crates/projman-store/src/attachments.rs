//! Maintenance of the `project_file` and `node_file` associations.
//!
//! Project-level attachments support both add-only assignment and full
//! replacement; node-level attachments are replace-only, which is why the
//! `node_file` table carries no unique pair constraint.  Every write runs
//! inside one transaction.

use rusqlite::params;

use crate::database::Database;
use crate::error::Result;
use crate::files::{collect_files, row_to_file};
use crate::models::{FileInfo, FileStatus};

impl Database {
    // ------------------------------------------------------------------
    // project_file
    // ------------------------------------------------------------------

    /// List the files attached to a project, filtered by status.
    pub fn project_files(&self, project_id: i64, status: FileStatus) -> Result<Vec<FileInfo>> {
        let mut stmt = self.conn().prepare(
            "SELECT f.id, f.file_name, f.file_path, f.file_extension, f.file_size,
                    f.uploader_id, u.username, f.upload_time, f.file_type, f.status,
                    f.project_id, f.is_process_document
             FROM files f
             JOIN users u ON f.uploader_id = u.id
             JOIN project_file pf ON f.id = pf.file_id
             WHERE pf.project_id = ?1 AND f.status = ?2
             ORDER BY f.upload_time ASC, f.id ASC",
        )?;
        let rows = stmt.query_map(params![project_id, status.code()], row_to_file)?;
        collect_files(rows)
    }

    /// Attach files to a project.  Pairs that already exist are skipped via
    /// the unique constraint; an invalid id fails the whole batch.
    pub fn assign_files_to_project(&mut self, project_id: i64, file_ids: &[i64]) -> Result<()> {
        let tx = self.conn_mut().transaction()?;

        for &file_id in file_ids {
            tx.execute(
                "INSERT OR IGNORE INTO project_file (project_id, file_id) VALUES (?1, ?2)",
                params![project_id, file_id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Replace a project's entire attachment set.  Any failure leaves the
    /// prior set intact.
    pub fn replace_project_files(&mut self, project_id: i64, file_ids: &[i64]) -> Result<()> {
        let tx = self.conn_mut().transaction()?;

        tx.execute(
            "DELETE FROM project_file WHERE project_id = ?1",
            params![project_id],
        )?;

        for &file_id in file_ids {
            tx.execute(
                "INSERT INTO project_file (project_id, file_id) VALUES (?1, ?2)",
                params![project_id, file_id],
            )?;
        }

        tx.commit()?;

        tracing::debug!(project_id, files = file_ids.len(), "project attachments replaced");
        Ok(())
    }

    // ------------------------------------------------------------------
    // node_file
    // ------------------------------------------------------------------

    /// List the files attached to a project node, filtered by status.
    pub fn node_files(&self, node_id: i64, status: FileStatus) -> Result<Vec<FileInfo>> {
        let mut stmt = self.conn().prepare(
            "SELECT f.id, f.file_name, f.file_path, f.file_extension, f.file_size,
                    f.uploader_id, u.username, f.upload_time, f.file_type, f.status,
                    f.project_id, f.is_process_document
             FROM files f
             JOIN users u ON f.uploader_id = u.id
             JOIN node_file nf ON f.id = nf.file_id
             WHERE nf.node_id = ?1 AND f.status = ?2
             ORDER BY f.upload_time ASC, f.id ASC",
        )?;
        let rows = stmt.query_map(params![node_id, status.code()], row_to_file)?;
        collect_files(rows)
    }

    /// Replace the set of files attached to a node.
    ///
    /// The node's existing attachment rows are removed, then one row per
    /// given id is inserted.  Any failure leaves the prior set intact.
    pub fn assign_files_to_node(&mut self, node_id: i64, file_ids: &[i64]) -> Result<()> {
        let tx = self.conn_mut().transaction()?;

        tx.execute(
            "DELETE FROM node_file WHERE node_id = ?1",
            params![node_id],
        )?;

        for &file_id in file_ids {
            tx.execute(
                "INSERT INTO node_file (node_id, file_id) VALUES (?1, ?2)",
                params![node_id, file_id],
            )?;
        }

        tx.commit()?;

        tracing::debug!(node_id, files = file_ids.len(), "node attachments replaced");
        Ok(())
    }
}
