//! Document management: uploads, node attachments, the recycle bin, and
//! process-document consolidation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use projman_store::{Database, FileStatus, NewFile, User};

use crate::error::{AppError, Result};
use crate::merge::{DocumentMerger, MergeError};
use crate::policy;

/// Tally of a batch file operation.  One item's failure does not stop the
/// rest; callers report both counts together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

/// Record an uploaded file and return its id.  Any signed-in user may
/// upload; the record is always attributed to the acting user.
pub fn register_upload(db: &Database, actor: &User, file: &NewFile) -> Result<i64> {
    let record = NewFile {
        uploader_id: actor.id,
        ..file.clone()
    };

    let id = db.insert_file(&record)?;
    tracing::info!(actor = %actor.username, file = %record.file_name, id, "file registered");
    Ok(id)
}

/// Attach documents to a project node, replacing the node's current set.
///
/// Open to every role; the node (and with it the project's breakdown)
/// must already exist.
pub fn attach_documents(
    db: &mut Database,
    actor: &User,
    node_id: i64,
    file_ids: &[i64],
) -> Result<()> {
    let node = db.node_by_id(node_id)?.ok_or(AppError::NotFound {
        what: "project node",
        id: node_id,
    })?;
    policy::ensure_can_attach_documents(actor)?;

    db.assign_files_to_node(node_id, file_ids)?;
    tracing::info!(actor = %actor.username, node_id, project_id = node.project_id, files = file_ids.len(), "documents attached");
    Ok(())
}

/// Remove the given documents from a node, keeping the rest attached.
pub fn detach_documents(
    db: &mut Database,
    actor: &User,
    node_id: i64,
    file_ids: &[i64],
) -> Result<()> {
    let node = db.node_by_id(node_id)?.ok_or(AppError::NotFound {
        what: "project node",
        id: node_id,
    })?;
    let project = db.project_by_id(node.project_id)?.ok_or(AppError::NotFound {
        what: "project",
        id: node.project_id,
    })?;
    policy::ensure_can_remove_documents(actor, &project)?;

    let keep: Vec<i64> = db
        .node_files(node_id, FileStatus::Normal)?
        .iter()
        .map(|f| f.id)
        .filter(|id| !file_ids.contains(id))
        .collect();

    db.assign_files_to_node(node_id, &keep)?;
    tracing::info!(actor = %actor.username, node_id, removed = file_ids.len(), "documents detached");
    Ok(())
}

/// Bring a batch of recycled files back to normal status.
pub fn restore_files(db: &Database, file_ids: &[i64]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for &id in file_ids {
        match db.restore_file(id) {
            Ok(true) => outcome.succeeded += 1,
            Ok(false) => outcome.failed += 1,
            Err(err) => {
                tracing::warn!(id, error = %err, "failed to restore file");
                outcome.failed += 1;
            }
        }
    }
    outcome
}

/// Permanently delete a batch of files.  Irreversible.
pub fn purge_files(db: &Database, file_ids: &[i64]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for &id in file_ids {
        match db.delete_file(id, true) {
            Ok(true) => outcome.succeeded += 1,
            Ok(false) => outcome.failed += 1,
            Err(err) => {
                tracing::warn!(id, error = %err, "failed to purge file");
                outcome.failed += 1;
            }
        }
    }
    outcome
}

/// Merge every process document into one output file, in upload order.
/// Returns how many documents were handed to the merger.
pub fn consolidate_process_documents(
    db: &Database,
    merger: &dyn DocumentMerger,
    output: &Path,
) -> Result<usize> {
    let docs = db.process_documents()?;
    if docs.is_empty() {
        return Err(MergeError::NoDocuments.into());
    }

    let inputs: Vec<PathBuf> = docs.iter().map(|d| PathBuf::from(&d.file_path)).collect();
    merger.merge(&inputs, output)?;

    tracing::info!(count = inputs.len(), output = %output.display(), "process documents merged");
    Ok(inputs.len())
}
