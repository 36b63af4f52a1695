//! Document-merge capability boundary.
//!
//! Consolidating ordered documents into one output file is done by an
//! external collaborator (an embedded interpreter or office automation in
//! the desktop shell).  The core only defines the seam; a merger failure
//! never affects stored data.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors reported by a merge backend.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The input list was empty.
    #[error("no documents to merge")]
    NoDocuments,

    /// The external backend failed; the message is backend-specific.
    #[error("merge backend failed: {0}")]
    Backend(String),
}

/// Merges an ordered list of documents into a single output file.
pub trait DocumentMerger {
    /// Merge `inputs`, in order, into `output`.
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), MergeError>;
}

/// Test double that records every merge request instead of performing it.
#[cfg(test)]
pub(crate) struct RecordingMerger {
    pub calls: std::cell::RefCell<Vec<(Vec<PathBuf>, PathBuf)>>,
    pub fail_with: Option<String>,
}

#[cfg(test)]
impl RecordingMerger {
    pub fn new() -> Self {
        Self {
            calls: std::cell::RefCell::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: std::cell::RefCell::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
impl DocumentMerger for RecordingMerger {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), MergeError> {
        self.calls
            .borrow_mut()
            .push((inputs.to_vec(), output.to_path_buf()));
        match &self.fail_with {
            Some(message) => Err(MergeError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}
