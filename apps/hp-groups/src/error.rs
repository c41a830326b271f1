//! Failure records reported by `hp-groups check`.

use std::path::PathBuf;

use hiddenpath_groups::{DecodeError, LoadError, error_chain};
use serde::Serialize;

/// A single failure found while loading a groups file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckFailure {
    /// File the failure is attributed to
    pub file: PathBuf,
    /// Loading stage that failed: io, parse, decode or validation
    pub stage: &'static str,
    /// Group the failure belongs to, when known
    pub group_id: Option<String>,
    /// Full error chain, outermost first
    pub error: String,
}

impl CheckFailure {
    pub fn from_load_error(err: &LoadError) -> Self {
        let (stage, group_id) = match err {
            LoadError::Io { .. } => ("io", None),
            LoadError::Parse { .. } => ("parse", None),
            LoadError::Decode { source, .. } => ("decode", decode_group_id(source)),
            LoadError::Validation { source, .. } => {
                ("validation", Some(source.group_id().to_string()))
            }
        };
        Self {
            file: err.path().to_path_buf(),
            stage,
            group_id,
            error: error_chain(err),
        }
    }

    /// Format the failure for human-readable output.
    ///
    /// With a known group: `{file}: [{group_id}] {error}`
    /// Otherwise: `{file}: {error}`
    pub fn format_human_readable(&self) -> String {
        match &self.group_id {
            Some(group_id) => format!("{}: [{group_id}] {}", self.file.display(), self.error),
            None => format!("{}: {}", self.file.display(), self.error),
        }
    }
}

fn decode_group_id(err: &DecodeError) -> Option<String> {
    match err {
        DecodeError::GroupId(_) => None,
        DecodeError::Owner { group_id, .. }
        | DecodeError::Member { group_id, .. }
        | DecodeError::DuplicateGroupId { group_id, .. } => Some(group_id.to_string()),
    }
}
