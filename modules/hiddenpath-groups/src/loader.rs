//! Loading the hidden path groups configuration from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::GroupsDocument;
use crate::error::LoadError;
use crate::group_id::GroupId;
use crate::registry::Groups;

/// Loads and validates the groups file at `path`.
///
/// An empty path means hidden paths are not configured and yields
/// `Ok(None)`, which callers should treat as "feature disabled" rather than
/// an empty registry.
///
/// # Errors
/// - [`LoadError::Io`] if the file cannot be opened or read
/// - [`LoadError::Parse`] if it is not a well-formed groups document
/// - [`LoadError::Decode`] if a group id, owner or member does not parse
/// - [`LoadError::Validation`] if a group fails [`Group::validate`](crate::Group::validate)
pub fn load_groups(path: impl AsRef<Path>) -> Result<Option<Groups>, LoadError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        tracing::debug!("No hidden path groups file configured");
        return Ok(None);
    }
    load_groups_layered(&[path])
}

/// Loads several groups files in order and validates the combined registry.
///
/// A group defined in a later file replaces the same group from an earlier
/// one. Empty paths are skipped; if nothing is left the result is
/// `Ok(None)`.
///
/// # Errors
/// Same as [`load_groups`]. Validation errors name the file that defined the
/// offending group.
pub fn load_groups_layered<P: AsRef<Path>>(paths: &[P]) -> Result<Option<Groups>, LoadError> {
    let paths: Vec<&Path> = paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| !path.as_os_str().is_empty())
        .collect();
    if paths.is_empty() {
        return Ok(None);
    }

    let mut groups: Groups = Groups::new();
    let mut origin: HashMap<GroupId, &Path> = HashMap::new();
    for &path in &paths {
        tracing::debug!(path = %path.display(), "Loading hidden path groups");
        let doc = read_document(path)?;
        groups
            .merge_document(&doc)
            .map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        for id in doc.groups.iter().flat_map(|entries| entries.keys()) {
            if let Ok(id) = id.parse::<GroupId>() {
                origin.insert(id, path);
            }
        }
    }

    if let Err(source) = groups.validate() {
        let path = origin
            .get(&source.group_id())
            .copied()
            .or_else(|| paths.last().copied())
            .map(PathBuf::from)
            .unwrap_or_default();
        tracing::warn!(path = %path.display(), error = %source, "Invalid hidden path groups");
        return Err(LoadError::Validation { path, source });
    }

    tracing::info!(
        groups = groups.len(),
        files = paths.len(),
        "Loaded hidden path groups"
    );
    Ok(Some(groups))
}

fn read_document(path: &Path) -> Result<GroupsDocument, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(GroupsDocument::default());
    }

    serde_saphyr::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
