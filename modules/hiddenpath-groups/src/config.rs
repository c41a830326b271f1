//! Service-level configuration pointing at the hidden path groups files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::loader::load_groups_layered;
use crate::registry::Groups;

/// Hidden path settings of a control service.
///
/// ```yaml
/// hidden_paths:
///   groups_files:
///     - "/etc/scion/hp_groups.yml"
///     - "/etc/scion/hp_groups.local.yml"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HiddenPathConfig {
    /// Groups files, merged in order. Empty disables hidden paths.
    pub groups_files: Vec<PathBuf>,
}

impl HiddenPathConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.groups_files
            .iter()
            .any(|path| !path.as_os_str().is_empty())
    }

    /// Loads and validates the configured groups.
    ///
    /// # Errors
    /// See [`load_groups`](crate::load_groups).
    pub fn load_groups(&self) -> Result<Option<Groups>, LoadError> {
        load_groups_layered(&self.groups_files)
    }
}
