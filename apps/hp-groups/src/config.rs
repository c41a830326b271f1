//! Tool configuration.
//!
//! Layered: defaults -> YAML file (if provided) -> env (`HP__*`).

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use hiddenpath_groups::HiddenPathConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub hidden_paths: HiddenPathConfig,
}

impl ToolConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file does not exist: {}",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("HP__").split("__"))
            .extract()
            .context("loading hp-groups configuration")
    }
}
