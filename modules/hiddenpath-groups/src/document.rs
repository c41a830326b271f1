//! Textual form of the group registry, as read from and written to YAML.

use std::collections::{BTreeMap, HashSet};

use hiddenpath_addr::Identity;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::group::{Group, Role};
use crate::group_id::GroupId;

/// Top-level document: `groups` keyed by group id text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, GroupInfo>>,
}

/// One group entry. Every field is optional at this level; required fields
/// are enforced when the entry is converted and validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub writers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub readers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub registries: Vec<String>,
}

impl GroupInfo {
    /// Text form of a group. Role lists are sorted so output is stable.
    #[must_use]
    pub fn from_group<I: Identity>(group: &Group<I>) -> Self {
        Self {
            owner: group.owner.to_string(),
            writers: sorted_strings(&group.writers),
            readers: sorted_strings(&group.readers),
            registries: sorted_strings(&group.registries),
        }
    }

    /// Parses the owner and every member. Does not validate the result.
    ///
    /// # Errors
    /// [`DecodeError::Owner`] or [`DecodeError::Member`] for the first entry
    /// that does not parse.
    pub fn to_group<I: Identity>(&self, id: GroupId) -> Result<Group<I>, DecodeError> {
        let owner = I::parse(&self.owner).map_err(|source| DecodeError::Owner {
            group_id: id,
            raw: self.owner.clone(),
            source: Box::new(source),
        })?;

        Ok(Group {
            id,
            owner,
            writers: parse_set(id, Role::Writer, &self.writers)?,
            readers: parse_set(id, Role::Reader, &self.readers)?,
            registries: parse_set(id, Role::Registry, &self.registries)?,
        })
    }
}

fn sorted_strings<I: Identity>(set: &HashSet<I>) -> Vec<String> {
    let mut out: Vec<String> = set.iter().map(ToString::to_string).collect();
    out.sort_unstable();
    out
}

fn parse_set<I: Identity>(
    group_id: GroupId,
    role: Role,
    raw: &[String],
) -> Result<HashSet<I>, DecodeError> {
    raw.iter()
        .map(|entry| {
            I::parse(entry).map_err(|source| DecodeError::Member {
                group_id,
                role,
                raw: entry.clone(),
                source: Box::new(source),
            })
        })
        .collect()
}
