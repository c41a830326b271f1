use std::collections::HashMap;
use std::collections::hash_map::Entry;

use hiddenpath_addr::{Identity, IsdAsn};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::document::{GroupInfo, GroupsDocument};
use crate::error::{DecodeError, ValidationError, error_chain};
use crate::group::{Group, Role};
use crate::group_id::GroupId;

/// Registry of hidden path groups keyed by [`GroupId`].
///
/// Read-only once built; a changed configuration is loaded into a new
/// registry. Decoding (`merge_document`, `Deserialize`) does not validate,
/// call [`Groups::validate`] before using a registry that did not come from
/// [`load_groups`](crate::load_groups).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups<I: Identity = IsdAsn> {
    groups: HashMap<GroupId, Group<I>>,
}

impl<I: Identity> Default for Groups<I> {
    fn default() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }
}

impl<I: Identity> Groups<I> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &GroupId) -> Option<&Group<I>> {
        self.groups.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &GroupId) -> bool {
        self.groups.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupId, &Group<I>)> {
        self.groups.iter()
    }

    /// Group ids in ascending numeric order.
    #[must_use]
    pub fn ids(&self) -> Vec<GroupId> {
        let mut ids: Vec<GroupId> = self.groups.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn into_inner(self) -> HashMap<GroupId, Group<I>> {
        self.groups
    }

    /// Validates every group. Groups are independent, so this passes iff
    /// each group passes; an empty registry is valid.
    ///
    /// # Errors
    /// The first [`ValidationError`] found, visiting groups in id order so
    /// the reported failure does not depend on hash order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut groups: Vec<&Group<I>> = self.groups.values().collect();
        groups.sort_unstable_by_key(|group| group.id);
        groups.into_iter().try_for_each(Group::validate)
    }

    /// Groups in which `ia` is declared with `role`.
    pub fn groups_with_role<'a>(
        &'a self,
        ia: &'a I,
        role: Role,
    ) -> impl Iterator<Item = &'a Group<I>> + 'a {
        self.groups
            .values()
            .filter(move |group| group.has_role(ia, role))
    }

    /// Decodes `doc` and adds its groups, replacing groups with the same id.
    ///
    /// A document without groups leaves the registry untouched. Entries are
    /// all parsed before any is inserted, so on error the registry is
    /// unchanged. The result is not validated.
    ///
    /// # Errors
    /// [`DecodeError`] for the first entry that does not parse, or
    /// [`DecodeError::DuplicateGroupId`] if two keys in `doc` name the same
    /// group (e.g. `ff00:0:1-1a` and `ff00_0_1-001a`).
    pub fn merge_document(&mut self, doc: &GroupsDocument) -> Result<(), DecodeError> {
        let Some(entries) = doc.groups.as_ref().filter(|entries| !entries.is_empty()) else {
            return Ok(());
        };

        let mut parsed: HashMap<GroupId, (&str, Group<I>)> = HashMap::with_capacity(entries.len());
        for (raw_id, info) in entries {
            let id: GroupId = raw_id.parse()?;
            let group = info.to_group(id)?;
            match parsed.entry(id) {
                Entry::Occupied(existing) => {
                    return Err(DecodeError::DuplicateGroupId {
                        group_id: id,
                        first: existing.get().0.to_owned(),
                        second: raw_id.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert((raw_id.as_str(), group));
                }
            }
        }

        self.groups
            .extend(parsed.into_iter().map(|(id, (_, group))| (id, group)));
        Ok(())
    }

    /// Decodes a document into a new registry. Not validated.
    ///
    /// # Errors
    /// See [`Groups::merge_document`].
    pub fn from_document(doc: &GroupsDocument) -> Result<Self, DecodeError> {
        let mut groups = Self::new();
        groups.merge_document(doc)?;
        Ok(groups)
    }

    /// Text form of the registry with sorted keys and member lists.
    #[must_use]
    pub fn to_document(&self) -> GroupsDocument {
        if self.groups.is_empty() {
            return GroupsDocument::default();
        }
        GroupsDocument {
            groups: Some(
                self.groups
                    .iter()
                    .map(|(id, group)| (id.to_string(), GroupInfo::from_group(group)))
                    .collect(),
            ),
        }
    }
}

impl<I: Identity> FromIterator<Group<I>> for Groups<I> {
    /// Later groups replace earlier ones with the same id.
    fn from_iter<T: IntoIterator<Item = Group<I>>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().map(|group| (group.id, group)).collect(),
        }
    }
}

impl<'a, I: Identity> IntoIterator for &'a Groups<I> {
    type Item = (&'a GroupId, &'a Group<I>);
    type IntoIter = std::collections::hash_map::Iter<'a, GroupId, Group<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl<I: Identity> Serialize for Groups<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl<'de, I: Identity> Deserialize<'de> for Groups<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = GroupsDocument::deserialize(deserializer)?;
        Self::from_document(&doc).map_err(|e| de::Error::custom(error_chain(&e)))
    }
}
