use std::collections::HashSet;
use std::fmt;

use hiddenpath_addr::{Identity, IsdAsn};

use crate::error::ValidationError;
use crate::group_id::GroupId;

/// A role an identity can be declared with inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Owner,
    Writer,
    Reader,
    Registry,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Writer, Role::Reader, Role::Registry];

    /// Name of the configuration section listing this role.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Writer => "writers",
            Role::Reader => "readers",
            Role::Registry => "registries",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Role::Owner => "owner",
            Role::Writer => "writer",
            Role::Reader => "reader",
            Role::Registry => "registry",
        })
    }
}

/// A group of ASes that share hidden path information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<I: Identity = IsdAsn> {
    /// 64-bit unique identifier: owner AS number plus a 16-bit suffix.
    pub id: GroupId,
    /// The AS maintaining this group's configuration and distributing it to
    /// every member that needs it. Must match the AS encoded in `id`.
    pub owner: I,
    /// Members allowed to register hidden paths.
    pub writers: HashSet<I>,
    /// Members allowed to read hidden path information.
    pub readers: HashSet<I>,
    /// Members at which writers register hidden paths.
    pub registries: HashSet<I>,
}

impl<I: Identity> Group<I> {
    /// Creates a group with empty role sets.
    #[must_use]
    pub fn new(id: GroupId, owner: I) -> Self {
        Self {
            id,
            owner,
            writers: HashSet::new(),
            readers: HashSet::new(),
            registries: HashSet::new(),
        }
    }

    /// Checks the group invariants, stopping at the first violation.
    ///
    /// # Errors
    /// Returns the [`ValidationError`] of the first failed check, in this
    /// order: id set, owner set, owner AS matches id, writers non-empty,
    /// registries non-empty. Readers may be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_zero() {
            return Err(ValidationError::MissingGroupId);
        }
        if self.owner.is_zero() {
            return Err(ValidationError::MissingOwner { group_id: self.id });
        }
        if self.owner.asn() != self.id.owner() {
            return Err(ValidationError::OwnerMismatch {
                group_id: self.id,
                owner_as: self.owner.asn(),
                group_id_as: self.id.owner(),
            });
        }
        if self.writers.is_empty() {
            return Err(ValidationError::EmptyWriters { group_id: self.id });
        }
        if self.registries.is_empty() {
            return Err(ValidationError::EmptyRegistries { group_id: self.id });
        }
        Ok(())
    }

    /// Registries as a list, in no particular order.
    #[must_use]
    pub fn registry_list(&self) -> Vec<I> {
        self.registries.iter().copied().collect()
    }

    /// Member set for a role. The owner is a single identity, not a set.
    #[must_use]
    pub fn members(&self, role: Role) -> Option<&HashSet<I>> {
        match role {
            Role::Owner => None,
            Role::Writer => Some(&self.writers),
            Role::Reader => Some(&self.readers),
            Role::Registry => Some(&self.registries),
        }
    }

    /// Whether `ia` is declared with `role` in this group.
    #[must_use]
    pub fn has_role(&self, ia: &I, role: Role) -> bool {
        match self.members(role) {
            Some(set) => set.contains(ia),
            None => self.owner == *ia,
        }
    }

    /// All roles `ia` is declared with, in [`Role::ALL`] order.
    #[must_use]
    pub fn roles_of(&self, ia: &I) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.has_role(ia, *role))
            .collect()
    }
}
