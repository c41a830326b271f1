//! Error types for hidden path group parsing, validation and loading.

use std::path::PathBuf;

use hiddenpath_addr::{AddrError, Asn, NumberError};
use thiserror::Error;

use crate::group::Role;
use crate::group_id::GroupId;

/// Boxed parser error of an [`Identity`](hiddenpath_addr::Identity) implementation.
pub type IdentityError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from parsing the text form of a [`GroupId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupIdError {
    #[error("invalid group id format {group_id:?}, expected <owner-as>-<suffix-hex>")]
    Format { group_id: String },

    #[error("invalid group id owner in {group_id:?}")]
    Owner {
        group_id: String,
        #[source]
        source: AddrError,
    },

    #[error("invalid group id suffix {suffix:?} in {group_id:?}")]
    Suffix {
        group_id: String,
        suffix: String,
        #[source]
        source: NumberError,
    },
}

/// A semantic check on a [`Group`](crate::Group) that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing group id")]
    MissingGroupId,

    #[error("group {group_id}: missing owner")]
    MissingOwner { group_id: GroupId },

    #[error("group {group_id}: owner AS {owner_as} does not match group id AS {group_id_as}")]
    OwnerMismatch {
        group_id: GroupId,
        owner_as: Asn,
        group_id_as: Asn,
    },

    #[error("group {group_id}: writers section cannot be empty")]
    EmptyWriters { group_id: GroupId },

    #[error("group {group_id}: registries section cannot be empty")]
    EmptyRegistries { group_id: GroupId },
}

impl ValidationError {
    /// Id of the group that failed. [`ValidationError::MissingGroupId`] maps
    /// to the zero id.
    #[must_use]
    pub fn group_id(&self) -> GroupId {
        match self {
            Self::MissingGroupId => GroupId::default(),
            Self::MissingOwner { group_id }
            | Self::OwnerMismatch { group_id, .. }
            | Self::EmptyWriters { group_id }
            | Self::EmptyRegistries { group_id } => *group_id,
        }
    }
}

/// Errors from converting a [`GroupsDocument`](crate::GroupsDocument) into typed groups.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("parsing group id")]
    GroupId(#[from] GroupIdError),

    #[error("group {group_id}: parsing owner {raw:?}")]
    Owner {
        group_id: GroupId,
        raw: String,
        #[source]
        source: IdentityError,
    },

    #[error("group {group_id}: parsing {} entry {raw:?}", .role.section())]
    Member {
        group_id: GroupId,
        role: Role,
        raw: String,
        #[source]
        source: IdentityError,
    },

    #[error("group {group_id} is defined more than once (as {first:?} and {second:?})")]
    DuplicateGroupId {
        group_id: GroupId,
        first: String,
        second: String,
    },
}

/// Errors from [`load_groups`](crate::load_groups).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("opening groups file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing groups file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_saphyr::Error,
    },

    #[error("decoding groups file {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("validating groups file {}", .path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl LoadError {
    /// The file the error is attributed to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Decode { path, .. }
            | Self::Validation { path, .. } => path,
        }
    }
}

/// Renders `err` and its source chain as `outer: inner: root`.
#[must_use]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
