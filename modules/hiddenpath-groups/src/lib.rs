#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Hidden Path Groups
//!
//! A hidden path group is a named set of ASes that share path information
//! which is not disseminated publicly. This crate models the group registry
//! a control service loads at startup:
//! - [`GroupId`]: 64-bit group identifier (owner AS + 16-bit suffix)
//! - [`Group`]: owner, writers, readers and registries of one group
//! - [`Groups`]: the keyed registry with validation and YAML (de)serialization
//!
//! ## Configuration
//!
//! ```yaml
//! groups:
//!   ff00:0:110-69b5:
//!     owner: "1-ff00:0:110"
//!     writers:
//!       - "1-ff00:0:111"
//!       - "1-ff00:0:112"
//!     readers:
//!       - "1-ff00:0:114"
//!     registries:
//!       - "1-ff00:0:110"
//! ```
//!
//! Use [`load_groups`] to read and validate such a file. Decoding through
//! `serde` alone does not validate; call [`Groups::validate`] afterwards.

pub mod config;
pub mod document;
pub mod error;
pub mod group;
pub mod group_id;
pub mod loader;
pub mod registry;

pub use config::HiddenPathConfig;
pub use document::{GroupInfo, GroupsDocument};
pub use error::{DecodeError, GroupIdError, LoadError, ValidationError, error_chain};
pub use group::{Group, Role};
pub use group_id::{GroupId, parse_group_id};
pub use loader::{load_groups, load_groups_layered};
pub use registry::Groups;

pub use hiddenpath_addr::{Asn, Identity, IsdAsn};
