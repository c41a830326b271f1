#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! ISD-AS addressing primitives
//!
//! Provides the identity types hidden path groups are built from:
//! - [`Isd`]: 16-bit isolation domain number
//! - [`Asn`]: 48-bit AS number with BGP-style decimal and `h:h:h` hex text forms
//! - [`IsdAsn`]: the `<isd>-<as>` pair identifying a single AS
//!
//! The [`Identity`] trait abstracts over member identities so that group
//! records can be used with any structured address that exposes its AS.

pub mod error;
pub mod identity;
pub mod isd_as;
pub mod number;

pub use error::AddrError;
pub use identity::Identity;
pub use isd_as::{Asn, Isd, IsdAsn};
pub use number::{NumberError, parse_u16, parse_u64};
