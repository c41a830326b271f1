use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::AddrError;
use crate::isd_as::{Asn, IsdAsn};

/// A member identity that can appear in a hidden path group.
///
/// Implementors must have a canonical text form (`Display`) that
/// [`Identity::parse`] accepts back, and must expose the AS component that
/// group ids are keyed on.
pub trait Identity: Copy + Eq + Hash + Debug + Display {
    type ParseError: std::error::Error + Send + Sync + 'static;

    /// Parses the canonical text form.
    ///
    /// # Errors
    /// Returns `Self::ParseError` if `s` is not a valid identity.
    fn parse(s: &str) -> Result<Self, Self::ParseError>;

    /// The AS component of this identity.
    fn asn(&self) -> Asn;

    /// Whether this is the unset identity.
    fn is_zero(&self) -> bool;
}

impl Identity for IsdAsn {
    type ParseError = AddrError;

    fn parse(s: &str) -> Result<Self, AddrError> {
        s.parse()
    }

    fn asn(&self) -> Asn {
        self.asn
    }

    fn is_zero(&self) -> bool {
        IsdAsn::is_zero(self)
    }
}
