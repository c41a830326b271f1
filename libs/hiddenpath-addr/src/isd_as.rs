use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::AddrError;
use crate::number::{parse_u16, parse_u64};

/// Highest AS number that is written in BGP-style decimal form.
pub const MAX_BGP_ASN: u64 = (1 << 32) - 1;

const ASN_BITS: u32 = 48;
const ASN_GROUP_BITS: u32 = 16;
const ASN_GROUPS: usize = 3;
const ASN_GROUP_MAX_DIGITS: usize = 4;

/// Isolation domain number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Isd(pub u16);

impl fmt::Display for Isd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Isd {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_u16(s, 10).map(Isd).map_err(|source| AddrError::Isd {
            raw: s.to_owned(),
            source,
        })
    }
}

/// 48-bit autonomous system number.
///
/// Values up to [`MAX_BGP_ASN`] are formatted as decimal, larger values as
/// three colon-separated lowercase hex groups (`ff00:0:110`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Asn(u64);

impl Asn {
    pub const MAX: u64 = (1 << ASN_BITS) - 1;

    /// Creates an AS number, rejecting values outside the 48-bit range.
    ///
    /// # Errors
    /// Returns [`AddrError::AsnOutOfRange`] if `value` exceeds [`Asn::MAX`].
    pub fn new(value: u64) -> Result<Self, AddrError> {
        if value > Self::MAX {
            return Err(AddrError::AsnOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Creates an AS number from the low 48 bits of `value`.
    #[must_use]
    pub const fn from_bits(value: u64) -> Self {
        Self(value & Self::MAX)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    fn parse_hex_groups(s: &str) -> Result<u64, AddrError> {
        let groups: Vec<&str> = s.split(':').collect();
        if groups.len() != ASN_GROUPS {
            return Err(AddrError::AsnGroupCount {
                raw: s.to_owned(),
                groups: groups.len(),
            });
        }

        let mut value = 0u64;
        for group in groups {
            if group.is_empty()
                || group.len() > ASN_GROUP_MAX_DIGITS
                || !group.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(AddrError::AsnGroup {
                    raw: s.to_owned(),
                    group: group.to_owned(),
                });
            }
            let part = parse_u64(group, 16).map_err(|source| AddrError::Asn {
                raw: s.to_owned(),
                source,
            })?;
            value = (value << ASN_GROUP_BITS) | part;
        }
        Ok(value)
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 <= MAX_BGP_ASN {
            return write!(f, "{}", self.0);
        }
        let mask = (1u64 << ASN_GROUP_BITS) - 1;
        write!(
            f,
            "{:x}:{:x}:{:x}",
            (self.0 >> (2 * ASN_GROUP_BITS)) & mask,
            (self.0 >> ASN_GROUP_BITS) & mask,
            self.0 & mask
        )
    }
}

impl FromStr for Asn {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            return Self::parse_hex_groups(s).map(Asn);
        }

        let value = parse_u64(s, 10).map_err(|source| AddrError::Asn {
            raw: s.to_owned(),
            source,
        })?;
        if value > MAX_BGP_ASN {
            return Err(AddrError::BgpAsnOutOfRange {
                raw: s.to_owned(),
                max: MAX_BGP_ASN,
            });
        }
        Ok(Asn(value))
    }
}

/// An ISD-AS pair, written `<isd>-<as>` (e.g. `1-ff00:0:110`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsdAsn {
    pub isd: Isd,
    pub asn: Asn,
}

impl IsdAsn {
    #[must_use]
    pub const fn new(isd: Isd, asn: Asn) -> Self {
        Self { isd, asn }
    }

    /// The unset address `0-0`.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.isd.0 == 0 && self.asn.is_zero()
    }
}

impl fmt::Display for IsdAsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.isd, self.asn)
    }
}

impl FromStr for IsdAsn {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let [isd, asn] = parts.as_slice() else {
            return Err(AddrError::IaFormat { raw: s.to_owned() });
        };
        Ok(Self {
            isd: isd.parse()?,
            asn: asn.parse()?,
        })
    }
}

macro_rules! impl_string_serde {
    ($ty:ty, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(|e| {
                    de::Error::custom(format_args!(concat!("expected ", $expecting, ": {}"), e))
                })
            }
        }
    };
}

impl_string_serde!(Asn, "AS number");
impl_string_serde!(IsdAsn, "ISD-AS");
