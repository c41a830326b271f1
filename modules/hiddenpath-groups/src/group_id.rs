use std::fmt;
use std::str::FromStr;

use hiddenpath_addr::{Asn, parse_u16};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::GroupIdError;

const SUFFIX_BITS: u32 = 16;

/// Globally unique 64-bit identifier of a hidden path group.
///
/// The upper 48 bits are the owner AS, the lower 16 bits a suffix the owner
/// picks. The text form is `<owner-as>-<suffix-hex>`, e.g. `ff00:0:110-69b5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId {
    owner: Asn,
    suffix: u16,
}

impl GroupId {
    #[must_use]
    pub const fn new(owner: Asn, suffix: u16) -> Self {
        Self { owner, suffix }
    }

    /// Splits the packed `u64` form into owner AS and suffix.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u64(value: u64) -> Self {
        Self {
            owner: Asn::from_bits(value >> SUFFIX_BITS),
            suffix: value as u16,
        }
    }

    /// Packs the id as `(owner << 16) | suffix`.
    #[must_use]
    pub fn to_u64(self) -> u64 {
        (self.owner.value() << SUFFIX_BITS) | u64::from(self.suffix)
    }

    #[must_use]
    pub const fn owner(self) -> Asn {
        self.owner
    }

    #[must_use]
    pub const fn suffix(self) -> u16 {
        self.suffix
    }

    /// The zero id is reserved to mean "missing".
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.to_u64() == 0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:x}", self.owner, self.suffix)
    }
}

impl FromStr for GroupId {
    type Err = GroupIdError;

    /// Parses `<owner-as>-<suffix-hex>`.
    ///
    /// Up to two `_` are read as `:`, so `ff00_0_110-69b5` is accepted where
    /// a colon is not allowed (DNS labels, file names).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replacen('_', ":", 2);
        let parts: Vec<&str> = normalized.split('-').collect();
        let [owner, suffix] = parts.as_slice() else {
            return Err(GroupIdError::Format {
                group_id: s.to_owned(),
            });
        };

        let owner = owner.parse::<Asn>().map_err(|source| GroupIdError::Owner {
            group_id: s.to_owned(),
            source,
        })?;
        let suffix = parse_u16(suffix, 16).map_err(|source| GroupIdError::Suffix {
            group_id: s.to_owned(),
            suffix: (*suffix).to_owned(),
            source,
        })?;

        Ok(Self { owner, suffix })
    }
}

/// Parses the text form of a group id. Same as `s.parse::<GroupId>()`.
///
/// # Errors
/// See [`GroupIdError`].
pub fn parse_group_id(s: &str) -> Result<GroupId, GroupIdError> {
    s.parse()
}

impl Serialize for GroupId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
