use crate::number::NumberError;

/// Errors produced while parsing ISD, AS and ISD-AS text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("invalid ISD {raw:?}: {source}")]
    Isd {
        raw: String,
        #[source]
        source: NumberError,
    },

    #[error("invalid AS {raw:?}: {source}")]
    Asn {
        raw: String,
        #[source]
        source: NumberError,
    },

    #[error("AS {raw:?} out of range, BGP AS numbers must not exceed {max}")]
    BgpAsnOutOfRange { raw: String, max: u64 },

    #[error("invalid AS {raw:?}: expected 3 colon-separated hex groups, found {groups}")]
    AsnGroupCount { raw: String, groups: usize },

    #[error("invalid AS {raw:?}: group {group:?} must be 1 to 4 hex digits")]
    AsnGroup { raw: String, group: String },

    #[error("AS value {value} exceeds the 48-bit AS range")]
    AsnOutOfRange { value: u64 },

    #[error("invalid ISD-AS {raw:?}: expected <isd>-<as>")]
    IaFormat { raw: String },
}
