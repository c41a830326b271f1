use std::num::ParseIntError;

/// Error for an unsigned number field in address or group id text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    #[error("unexpected {found:?}, expected base-{radix} digits only")]
    InvalidChar { found: char, radix: u32 },

    #[error(transparent)]
    Int(#[from] ParseIntError),
}

/// Parses a `u16` written with digits of `radix` only.
///
/// Unlike [`u16::from_str_radix`], a leading `+` is rejected so that every
/// accepted text has a single meaning.
///
/// # Errors
/// [`NumberError::InvalidChar`] for a non-digit character, otherwise the
/// empty/overflow error of the integer parser.
pub fn parse_u16(s: &str, radix: u32) -> Result<u16, NumberError> {
    check_digits(s, radix)?;
    Ok(u16::from_str_radix(s, radix)?)
}

/// Parses a `u64` written with digits of `radix` only. See [`parse_u16`].
///
/// # Errors
/// Same as [`parse_u16`].
pub fn parse_u64(s: &str, radix: u32) -> Result<u64, NumberError> {
    check_digits(s, radix)?;
    Ok(u64::from_str_radix(s, radix)?)
}

fn check_digits(s: &str, radix: u32) -> Result<(), NumberError> {
    match s.chars().find(|c| !c.is_digit(radix)) {
        Some(found) => Err(NumberError::InvalidChar { found, radix }),
        None => Ok(()),
    }
}
