//! Integer parsing and required-value helpers.
//!
//! Puzzle inputs are mostly integers in some radix. Failures are reported
//! through [`ParseError`], which keeps the offending text for diagnostics.

use std::fmt;

/// Errors produced by the parsing helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `text` is not a valid integer of type `target` in base `radix`.
    InvalidInteger {
        text: String,
        radix: u32,
        target: &'static str,
    },
    /// The character is not a hexadecimal digit.
    InvalidHexDigit(char),
    /// A value required by [`Required::required`] was absent.
    MissingValue,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInteger {
                text,
                radix,
                target,
            } => write!(
                f,
                "cannot parse \u{201c}{text}\u{201d} as {target} in base {radix}"
            ),
            Self::InvalidHexDigit(ch) => write!(f, "\u{201c}{ch}\u{201d} is not a hex digit"),
            Self::MissingValue => write!(f, "required value is missing"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Primitive integers that can be parsed from text in an arbitrary radix.
pub trait FromRadix: Sized {
    /// Parse `text` in base `radix`. `radix` must lie in `2..=36`.
    fn from_radix(text: &str, radix: u32) -> Option<Self>;
}

macro_rules! impl_from_radix {
    ($($t:ty),*) => {
        $(
            impl FromRadix for $t {
                #[inline]
                fn from_radix(text: &str, radix: u32) -> Option<Self> {
                    <$t>::from_str_radix(text, radix).ok()
                }
            }
        )*
    };
}

impl_from_radix!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Parse `text` as an integer of type `T` in base `radix`.
///
/// A leading sign is accepted where `T` allows it. Radixes outside `2..=36`
/// are reported as [`ParseError::InvalidInteger`] instead of panicking.
///
/// ```
/// use pathkit_core::parse::parse_int;
/// assert_eq!(parse_int::<i32>("-ff", 16), Ok(-255));
/// ```
pub fn parse_int<T: FromRadix>(text: &str, radix: u32) -> Result<T, ParseError> {
    let parsed = if (2..=36).contains(&radix) {
        T::from_radix(text, radix)
    } else {
        None
    };
    parsed.ok_or_else(|| ParseError::InvalidInteger {
        text: text.to_owned(),
        radix,
        target: std::any::type_name::<T>(),
    })
}

/// Value of a single hexadecimal digit (either case).
pub fn parse_hex_digit(c: char) -> Result<u32, ParseError> {
    c.to_digit(16).ok_or(ParseError::InvalidHexDigit(c))
}

/// Turns an absent value into [`ParseError::MissingValue`].
pub trait Required<T> {
    fn required(self) -> Result<T, ParseError>;
}

impl<T> Required<T> for Option<T> {
    #[inline]
    fn required(self) -> Result<T, ParseError> {
        self.ok_or(ParseError::MissingValue)
    }
}
