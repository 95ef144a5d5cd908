//! Error types for charstring decoding.

use core::fmt;

/// A specialized [`Result`] type for charstring decoding.
pub type Result<T> = core::result::Result<T, Error>;

/// An error encountered while decrypting or decoding a charstring.
///
/// All errors are fatal for the glyph that is being decoded. Decoding stops at
/// the first error and the whole call chain unwinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Reading from the source failed or returned no data.
    StreamRead,
    /// Seeking the source failed.
    StreamSeek,
    /// An operator found fewer operands than it requires.
    StackUnderflow,
    /// An operand was pushed onto a full stack.
    StackOverflow,
    /// A reserved or unknown operator was encountered.
    InvalidOperator,
    /// `callothersubr` was invoked with an unknown selector.
    InvalidOtherSubr,
    /// `callsubr` referenced a subroutine outside of the subroutine table.
    InvalidSubr,
    /// Subroutines were nested too deeply.
    SubrDepth,
    /// An index or count was outside of the valid range.
    BoundsCheck,
    /// `sqrt` was applied to a negative operand.
    SqrtDomain,
    /// A Flex sequence was malformed.
    BadFlex,
    /// A counter control hint group was malformed.
    BadCounterControl,
    /// A `seac` component was out of range or couldn't be resolved.
    BadSeac,
    /// The `lenIV` value is negative or larger than the data.
    BadLenIv,
    /// Blending was requested with fewer than two master designs.
    InvalidWeightVector,
}

impl Error {
    /// Returns the fixed, human-readable message for this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StreamRead => "source stream read error",
            Self::StreamSeek => "source stream seek error",
            Self::StackUnderflow => "operand stack underflow",
            Self::StackOverflow => "operand stack overflow",
            Self::InvalidOperator => "invalid charstring operator",
            Self::InvalidOtherSubr => "invalid othersubr selector",
            Self::InvalidSubr => "invalid subroutine index",
            Self::SubrDepth => "subroutine nesting too deep",
            Self::BoundsCheck => "index or count out of range",
            Self::SqrtDomain => "sqrt of negative operand",
            Self::BadFlex => "malformed flex sequence",
            Self::BadCounterControl => "malformed counter control hints",
            Self::BadSeac => "bad seac component",
            Self::BadLenIv => "invalid lenIV",
            Self::InvalidWeightVector => "invalid weight vector",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for Error {}
