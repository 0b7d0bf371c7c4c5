//! Definitions.

use core::fmt::Display;

/// A word.
pub type Word = u64;

/// Doubled word.
pub type DoubleWord = u128;

/// Maximum value of a word.
pub const WORD_MAX: Word = Word::MAX;

/// Base of words.
pub const WORD_BASE: DoubleWord = WORD_MAX as DoubleWord + 1;

/// Size of a word in bits.
pub const WORD_BIT_SIZE: usize = core::mem::size_of::<Word>() * 8;

/// Maximum number of significant decimal digits kept by the parser.
/// Every rounding boundary of a `f64` has at most 768 significant digits,
/// so digits beyond this position can only act as a sticky bit.
pub const MAX_SIG_DIGITS: usize = 800;

/// Maximum number of digits produced by an exact conversion to decimal.
/// The longest exact expansion of a `f64` has 767 significant digits.
pub const MAX_EXACT_DIGITS: usize = 800;

/// Capacity of a multi-word integer in words.
/// The widest operand is the shifted numerator of the decimal to binary
/// division: `10^k·2^s` with `k <= MAX_SIG_DIGITS + 343` and `s` adding 66 bits,
/// i.e. below 3900 bits, plus a word of headroom for normalization.
pub const BIG_CAPACITY: usize = 64;

/// Sign.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Sign {
    /// Negative.
    Neg = -1,

    /// Positive.
    Pos = 1,
}

impl Sign {
    /// Returns true if `self` is negative.
    pub fn is_negative(&self) -> bool {
        *self == Sign::Neg
    }
}

/// Possible errors.
#[derive(Debug, Clone, Copy)]
pub enum Error {
    /// The input does not start with a number.
    InvalidArgument,

    /// A number was parsed, but characters remain starting at the given position.
    TrailingCharacters(usize),
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::TrailingCharacters(pos) => {
                write!(f, "unexpected character at position {}", pos)
            }
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TrailingCharacters(l0), Self::TrailingCharacters(r0)) => l0 == r0,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

/// Radix.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Radix {
    /// Binary.
    Bin = 2,

    /// Octal.
    Oct = 8,

    /// Decimal.
    Dec = 10,

    /// Hexadecimal.
    Hex = 16,
}

/// Layout of a formatted floating point number.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloatStyle {
    /// Fixed point notation: `ddd.ddd`.
    Fixed,

    /// Scientific notation: `d.ddde±dd`.
    Scientific,

    /// Fixed or scientific notation depending on the exponent, trailing zeroes removed.
    General,
}

/// Result of a fast path computation.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Fast<T> {
    /// The fast path proved its result.
    Definite(T),

    /// The approximation error does not allow a decision, the exact path must be used.
    NeedsExactFallback,
}
