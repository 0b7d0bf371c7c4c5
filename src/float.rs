//! Binary floating point formats and their bit layout.

use crate::common::util::log10_pow2;
use crate::defs::Sign;

/// Layout of an IEEE-754 binary interchange format.
///
/// Only the formats of `f32` and `f64` are available; a layout can not be built by hand.
///
/// ```compile_fail
/// let f = astro_scvt::FloatFormat { mantissa_bits: 0, exponent_bits: 11 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    pub(crate) mantissa_bits: u32,
    pub(crate) exponent_bits: u32,
}

impl FloatFormat {
    /// Single precision.
    pub const F32: FloatFormat = FloatFormat { mantissa_bits: 23, exponent_bits: 8 };

    /// Double precision.
    pub const F64: FloatFormat = FloatFormat { mantissa_bits: 52, exponent_bits: 11 };

    /// Number of explicitly stored mantissa bits.
    #[inline]
    pub const fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    /// Number of exponent bits.
    #[inline]
    pub const fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    /// Exponent bias.
    #[inline]
    pub const fn bias(&self) -> i32 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// Smallest binary exponent of a normal number, i.e. `1 - bias`.
    #[inline]
    pub const fn min_exponent(&self) -> i32 {
        1 - self.bias()
    }

    /// Bit pattern of positive infinity.
    #[inline]
    pub const fn infinity_bits(&self) -> u64 {
        ((1u64 << self.exponent_bits) - 1) << self.mantissa_bits
    }

    /// Bit pattern of the sign bit.
    #[inline]
    pub const fn sign_bit(&self) -> u64 {
        1u64 << (self.mantissa_bits + self.exponent_bits)
    }

    /// Bit pattern of a positive quiet NaN.
    #[inline]
    pub const fn nan_bits(&self) -> u64 {
        self.infinity_bits() | (1u64 << (self.mantissa_bits - 1))
    }

    /// Mask of the stored mantissa bits.
    #[inline]
    pub const fn mantissa_mask(&self) -> u64 {
        (1u64 << self.mantissa_bits) - 1
    }

    /// If `digits + exp` of a decimal number `0.ddd·10^(digits + exp)` is not above this value
    /// the number rounds to zero.
    #[inline]
    pub fn min_decimal_exp(&self) -> i32 {
        log10_pow2(self.min_exponent() - self.mantissa_bits as i32 - 1)
    }

    /// If `digits + exp - 1` of a decimal number is not below this value
    /// the number overflows to infinity.
    #[inline]
    pub fn max_decimal_exp(&self) -> i32 {
        log10_pow2(self.bias() + 1) + 1
    }
}

/// Finite nonzero value `mantissa·2^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unpacked {
    /// Mantissa with the implicit bit included for normal numbers.
    pub mantissa: u64,

    /// Binary exponent of the least significant mantissa bit.
    pub exponent: i32,

    /// The lower neighbour is closer than the upper one,
    /// i.e. the mantissa is a power of two and the number is not the smallest normal.
    pub asymmetric: bool,
}

impl Unpacked {
    /// Mantissa shifted to have the most significant bit set and the shift.
    #[inline]
    pub fn normalized(&self) -> (u64, u32) {
        let lz = self.mantissa.leading_zeros();
        (self.mantissa << lz, lz)
    }
}

/// Class of a decoded bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// Not a number.
    Nan,

    /// Infinity.
    Infinite,

    /// Zero.
    Zero,

    /// Finite nonzero number.
    Finite(Unpacked),
}

/// Decode the bit pattern `bits` of format `fmt`.
pub fn decode(bits: u64, fmt: &FloatFormat) -> (Sign, Decoded) {
    let sign = if bits & fmt.sign_bit() != 0 { Sign::Neg } else { Sign::Pos };
    let m = bits & fmt.mantissa_mask();
    let be = ((bits >> fmt.mantissa_bits) & ((1u64 << fmt.exponent_bits) - 1)) as i32;
    let mb = fmt.mantissa_bits as i32;

    let d = if be == (1 << fmt.exponent_bits) - 1 {
        if m != 0 {
            Decoded::Nan
        } else {
            Decoded::Infinite
        }
    } else if be == 0 {
        if m == 0 {
            Decoded::Zero
        } else {
            Decoded::Finite(Unpacked {
                mantissa: m,
                exponent: fmt.min_exponent() - mb,
                asymmetric: false,
            })
        }
    } else {
        Decoded::Finite(Unpacked {
            mantissa: m | (1u64 << mb),
            exponent: be - fmt.bias() - mb,
            asymmetric: m == 0 && be > 1,
        })
    };

    (sign, d)
}

/// A primitive binary floating point type.
pub trait Float: Copy {
    /// Layout of the type.
    const FORMAT: FloatFormat;

    /// Bit pattern widened to 64 bits.
    fn to_bits_u64(self) -> u64;

    /// Value from a bit pattern in the low bits of `bits`.
    fn from_bits_u64(bits: u64) -> Self;
}

impl Float for f64 {
    const FORMAT: FloatFormat = FloatFormat::F64;

    #[inline]
    fn to_bits_u64(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_bits_u64(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

impl Float for f32 {
    const FORMAT: FloatFormat = FloatFormat::F32;

    #[inline]
    fn to_bits_u64(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline]
    fn from_bits_u64(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }
}
