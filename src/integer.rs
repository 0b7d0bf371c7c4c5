//! Conversion of primitive integers to and from text.

use crate::common::consts::DEC_DIGITS_LUT;
use crate::common::consts::DIGIT_CHARS;
use crate::common::consts::DIGIT_CHARS_UPPER;
use crate::common::consts::DIGIT_VALUE;
use crate::defs::Radix;

/// Longest text of a 64-bit integer: 64 binary digits and a sign.
const INT_BUF_LEN: usize = 65;

/// A primitive integer type of at most 64 bits.
pub trait Integer: Copy {
    /// The type has negative values.
    const SIGNED: bool;

    /// Return whether the value is negative and its magnitude.
    fn to_parts(self) -> (bool, u64);

    /// Value from a sign and a magnitude, saturated at the bounds of the type.
    /// `overflow` means the magnitude itself did not fit in 64 bits.
    fn from_parts_saturating(neg: bool, mag: u64, overflow: bool) -> Self;
}

macro_rules! impl_unsigned {
    ($($t:ty)*) => {$(
        impl Integer for $t {
            const SIGNED: bool = false;

            #[inline]
            fn to_parts(self) -> (bool, u64) {
                (false, self as u64)
            }

            #[inline]
            fn from_parts_saturating(neg: bool, mag: u64, overflow: bool) -> Self {
                if neg {
                    0
                } else if overflow || mag > <$t>::MAX as u64 {
                    <$t>::MAX
                } else {
                    mag as $t
                }
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty)*) => {$(
        impl Integer for $t {
            const SIGNED: bool = true;

            #[inline]
            fn to_parts(self) -> (bool, u64) {
                (self < 0, (self as i64).unsigned_abs())
            }

            #[inline]
            fn from_parts_saturating(neg: bool, mag: u64, overflow: bool) -> Self {
                if neg {
                    if overflow || mag > (<$t>::MIN as i64).unsigned_abs() {
                        <$t>::MIN
                    } else {
                        (mag as i64).wrapping_neg() as $t
                    }
                } else if overflow || mag > <$t>::MAX as u64 {
                    <$t>::MAX
                } else {
                    mag as $t
                }
            }
        }
    )*};
}

impl_unsigned!(u8 u16 u32 u64 usize);
impl_signed!(i8 i16 i32 i64 isize);

/// Text of an integer.
pub struct IntBuf {
    buf: [u8; INT_BUF_LEN],
    start: usize,
}

impl IntBuf {
    /// ASCII text of the integer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}

/// Digits of `n` in radix `rdx`.
pub fn to_unsigned(mut n: u64, rdx: Radix, uppercase: bool) -> IntBuf {
    let mut buf = [0u8; INT_BUF_LEN];
    let mut cur = INT_BUF_LEN;

    match rdx {
        Radix::Dec => {
            while n >= 100 {
                let d = (n % 100) as usize * 2;
                n /= 100;
                cur -= 2;
                buf[cur..cur + 2].copy_from_slice(&DEC_DIGITS_LUT[d..d + 2]);
            }
            if n >= 10 {
                let d = n as usize * 2;
                cur -= 2;
                buf[cur..cur + 2].copy_from_slice(&DEC_DIGITS_LUT[d..d + 2]);
            } else {
                cur -= 1;
                buf[cur] = b'0' + n as u8;
            }
        }
        _ => {
            let chars = if uppercase { &DIGIT_CHARS_UPPER } else { &DIGIT_CHARS };
            let bits = match rdx {
                Radix::Bin => 1,
                Radix::Oct => 3,
                _ => 4,
            };
            let mask = (1u64 << bits) - 1;
            loop {
                cur -= 1;
                buf[cur] = chars[(n & mask) as usize];
                n >>= bits;
                if n == 0 {
                    break;
                }
            }
        }
    }

    IntBuf { buf, start: cur }
}

/// Digits of a signed value given as a sign and a magnitude, with a leading `-` if negative.
pub fn to_signed(neg: bool, mag: u64, rdx: Radix, uppercase: bool) -> IntBuf {
    let mut ret = to_unsigned(mag, rdx, uppercase);
    if neg {
        ret.start -= 1;
        ret.buf[ret.start] = b'-';
    }
    ret
}

/// Parse an optionally signed integer in radix `rdx` into `T`, saturating at the bounds of `T`.
/// `-` is accepted only if `T` is signed.
/// Return the value and the number of bytes consumed, 0 if the input is not a number.
pub fn from_digits<T: Integer>(s: &[u8], rdx: Radix) -> (T, usize) {
    let mut pos = 0;
    let mut neg = false;
    match s.first() {
        Some(b'+') => pos += 1,
        Some(b'-') if T::SIGNED => {
            neg = true;
            pos += 1;
        }
        _ => {}
    };

    let base = rdx as u64;
    let start = pos;
    let mut mag: u64 = 0;
    let mut overflow = false;

    while let Some(&c) = s.get(pos) {
        let d = DIGIT_VALUE[c as usize] as u64;
        if d >= base {
            break;
        }
        match mag.checked_mul(base).and_then(|m| m.checked_add(d)) {
            Some(m) => mag = m,
            None => overflow = true,
        }
        pos += 1;
    }

    if pos == start {
        return (T::from_parts_saturating(false, 0, false), 0);
    }

    (T::from_parts_saturating(neg, mag, overflow), pos)
}

/// Parse an unsigned integer saturating at `u64::MAX`.
pub fn from_unsigned(s: &[u8], rdx: Radix) -> (u64, usize) {
    from_digits::<u64>(s, rdx)
}

/// Parse a signed integer saturating at the bounds of `i64`.
pub fn from_signed(s: &[u8], rdx: Radix) -> (i64, usize) {
    from_digits::<i64>(s, rdx)
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::random;

    #[test]
    fn test_to_text() {
        assert!(to_unsigned(0, Radix::Dec, false).as_bytes() == b"0");
        assert!(to_unsigned(7, Radix::Dec, false).as_bytes() == b"7");
        assert!(to_unsigned(42, Radix::Dec, false).as_bytes() == b"42");
        assert!(to_unsigned(100, Radix::Dec, false).as_bytes() == b"100");
        assert!(to_unsigned(u64::MAX, Radix::Dec, false).as_bytes() == b"18446744073709551615");
        assert!(to_unsigned(u64::MAX, Radix::Bin, false).as_bytes() == [b'1'; 64]);
        assert!(to_unsigned(0o755, Radix::Oct, false).as_bytes() == b"755");
        assert!(to_unsigned(0xbeef, Radix::Hex, false).as_bytes() == b"beef");
        assert!(to_unsigned(0xbeef, Radix::Hex, true).as_bytes() == b"BEEF");
        assert!(to_unsigned(0, Radix::Hex, true).as_bytes() == b"0");

        let (neg, mag) = i64::MIN.to_parts();
        assert!(to_signed(neg, mag, Radix::Dec, false).as_bytes() == b"-9223372036854775808");
        let (neg, mag) = i64::MIN.to_parts();
        assert!(to_signed(neg, mag, Radix::Bin, false).as_bytes().len() == 65);
        let (neg, mag) = (-255i16).to_parts();
        assert!(to_signed(neg, mag, Radix::Hex, false).as_bytes() == b"-ff");
    }

    #[test]
    fn test_from_text() {
        assert!(from_unsigned(b"18446744073709551615", Radix::Dec) == (u64::MAX, 20));
        assert!(from_unsigned(b"18446744073709551616", Radix::Dec) == (u64::MAX, 20));
        assert!(from_unsigned(b"+12x", Radix::Dec) == (12, 3));
        assert!(from_unsigned(b"-12", Radix::Dec) == (0, 0));
        assert!(from_unsigned(b"ff", Radix::Hex) == (255, 2));
        assert!(from_unsigned(b"FFg", Radix::Hex) == (255, 2));
        assert!(from_unsigned(b"1012", Radix::Bin) == (5, 3));
        assert!(from_unsigned(b"789", Radix::Oct) == (7, 1));
        assert!(from_unsigned(b"", Radix::Dec) == (0, 0));
        assert!(from_unsigned(b"+", Radix::Dec) == (0, 0));

        assert!(from_signed(b"-9223372036854775808", Radix::Dec) == (i64::MIN, 20));
        assert!(from_signed(b"-9223372036854775809", Radix::Dec) == (i64::MIN, 20));
        assert!(from_signed(b"9223372036854775808", Radix::Dec) == (i64::MAX, 19));
        assert!(from_signed(b"-99999999999999999999999", Radix::Dec) == (i64::MIN, 24));
        assert!(from_signed(b"-", Radix::Dec) == (0, 0));

        assert!(from_digits::<i8>(b"-128", Radix::Dec) == (-128, 4));
        assert!(from_digits::<i8>(b"-129", Radix::Dec) == (-128, 4));
        assert!(from_digits::<i8>(b"128", Radix::Dec) == (127, 3));
        assert!(from_digits::<u8>(b"256", Radix::Dec) == (255, 3));
        assert!(from_digits::<u16>(b"-1", Radix::Dec) == (0, 0));
    }

    #[test]
    fn test_round_trip() {
        for v in i8::MIN..=i8::MAX {
            let (neg, mag) = v.to_parts();
            for rdx in [Radix::Bin, Radix::Oct, Radix::Dec, Radix::Hex] {
                let b = to_signed(neg, mag, rdx, false);
                assert!(from_digits::<i8>(b.as_bytes(), rdx) == (v, b.as_bytes().len()));
            }
        }
        for v in 0..=u8::MAX {
            let b = to_unsigned(v as u64, Radix::Dec, false);
            assert!(from_digits::<u8>(b.as_bytes(), Radix::Dec) == (v, b.as_bytes().len()));
        }
        for v in i16::MIN..=i16::MAX {
            let (neg, mag) = v.to_parts();
            let b = to_signed(neg, mag, Radix::Dec, false);
            assert!(from_digits::<i16>(b.as_bytes(), Radix::Dec) == (v, b.as_bytes().len()));
        }
        for _ in 0..10000 {
            let v: i64 = random();
            let (neg, mag) = v.to_parts();
            let b = to_signed(neg, mag, Radix::Dec, true);
            let expected = v.to_string();
            assert!(b.as_bytes() == expected.as_bytes());
            assert!(from_signed(b.as_bytes(), Radix::Dec) == (v, expected.len()));

            let u: u64 = random();
            let b = to_unsigned(u, Radix::Hex, false);
            assert!(b.as_bytes() == format!("{:x}", u).as_bytes());
        }
    }
}
