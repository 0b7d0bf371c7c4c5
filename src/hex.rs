//! Hexadecimal floating point numbers: `0x1.8p+3`.

use crate::common::buf::DigitBuf;
use crate::common::consts::DIGIT_VALUE;
use crate::dec2bin::round_to_format;
use crate::float::FloatFormat;
use crate::float::Unpacked;
use crate::parser::parse_exponent;

/// Number of hexadecimal digits in a word.
const WORD_NIBBLES: u32 = 16;

/// Bound of the binary exponent read from text.
const EXP_CLAMP: i64 = 100_000_000;

/// Hexadecimal number `1.h1h2…·2^exp`, fraction digits without trailing zeroes.
#[derive(Debug, Clone, Default)]
pub struct HexDigits {
    pub frac: DigitBuf,
    pub exp: i32,
}

/// Convert a finite nonzero number to hexadecimal digits.
/// With `precision` the fraction is rounded half to even to that many digits.
pub fn fp_hex_fmt(u: &Unpacked, precision: Option<u32>) -> HexDigits {
    let (m, lz) = u.normalized();
    let mut exp = u.exponent - lz as i32 + 63;

    // fraction bits aligned to the top of the word
    let mut frac = m << 1;

    if let Some(p) = precision.filter(|p| *p < WORD_NIBBLES) {
        let keep = 4 * p;
        let wide = (frac as u128) << keep;
        let mut kept = (wide >> 64) as u64;
        let rem = wide as u64;
        let half = 1u64 << 63;
        // without fraction digits the last kept digit is the leading one
        if rem > half || (rem == half && (keep == 0 || kept & 1 == 1)) {
            kept += 1;
            if keep == 0 || kept >> keep != 0 {
                // carry into the leading digit
                kept = 0;
                exp += 1;
            }
        }
        frac = if keep == 0 { 0 } else { kept << (64 - keep) };
    }

    let mut digits = DigitBuf::new();
    while frac != 0 {
        digits.push((frac >> 60) as u8);
        frac <<= 4;
    }

    HexDigits { frac: digits, exp }
}

/// Parse a hexadecimal floating point number `[+-]0x<hex>[.<hex>][p[+-]<dec>]`
/// into the bit pattern of format `fmt`, rounding half to even.
/// Return the bit pattern and the number of bytes consumed, 0 if the input is not a number.
pub fn parse_hex_float(s: &[u8], fmt: &FloatFormat) -> (u64, usize) {
    let mut pos = 0;
    let mut sign = 0;
    match s.first() {
        Some(b'+') => pos += 1,
        Some(b'-') => {
            sign = fmt.sign_bit();
            pos += 1;
        }
        _ => {}
    };

    if s.get(pos) != Some(&b'0') {
        return (0, 0);
    }
    // a lone "0" is still a number if the prefix is incomplete
    let zero_end = pos + 1;
    if !matches!(s.get(pos + 1), Some(b'x' | b'X')) {
        return (sign, zero_end);
    }
    pos += 2;

    let mut m: u64 = 0;
    let mut nibbles = 0;
    let mut sticky = false;
    let mut exp: i64 = 0;
    let mut seen = false;

    let mut push = |d: u8, frac: bool, exp: &mut i64| {
        if m == 0 && d == 0 {
            if frac {
                *exp -= 4;
            }
        } else if nibbles < WORD_NIBBLES {
            m = (m << 4) | d as u64;
            nibbles += 1;
            if frac {
                *exp -= 4;
            }
        } else {
            sticky |= d != 0;
            if !frac {
                *exp += 4;
            }
        }
    };

    while let Some(&c) = s.get(pos) {
        let d = DIGIT_VALUE[c as usize];
        if d > 15 {
            break;
        }
        push(d, false, &mut exp);
        seen = true;
        pos += 1;
    }

    if s.get(pos) == Some(&b'.') {
        let mut p = pos + 1;
        while let Some(&c) = s.get(p) {
            let d = DIGIT_VALUE[c as usize];
            if d > 15 {
                break;
            }
            push(d, true, &mut exp);
            seen = true;
            p += 1;
        }
        if seen {
            pos = p;
        }
    }

    if !seen {
        return (sign, zero_end);
    }

    if matches!(s.get(pos), Some(b'p' | b'P')) {
        if let Some((e, p)) = parse_exponent(s, pos + 1) {
            exp += e;
            pos = p;
        }
    }

    if m == 0 {
        return (sign, pos);
    }

    let lz = m.leading_zeros();
    let e2 = exp.clamp(-EXP_CLAMP, EXP_CLAMP) as i32 - lz as i32;
    (sign | round_to_format(m << lz, e2, sticky, fmt), pos)
}
