//! Conversion of a decimal number to the nearest binary floating point number.

use crate::common::buf::WordBuf;
use crate::common::consts::big_pow10;
use crate::common::consts::cached_pow10;
use crate::common::int::div_rem;
use crate::defs::Fast;
use crate::float::FloatFormat;
use crate::parser::Decimal;

/// Number of quotient bits the exact division produces at minimum.
const EXACT_QUOTIENT_BITS: usize = 65;

/// Round `m·2^e2` to format `fmt`, where `m` has the most significant bit set
/// and `sticky` tells whether the exact value is above `m·2^e2`.
/// Return the unsigned bit pattern.
pub fn round_to_format(m: u64, e2: i32, sticky: bool, fmt: &FloatFormat) -> u64 {
    debug_assert!(m >> 63 == 1);

    let mb = fmt.mantissa_bits as i32;
    let e = e2 + 63;
    if e > fmt.bias() {
        return fmt.infinity_bits();
    }

    let shift = (63 - mb).max(fmt.min_exponent() - mb - e2);
    if shift > 64 {
        return 0;
    }

    let m = m as u128;
    let mut q = (m >> shift) as u64;
    let rem = m & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    if rem > half || (rem == half && (sticky || q & 1 == 1)) {
        q += 1;
    }

    if e >= fmt.min_exponent() {
        // the implicit bit of q increments the exponent field, a carry out of the mantissa as well
        let bits = (((e + fmt.bias() - 1) as u64) << mb) + q;
        bits.min(fmt.infinity_bits())
    } else {
        q
    }
}

/// Convert using a cached power of ten.
/// The cached power is truncated, so the exact product lies in `[P, P + mantissa)`
/// where `P` is the product with the cached power.
/// The result is definite when both bounds round to the same value.
pub fn fp10_to_fp2_fast(dec: &Decimal, fmt: &FloatFormat) -> Fast<u64> {
    if dec.tail {
        return Fast::NeedsExactFallback;
    }

    let (w, cp) = match (dec.to_word(), cached_pow10(dec.exp)) {
        (Some(w), Some(cp)) if w != 0 => (w, cp),
        _ => return Fast::NeedsExactFallback,
    };

    let lz = w.leading_zeros() as i32;
    let d = w << lz;

    let a = d as u128 * cp.high as u128;
    let b = d as u128 * cp.low as u128;
    let top = a + (b >> 32);
    let bottom = b as u32;

    let lower = (top, bottom != 0);

    let s = bottom as u128 + d as u128;
    let upper = (top + (s >> 32), s as u32 != 0);

    let round = |(t, sticky): (u128, bool)| {
        let tz = t.leading_zeros();
        let t = t << tz;
        let m = (t >> 64) as u64;
        let sticky = sticky || t as u64 != 0;
        let e2 = 96 - tz as i32 + cp.exp - lz;
        round_to_format(m, e2, sticky, fmt)
    };

    let lo = round(lower);
    let hi = round(upper);

    if lo == hi {
        Fast::Definite(lo)
    } else {
        Fast::NeedsExactFallback
    }
}

/// Convert using exact multi-word arithmetic.
pub fn fp10_to_fp2_exact(dec: &Decimal, fmt: &FloatFormat) -> u64 {
    if dec.exp >= 0 {
        let mut v = dec.words.clone();
        v.mul_pow10(dec.exp as u32);
        let (m, e, sticky) = v.top_word();
        round_to_format(m, e, sticky || dec.tail, fmt)
    } else {
        let den = big_pow10(dec.exp.unsigned_abs());
        let s = (den.bit_len() + EXACT_QUOTIENT_BITS).saturating_sub(dec.words.bit_len());

        let mut num: WordBuf = dec.words.clone();
        num.shl(s);

        let (q, r) = div_rem(&num, &den);
        let (m, e, sticky) = q.top_word();
        round_to_format(m, e - s as i32, sticky || dec.tail || !r.is_zero(), fmt)
    }
}

/// Convert a decimal number to the unsigned bit pattern of the nearest number of format `fmt`,
/// ties to even. Results beyond the range saturate to infinity or zero.
pub fn fp10_to_fp2(dec: &Decimal, fmt: &FloatFormat) -> u64 {
    if dec.is_zero() {
        return 0;
    }

    let de = dec.digits as i64 + dec.exp as i64;
    if de <= fmt.min_decimal_exp() as i64 {
        return 0;
    }
    if de - 1 >= fmt.max_decimal_exp() as i64 {
        return fmt.infinity_bits();
    }

    match fp10_to_fp2_fast(dec, fmt) {
        Fast::Definite(bits) => bits,
        Fast::NeedsExactFallback => {
            tracing::trace!(digits = dec.digits, exp = dec.exp, tail = dec.tail, "exact decimal to binary conversion");
            fp10_to_fp2_exact(dec, fmt)
        }
    }
}
