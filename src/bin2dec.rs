//! Conversion of a binary floating point number to decimal digits.
//!
//! Both the shortest round-trip digits and a fixed number of correctly rounded digits
//! are computed with a cached power of ten in fixed point first.
//! When the approximation error does not allow a decision, the computation
//! is repeated with exact multi-word arithmetic.

use crate::common::buf::DigitBuf;
use crate::common::buf::WordBuf;
use crate::common::consts::big_pow10;
use crate::common::consts::cached_pow10;
use crate::common::consts::CachedPow10;
use crate::common::consts::SMALL_POW10;
use crate::common::int;
use crate::common::util::dec_len;
use crate::common::util::log10_pow2;
use crate::defs::Fast;
use crate::defs::MAX_EXACT_DIGITS;
use crate::float::Unpacked;
use core::cmp::Ordering;

/// Number of fraction bits of the fixed point numbers of the fast path.
const FRAC_BITS: i32 = 56;

/// Mantissas are normalized to this width before scaling.
const NORM_BITS: i32 = 53;

/// Number of digits the scaled mantissa of the shortest conversion has below its leading digits.
const SHORTEST_SCALE_DIGITS: i32 = 17;

/// Largest digit count of the fixed precision fast path.
const FAST_MAX_DIGITS: u32 = 17;

/// Which digits to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The shortest digits which convert back to the same number; the closest of them.
    Shortest,

    /// The given number of significant digits.
    Significant(u32),

    /// Digits down to the given position after the decimal point.
    Fractional(u32),
}

/// Decimal number `d1.d2d3…·10^exp`.
/// Digits are stored without trailing zeroes, no digits means zero.
#[derive(Debug, Clone, Default)]
pub struct Digits {
    pub buf: DigitBuf,
    pub exp: i32,
}

impl Digits {
    pub fn zero() -> Self {
        Digits { buf: DigitBuf::new(), exp: 0 }
    }

    /// Digits of `n·10^e`.
    fn from_u64(n: u64, e: i32) -> Self {
        if n == 0 {
            return Self::zero();
        }
        let len = dec_len(n);
        let mut buf = DigitBuf::new();
        buf.push_u64(n, len);
        buf.strip_zeros();
        Digits { buf, exp: e + len as i32 - 1 }
    }

    #[cfg(test)]
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Compute `floor(x·c / 2^t)` for the 96-bit significand `c` of the cached power.
#[inline]
fn approx(x: u64, cp: &CachedPow10, t: i32) -> u128 {
    let a = x as u128 * cp.high as u128;
    let b = (x as u128 * cp.low as u128) >> 32;
    (a + b) >> (t - 32)
}

/// Compare an approximated value `X ∈ [xa, xa + err)` with `g`.
/// None if the comparison can not be decided.
#[inline]
fn cmp_approx(xa: u128, err: u128, g: u128) -> Option<Ordering> {
    if g < xa {
        Some(Ordering::Greater)
    } else if g >= xa + err {
        Some(Ordering::Less)
    } else {
        None
    }
}

/// Round half to even the fixed point number `g` to an integer.
#[inline]
fn round_fixed(g: u128) -> u128 {
    let i = g >> FRAC_BITS;
    let f = g & ((1u128 << FRAC_BITS) - 1);
    let half = 1u128 << (FRAC_BITS - 1);
    if f > half || (f == half && i & 1 == 1) {
        i + 1
    } else {
        i
    }
}

/// Scaled boundaries of a number for the shortest conversion.
/// The lower boundary, the number and the upper boundary are `xl·2^qs`, `xv·2^qs`, `xr·2^qs`,
/// and the digits are searched in units of `10^k`.
struct Interval {
    xl: u64,
    xv: u64,
    xr: u64,
    qs: i32,
    k: i32,
    inclusive: bool,
}

impl Interval {
    fn new(u: &Unpacked) -> Self {
        let c = u.mantissa;
        let bl = 64 - c.leading_zeros() as i32;
        let z = NORM_BITS - bl;
        let e2 = u.exponent + bl - 1;
        let dl = if u.asymmetric { 1 } else { 2 };
        Interval {
            xl: (4 * c - dl) << z,
            xv: (4 * c) << z,
            xr: (4 * c + 2) << z,
            qs: u.exponent - 2 - z,
            k: log10_pow2(e2) - SHORTEST_SCALE_DIGITS,
            inclusive: c & 1 == 0,
        }
    }
}

fn shortest_fast(u: &Unpacked) -> Fast<Digits> {
    let iv = Interval::new(u);
    let cp = match cached_pow10(-iv.k) {
        Some(cp) => cp,
        None => return Fast::NeedsExactFallback,
    };

    let t = -(iv.qs + cp.exp + FRAC_BITS);
    if !(32..=127).contains(&t) {
        return Fast::NeedsExactFallback;
    }

    let err = ((iv.xr as u128) >> t) + 2;
    let la = approx(iv.xl, cp, t);
    let va = approx(iv.xv, cp, t);
    let ra = approx(iv.xr, cp, t);

    // is there a multiple of 10^j strictly between the boundaries
    let exists = |j: usize| -> Option<bool> {
        let unit = (SMALL_POW10[j] as u128) << FRAC_BITS;
        let mr = ra / unit * unit;
        if cmp_approx(ra, err, mr + unit)? != Ordering::Less {
            return None;
        }
        if cmp_approx(ra, err, mr)? != Ordering::Greater {
            return None;
        }
        match cmp_approx(la, err, mr)? {
            Ordering::Less => Some(true),
            _ => Some(false),
        }
    };

    if exists(0) != Some(true) {
        return Fast::NeedsExactFallback;
    }

    let mut j = 0;
    while j < 18 {
        match exists(j + 1) {
            Some(true) => j += 1,
            Some(false) => break,
            None => return Fast::NeedsExactFallback,
        }
    }

    let unit = (SMALL_POW10[j] as u128) << FRAC_BITS;
    let lower = va / unit * unit;
    let upper = lower + unit;
    if cmp_approx(va, err, upper) != Some(Ordering::Less) {
        return Fast::NeedsExactFallback;
    }

    let choice = match cmp_approx(va, err, lower + unit / 2) {
        Some(Ordering::Less) => match cmp_approx(la, err, lower) {
            Some(Ordering::Less) => lower,
            Some(Ordering::Greater) => upper,
            _ => return Fast::NeedsExactFallback,
        },
        Some(Ordering::Greater) => match cmp_approx(ra, err, upper) {
            Some(Ordering::Greater) => upper,
            Some(Ordering::Less) => lower,
            _ => return Fast::NeedsExactFallback,
        },
        _ => return Fast::NeedsExactFallback,
    };

    Fast::Definite(Digits::from_u64((choice / unit) as u64, iv.k + j as i32))
}

/// Exactly scaled value: integer part, whether the fraction is zero,
/// and the fraction compared with one half.
struct Scaled {
    int: u64,
    rem_zero: bool,
    half: Ordering,
}

fn shortest_exact(u: &Unpacked) -> Digits {
    let iv = Interval::new(u);

    let pow = big_pow10(iv.k.unsigned_abs());
    let mut den = if iv.k >= 0 { pow.clone() } else { WordBuf::from_word(1) };
    den.shl((-iv.qs).max(0) as usize);

    let scale = |x: u64| -> Scaled {
        let mut num = WordBuf::from_word(x);
        num.shl(iv.qs.max(0) as usize);
        if iv.k < 0 {
            num = num.mul(&pow);
        }
        let (q, mut r) = int::div_rem(&num, &den);
        let rem_zero = r.is_zero();
        r.shl(1);
        let half = int::cmp(&r, &den);
        debug_assert!(q.to_word().is_some());
        Scaled { int: q.to_word().unwrap_or(u64::MAX), rem_zero, half }
    };

    let l = scale(iv.xl);
    let v = scale(iv.xv);
    let r = scale(iv.xr);
    let inclusive = iv.inclusive;

    // L < m, or L == m when the boundary belongs to the interval
    let above_lower = |m: u64| l.int < m || (inclusive && l.int == m && l.rem_zero);

    let exists = |j: usize| -> bool {
        let unit = SMALL_POW10[j];
        let mut mr = r.int / unit * unit;
        if r.rem_zero && r.int == mr && !inclusive {
            match mr.checked_sub(unit) {
                Some(m) => mr = m,
                None => return false,
            }
        }
        above_lower(mr)
    };

    let mut j = 0;
    while j < 18 && exists(j + 1) {
        j += 1;
    }

    let unit = SMALL_POW10[j];
    let lower = v.int / unit * unit;
    let upper = lower + unit;

    let closeness = if j == 0 {
        v.half
    } else {
        match (v.int - lower).cmp(&(unit / 2)) {
            Ordering::Equal if !v.rem_zero => Ordering::Greater,
            o => o,
        }
    };

    let lower_in = above_lower(lower);
    let upper_in = upper < r.int || (upper == r.int && (!r.rem_zero || inclusive));

    let prefer_lower = match closeness {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => (lower / unit) % 2 == 0,
    };

    let choice = if (prefer_lower && lower_in) || (!prefer_lower && !upper_in) {
        lower
    } else {
        upper
    };

    Digits::from_u64(choice / unit, iv.k + j as i32)
}

fn fixed_fast(u: &Unpacked, mode: Mode) -> Fast<Digits> {
    let c = u.mantissa;
    let bl = 64 - c.leading_zeros() as i32;
    let z = NORM_BITS - bl;
    let x = c << z;
    let qs = u.exponent - z;
    let mut est = log10_pow2(u.exponent + bl - 1);

    for _ in 0..2 {
        let kp = match mode {
            Mode::Significant(n) if (1..=FAST_MAX_DIGITS).contains(&n) => est + 1 - n as i32,
            Mode::Fractional(p) => {
                let p = p.min(i32::MAX as u32 / 2) as i32;
                if est + 3 + p <= 0 {
                    return Fast::Definite(Digits::zero());
                }
                if est + 1 + p > FAST_MAX_DIGITS as i32 {
                    return Fast::NeedsExactFallback;
                }
                -p
            }
            _ => return Fast::NeedsExactFallback,
        };

        let cp = match cached_pow10(-kp) {
            Some(cp) => cp,
            None => return Fast::NeedsExactFallback,
        };

        let t = -(qs + cp.exp + FRAC_BITS);
        if !(32..=127).contains(&t) {
            return Fast::NeedsExactFallback;
        }

        let err = ((x as u128) >> t) + 2;
        let ya = approx(x, cp, t);

        let r = round_fixed(ya);
        if r != round_fixed(ya + err) {
            return Fast::NeedsExactFallback;
        }

        if let Mode::Significant(n) = mode {
            let lim = SMALL_POW10[n as usize] as u128;
            if r >= lim {
                if ya >> FRAC_BITS >= lim {
                    // the exponent estimate is one too small
                    est += 1;
                    continue;
                } else if ya + err > lim << FRAC_BITS {
                    return Fast::NeedsExactFallback;
                }
            }
        }

        return Fast::Definite(Digits::from_u64(r as u64, kp));
    }

    Fast::NeedsExactFallback
}

fn fixed_exact(u: &Unpacked, mode: Mode) -> Digits {
    let c = u.mantissa;
    let q = u.exponent;
    let bl = 64 - c.leading_zeros() as i32;
    let mut est = log10_pow2(q + bl - 1);

    // r/s = v/10^est
    let mut r = WordBuf::from_word(c);
    r.shl(q.max(0) as usize);
    let mut s = WordBuf::from_word(1);
    s.shl((-q).max(0) as usize);
    if est >= 0 {
        s = s.mul(&big_pow10(est as u32));
    } else {
        r = r.mul(&big_pow10(est.unsigned_abs()));
    }

    let mut s10 = s.clone();
    s10.mul_add_small(10, 0);
    if int::cmp(&r, &s10) != Ordering::Less {
        est += 1;
        s = s10;
    }

    let count: i64 = match mode {
        Mode::Significant(n) => n as i64,
        Mode::Fractional(p) => est as i64 + 1 + p as i64,
        Mode::Shortest => return shortest_exact(u),
    };

    if count < 0 {
        return Digits::zero();
    }

    if count == 0 {
        // the result is either zero or one unit of the next position, ties to zero
        let mut r2 = r.clone();
        r2.mul_add_small(2, 0);
        let mut s10 = s.clone();
        s10.mul_add_small(10, 0);
        return if int::cmp(&r2, &s10) == Ordering::Greater {
            Digits::from_u64(1, est + 1)
        } else {
            Digits::zero()
        };
    }

    // normalize the divisor, keep one extra word in the dividend for the quotient digit
    s.trim();
    r.trim();
    let sh = s[0].leading_zeros() as usize;
    s.shl(sh);
    r.shl(sh);
    let n = s.len();
    while r.len() < n + 1 {
        r.insert_front(0);
    }
    debug_assert!(r.len() == n + 1);

    let count = count.min(MAX_EXACT_DIGITS as i64) as usize;
    let mut digits = DigitBuf::new();
    let mut exp = est;

    for i in 0..count {
        let d = int::divmod_normalized(&mut r, &s);
        digits.push(d as u8);

        if r.is_zero() {
            break;
        }

        if i + 1 == count {
            // round half to even with the remainder
            int::shift_left(&mut r, 1);
            let up = match int::cmp(&r, &s) {
                Ordering::Greater => true,
                Ordering::Equal => d & 1 == 1,
                Ordering::Less => false,
            };
            if up && digits.round_up() {
                digits.push(1);
                exp += 1;
            }
        } else {
            int::mul_small(&mut r, 10, 0);
        }
    }

    digits.strip_zeros();
    if digits.is_empty() {
        return Digits::zero();
    }

    Digits { buf: digits, exp }
}

/// Convert a finite nonzero binary floating point number to decimal digits.
pub fn fp_dec_fmt(u: &Unpacked, mode: Mode) -> Digits {
    let fast = match mode {
        Mode::Shortest => shortest_fast(u),
        _ => fixed_fast(u, mode),
    };

    match fast {
        Fast::Definite(d) => d,
        Fast::NeedsExactFallback => {
            tracing::trace!(mantissa = u.mantissa, exponent = u.exponent, ?mode, "exact binary to decimal conversion");
            match mode {
                Mode::Shortest => shortest_exact(u),
                _ => fixed_exact(u, mode),
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::float::decode;
    use crate::float::Decoded;
    use crate::float::FloatFormat;
    use rand::random;

    fn unpack(v: f64) -> Unpacked {
        match decode(v.to_bits(), &FloatFormat::F64).1 {
            Decoded::Finite(u) => u,
            _ => panic!("not a finite number"),
        }
    }

    fn unpack32(v: f32) -> Unpacked {
        match decode(v.to_bits() as u64, &FloatFormat::F32).1 {
            Decoded::Finite(u) => u,
            _ => panic!("not a finite number"),
        }
    }

    fn to_string(d: &Digits) -> String {
        let mut s = String::new();
        for c in d.buf.iter() {
            s.push((b'0' + c) as char);
        }
        format!("{}e{}", s, d.exp)
    }

    /// Number text `d1.d2d3…e<exp>` which parses back to the value of `d`.
    fn to_number_text(d: &Digits) -> String {
        let mut s = String::new();
        for (i, c) in d.buf.iter().enumerate() {
            if i == 1 {
                s.push('.');
            }
            s.push((b'0' + c) as char);
        }
        format!("{}e{}", s, d.exp)
    }

    /// Digits and exponent of the std `{:e}` output.
    fn std_digits(s: &str) -> String {
        let (m, e) = s.split_once('e').unwrap();
        let mut m = m.replace('.', "");
        while m.len() > 1 && m.ends_with('0') {
            m.pop();
        }
        format!("{}e{}", m, e)
    }

    #[test]
    fn test_shortest_known() {
        assert!(to_string(&fp_dec_fmt(&unpack(1.0), Mode::Shortest)) == "1e0");
        assert!(to_string(&fp_dec_fmt(&unpack(0.1), Mode::Shortest)) == "1e-1");
        assert!(to_string(&fp_dec_fmt(&unpack(3.14159265358979), Mode::Shortest)) == "314159265358979e0");
        assert!(to_string(&fp_dec_fmt(&unpack(1e23), Mode::Shortest)) == "1e23");
        assert!(to_string(&fp_dec_fmt(&unpack(f64::MAX), Mode::Shortest)) == "17976931348623157e308");
        assert!(to_string(&fp_dec_fmt(&unpack(f64::MIN_POSITIVE), Mode::Shortest)) == "22250738585072014e-308");
        assert!(to_string(&fp_dec_fmt(&unpack(5e-324), Mode::Shortest)) == "5e-324");
        assert!(to_string(&fp_dec_fmt(&unpack32(0.1), Mode::Shortest)) == "1e-1");
        assert!(to_string(&fp_dec_fmt(&unpack32(f32::MAX), Mode::Shortest)) == "34028235e38");
        assert!(to_string(&fp_dec_fmt(&unpack32(1e-45), Mode::Shortest)) == "1e-45");

        // 2^50 + 1/4 lies exactly between two shortest candidates
        let v = 1125899906842624.25;
        assert!(to_string(&fp_dec_fmt(&unpack(v), Mode::Shortest)) == "11258999068426242e15");
        assert!(to_string(&shortest_exact(&unpack(v))) == "11258999068426242e15");

        let d = fp_dec_fmt(&unpack(7.001968430049076e34), Mode::Shortest);
        assert!(to_number_text(&d) == "7.001968430049076e34");
        assert!(to_number_text(&fp_dec_fmt(&unpack(5e-324), Mode::Shortest)) == "5e-324");
    }

    #[test]
    fn test_shortest_random() {
        for _ in 0..20000 {
            let v = f64::from_bits(random::<u64>() & !(1 << 63));
            if !v.is_finite() || v == 0.0 {
                continue;
            }
            let u = unpack(v);
            let d = fp_dec_fmt(&u, Mode::Shortest);
            let s = to_string(&d);
            let expected = std_digits(&format!("{:e}", v));
            assert!(s.len() == expected.len(), "{} {}", s, expected);

            let t = to_number_text(&d);
            let back: f64 = t.parse().unwrap();
            assert!(back.to_bits() == v.to_bits(), "{} {:e}", t, v);

            if let Fast::Definite(f) = shortest_fast(&u) {
                assert!(to_string(&f) == to_string(&shortest_exact(&u)));
            }
        }

        for _ in 0..10000 {
            let v = f32::from_bits(random::<u32>() & !(1 << 31));
            if !v.is_finite() || v == 0.0 {
                continue;
            }
            let d = fp_dec_fmt(&unpack32(v), Mode::Shortest);
            let s = to_string(&d);
            let expected = std_digits(&format!("{:e}", v));
            assert!(s.len() == expected.len(), "{} {}", s, expected);
            let t = to_number_text(&d);
            let back: f32 = t.parse().unwrap();
            assert!(back.to_bits() == v.to_bits(), "{} {:e}", t, v);
        }
    }

    #[test]
    fn test_fixed_known() {
        // exact expansion of the smallest subnormal
        let d = fp_dec_fmt(&unpack(5e-324), Mode::Significant(MAX_EXACT_DIGITS as u32));
        assert!(d.buf.len() == 751);
        assert!(d.exp == -324);
        assert!(to_string(&d).starts_with("49406564584124654417656879286822137236505980"));
        assert!(d.buf[750] == 5);

        assert!(to_string(&fp_dec_fmt(&unpack(0.125), Mode::Significant(2))) == "12e-1");
        assert!(to_string(&fp_dec_fmt(&unpack(0.375), Mode::Significant(2))) == "38e-1");
        assert!(to_string(&fp_dec_fmt(&unpack(0.125), Mode::Fractional(2))) == "12e-1");
        assert!(to_string(&fp_dec_fmt(&unpack(2.5), Mode::Fractional(0))) == "2e0");
        assert!(to_string(&fp_dec_fmt(&unpack(3.5), Mode::Fractional(0))) == "4e0");
        assert!(fp_dec_fmt(&unpack(0.5), Mode::Fractional(0)).is_zero());
        assert!(to_string(&fp_dec_fmt(&unpack(0.51), Mode::Fractional(0))) == "1e0");
        assert!(fp_dec_fmt(&unpack(0.001), Mode::Fractional(1)).is_zero());
        assert!(to_string(&fp_dec_fmt(&unpack(9.96), Mode::Significant(2))) == "1e1");
        assert!(to_string(&fp_dec_fmt(&unpack(999.9), Mode::Fractional(0))) == "1e3");
        assert!(to_string(&fp_dec_fmt(&unpack(1e22), Mode::Significant(1))) == "1e22");
        assert!(to_string(&fp_dec_fmt(&unpack(0.1), Mode::Significant(20))) == "10000000000000000555e-1");
        assert!(to_string(&fp_dec_fmt(&unpack(0.1), Mode::Fractional(20))) == "10000000000000000555e-1");
        assert!(to_string(&fp_dec_fmt(&unpack(0.0009765625), Mode::Fractional(5))) == "98e-4");
        assert!(to_string(&fp_dec_fmt(&unpack(0.0009765625), Mode::Fractional(10))) == "9765625e-4");
    }

    /// True if rounding the exact expansion at the digit with exponent `pos` is a tie.
    fn is_tie(u: &Unpacked, pos: i32) -> bool {
        let full = fixed_exact(u, Mode::Significant(MAX_EXACT_DIGITS as u32));
        let last = full.exp - full.buf.len() as i32 + 1;
        last == pos - 1 && full.buf[full.buf.len() - 1] == 5
    }

    #[test]
    fn test_fixed_random() {
        for _ in 0..3000 {
            let v = f64::from_bits(random::<u64>() & !(1 << 63));
            if !v.is_finite() || v == 0.0 {
                continue;
            }
            let n = 1 + random::<u32>() % 25;
            let u = unpack(v);
            let x10 = fixed_exact(&u, Mode::Significant(MAX_EXACT_DIGITS as u32)).exp;
            if is_tie(&u, x10 - n as i32 + 1) {
                continue;
            }
            let d = fp_dec_fmt(&u, Mode::Significant(n));
            let expected = std_digits(&format!("{:.*e}", n as usize - 1, v));
            assert!(to_string(&d) == expected, "{} {}", to_string(&d), expected);

            if let Fast::Definite(f) = fixed_fast(&u, Mode::Significant(n)) {
                assert!(to_string(&f) == to_string(&fixed_exact(&u, Mode::Significant(n))));
            }
        }

        for _ in 0..3000 {
            let v = random::<f64>() * 10f64.powi((random::<u32>() % 40) as i32 - 20);
            if v == 0.0 {
                continue;
            }
            let p = random::<u32>() % 25;
            let u = unpack(v);
            if is_tie(&u, -(p as i32)) {
                continue;
            }

            let d = fp_dec_fmt(&u, Mode::Fractional(p));
            if let Fast::Definite(f) = fixed_fast(&u, Mode::Fractional(p)) {
                assert!(to_string(&f) == to_string(&fixed_exact(&u, Mode::Fractional(p))), "{:e} {}", v, p);
            }

            // digits of the std output without the point and the surrounding zeroes
            let s = format!("{:.*}", p as usize, v).replace('.', "");
            let expected = s.trim_start_matches('0').trim_end_matches('0');
            let got: String = d.buf.iter().map(|c| (b'0' + c) as char).collect();
            assert!(got == expected, "{:e} {} {} {}", v, p, got, expected);
        }
    }
}
