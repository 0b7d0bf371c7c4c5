//! Auxiliary functions.

use crate::defs::DoubleWord;
use crate::defs::Word;
use crate::defs::WORD_BIT_SIZE;

/// Add words `a`, `b` and carry `c`, store the result in `r`, return the new carry.
#[inline]
pub fn add_carry(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    let s = a as DoubleWord + b as DoubleWord + c as DoubleWord;
    *r = s as Word;
    (s >> WORD_BIT_SIZE) as Word
}

/// Subtract word `b` and borrow `c` from `a`, store the result in `r`, return the new borrow.
#[inline]
pub fn sub_borrow(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    let (d, o1) = a.overflowing_sub(b);
    let (d, o2) = d.overflowing_sub(c);
    *r = d;
    (o1 | o2) as Word
}

/// Compute `a*b + add + carry`, return the low and the high words.
#[inline]
pub fn mul_add_carry(a: Word, b: Word, add: Word, carry: Word) -> (Word, Word) {
    let p = a as DoubleWord * b as DoubleWord + add as DoubleWord + carry as DoubleWord;
    (p as Word, (p >> WORD_BIT_SIZE) as Word)
}

/// Floor of `log10(2^e)`. Exact for `|e| <= 1650`.
#[inline]
pub fn log10_pow2(e: i32) -> i32 {
    ((e as i64 * 78913) >> 18) as i32
}

/// Floor of `log2(10^e)`. Exact for `|e| <= 1500`.
#[inline]
pub fn log2_pow10(e: i32) -> i32 {
    let m = e.unsigned_abs() as i64;
    let l = m + ((m * 1217359) >> 19);
    if e >= 0 {
        l as i32
    } else {
        -(l as i32) - 1
    }
}

/// Number of decimal digits in `n`, 1 for zero.
#[inline]
pub fn dec_len(n: u64) -> usize {
    let mut l = 1;
    let mut p = 10u64;
    while l < 20 && n >= p {
        l += 1;
        p = p.wrapping_mul(10);
    }
    l
}
