//! Arithmetic on multi-word unsigned integers.
//! Words are stored with the most significant word first.

use crate::common::buf::WordBuf;
use crate::common::util::add_carry;
use crate::common::util::mul_add_carry;
use crate::common::util::sub_borrow;
use crate::defs::DoubleWord;
use crate::defs::Word;
use crate::defs::WORD_BASE;
use crate::defs::WORD_BIT_SIZE;
use crate::defs::WORD_MAX;
use core::cmp::Ordering;
use itertools::izip;

/// Multiply `words` by `m` and add `carry` in place, return the outgoing carry.
pub fn mul_small(words: &mut [Word], m: Word, mut carry: Word) -> Word {
    for w in words.iter_mut().rev() {
        let (lo, hi) = mul_add_carry(*w, m, 0, carry);
        *w = lo;
        carry = hi;
    }
    carry
}

/// Multiply `a` by `b` and store the result in `dst`.
/// `dst` must be zeroed and have length `a.len() + b.len()`.
pub fn mul_vec(a: &[Word], b: &[Word], dst: &mut [Word]) {
    let ld = dst.len();
    debug_assert!(ld == a.len() + b.len());
    for (i, &x) in a.iter().rev().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0;
        for (j, &y) in b.iter().rev().enumerate() {
            let idx = ld - 1 - i - j;
            let (lo, hi) = mul_add_carry(x, y, dst[idx], carry);
            dst[idx] = lo;
            carry = hi;
        }
        dst[ld - 1 - i - b.len()] = carry;
    }
}

/// Shift `words` left by `bits < WORD_BIT_SIZE`, return the bits shifted out.
pub fn shift_left(words: &mut [Word], bits: usize) -> Word {
    debug_assert!(bits < WORD_BIT_SIZE);
    if bits == 0 {
        return 0;
    }
    let mut carry = 0;
    for w in words.iter_mut().rev() {
        let out = *w >> (WORD_BIT_SIZE - bits);
        *w = (*w << bits) | carry;
        carry = out;
    }
    carry
}

/// Shift `words` right by `bits < WORD_BIT_SIZE`, the vacated high bits are taken from `incoming`.
/// Return the bits shifted out, aligned to the low end of the word.
pub fn shift_right(words: &mut [Word], bits: usize, incoming: Word) -> Word {
    debug_assert!(bits < WORD_BIT_SIZE);
    if bits == 0 {
        return 0;
    }
    let mask = WORD_MAX >> (WORD_BIT_SIZE - bits);
    let mut carry = incoming & mask;
    for w in words.iter_mut() {
        let out = *w & mask;
        *w = (*w >> bits) | (carry << (WORD_BIT_SIZE - bits));
        carry = out;
    }
    carry
}

/// Compare two numbers ignoring leading zero words.
pub fn cmp(a: &[Word], b: &[Word]) -> Ordering {
    let a = strip(a);
    let b = strip(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[inline]
fn strip(a: &[Word]) -> &[Word] {
    let nz = a.iter().take_while(|w| **w == 0).count();
    &a[nz..]
}

/// One step of the long division.
/// `num` has `n+1` words, `den` has `n` words with the most significant bit set,
/// and `num[..n] < den`. Replace `num` with the remainder and return the quotient word.
pub fn divmod_normalized(num: &mut [Word], den: &[Word]) -> Word {
    let n = den.len();
    debug_assert!(num.len() == n + 1);
    debug_assert!(den[0] >> (WORD_BIT_SIZE - 1) == 1);

    let d1 = den[0];
    let d2 = if n > 1 { den[1] } else { 0 };
    let n2 = if n > 1 { num[2] } else { 0 };

    let top = ((num[0] as DoubleWord) << WORD_BIT_SIZE) | num[1] as DoubleWord;
    let (mut qhat, mut rhat) = if num[0] >= d1 {
        (WORD_MAX as DoubleWord, top - WORD_MAX as DoubleWord * d1 as DoubleWord)
    } else {
        (top / d1 as DoubleWord, top % d1 as DoubleWord)
    };

    while rhat < WORD_BASE && qhat * d2 as DoubleWord > ((rhat << WORD_BIT_SIZE) | n2 as DoubleWord) {
        qhat -= 1;
        rhat += d1 as DoubleWord;
    }

    let mut qhat = qhat as Word;

    // multiply and subtract
    let mut carry = 0;
    let mut borrow = 0;
    for (x, d) in izip!(num[1..].iter_mut().rev(), den.iter().rev()) {
        let (lo, hi) = mul_add_carry(qhat, *d, carry, 0);
        carry = hi;
        let v = *x;
        borrow = sub_borrow(v, lo, borrow, x);
    }
    let x = num[0];
    let borrow = sub_borrow(x, carry, borrow, &mut num[0]);

    if borrow != 0 {
        // add back
        qhat -= 1;
        let mut c = 0;
        for (x, d) in izip!(num[1..].iter_mut().rev(), den.iter().rev()) {
            let v = *x;
            c = add_carry(v, *d, c, x);
        }
        num[0] = num[0].wrapping_add(c);
    }

    qhat
}

/// Divide `num` by nonzero `den`, return the quotient and the remainder.
pub fn div_rem(num: &[Word], den: &[Word]) -> (WordBuf, WordBuf) {
    let num = strip(num);
    let den = strip(den);
    debug_assert!(!den.is_empty());

    if cmp(num, den) == Ordering::Less {
        return (WordBuf::new(), WordBuf::from_slice(num));
    }

    let sh = den[0].leading_zeros() as usize;

    let mut d = WordBuf::from_slice(den);
    shift_left(&mut d, sh);

    let mut n = WordBuf::from_slice(num);
    n.insert_front(0);
    shift_left(&mut n, sh);

    let dn = d.len();
    let nn = n.len();

    let mut q = WordBuf::new();
    for j in 0..nn - dn {
        let qw = divmod_normalized(&mut n[j..j + dn + 1], &d);
        q.push_low(qw);
    }
    q.trim();

    let mut r = WordBuf::from_slice(&n[nn - dn..]);
    shift_right(&mut r, sh, 0);
    r.trim();

    (q, r)
}
