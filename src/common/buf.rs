//! Buffers for holding multi-word integers and decimal digits.

use crate::common::int;
use crate::defs::Word;
use crate::defs::BIG_CAPACITY;
use crate::defs::MAX_EXACT_DIGITS;
use crate::defs::WORD_BIT_SIZE;
use core::ops::Deref;
use core::ops::DerefMut;
use core::ops::Index;
use core::ops::IndexMut;
use core::slice::SliceIndex;
use smallvec::SmallVec;

/// Multi-word unsigned integer. The most significant word goes first.
/// An empty buffer represents zero.
#[derive(Debug, Clone, Default)]
pub struct WordBuf {
    inner: SmallVec<[Word; BIG_CAPACITY]>,
}

impl WordBuf {
    #[inline]
    pub fn new() -> Self {
        WordBuf { inner: SmallVec::new() }
    }

    pub fn from_word(w: Word) -> Self {
        let mut ret = Self::new();
        if w != 0 {
            ret.inner.push(w);
        }
        ret
    }

    #[cfg(test)]
    pub fn from_u128(v: u128) -> Self {
        let mut ret = Self::from_word((v >> WORD_BIT_SIZE) as Word);
        ret.push_low(v as Word);
        ret.trim();
        ret
    }

    /// Build from words given most significant first.
    pub fn from_slice(s: &[Word]) -> Self {
        let mut ret = WordBuf { inner: SmallVec::from_slice(s) };
        ret.trim();
        ret
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inner.iter().all(|w| *w == 0)
    }

    /// Insert a word in front, i.e. as the new most significant word.
    #[inline]
    pub fn insert_front(&mut self, w: Word) {
        self.inner.insert(0, w);
    }

    /// Append a word as the new least significant word.
    #[inline]
    pub fn push_low(&mut self, w: Word) {
        self.inner.push(w);
    }

    /// Remove leading zero words.
    pub fn trim(&mut self) {
        let nz = self.inner.iter().take_while(|w| **w == 0).count();
        if nz > 0 {
            self.inner.drain(..nz);
        }
    }

    /// Number of significant bits.
    pub fn bit_len(&self) -> usize {
        match self.inner.iter().position(|w| *w != 0) {
            Some(i) => {
                (self.inner.len() - i) * WORD_BIT_SIZE - self.inner[i].leading_zeros() as usize
            }
            None => 0,
        }
    }

    /// Multiply by `2^bits`.
    pub fn shl(&mut self, bits: usize) {
        if self.is_zero() {
            return;
        }
        let shift = bits % WORD_BIT_SIZE;
        if shift > 0 {
            let out = int::shift_left(&mut self.inner, shift);
            if out != 0 {
                self.insert_front(out);
            }
        }
        for _ in 0..bits / WORD_BIT_SIZE {
            self.inner.push(0);
        }
    }

    /// Divide by `2^bits` rounding towards zero.
    pub fn shr(&mut self, bits: usize) {
        let words = bits / WORD_BIT_SIZE;
        if words >= self.inner.len() {
            self.inner.clear();
            return;
        }
        self.inner.truncate(self.inner.len() - words);
        int::shift_right(&mut self.inner, bits % WORD_BIT_SIZE, 0);
        self.trim();
    }

    /// Compute `self*m + add`.
    pub fn mul_add_small(&mut self, m: Word, add: Word) {
        let carry = int::mul_small(&mut self.inner, m, add);
        if carry != 0 {
            self.insert_front(carry);
        }
    }

    /// Compute `self*other`.
    pub fn mul(&self, other: &WordBuf) -> WordBuf {
        if self.is_zero() || other.is_zero() {
            return WordBuf::new();
        }
        let mut ret = WordBuf { inner: SmallVec::from_elem(0, self.len() + other.len()) };
        int::mul_vec(&self.inner, &other.inner, &mut ret.inner);
        ret.trim();
        ret
    }

    /// Multiply by `10^k`.
    pub fn mul_pow10(&mut self, k: u32) {
        if self.is_zero() || k == 0 {
            return;
        }
        let p = crate::common::consts::big_pow10(k);
        *self = self.mul(&p);
    }

    /// Return the leading 64 bits normalized to have the most significant bit set,
    /// the binary exponent `e` such that `self` equals `w·2^e` plus the dropped part,
    /// and whether any nonzero bits were dropped.
    pub fn top_word(&self) -> (Word, i32, bool) {
        let bl = self.bit_len();
        if bl == 0 {
            return (0, 0, false);
        }
        let i = self.inner.len() - (bl + WORD_BIT_SIZE - 1) / WORD_BIT_SIZE;
        let lz = self.inner[i].leading_zeros();
        let hi = self.inner[i];
        let lo = if i + 1 < self.inner.len() { self.inner[i + 1] } else { 0 };
        let (w, rest) = if lz == 0 {
            (hi, lo)
        } else {
            ((hi << lz) | (lo >> (WORD_BIT_SIZE as u32 - lz)), lo << lz)
        };
        let sticky = rest != 0 || self.inner.iter().skip(i + 2).any(|x| *x != 0);
        let e = bl as i32 - WORD_BIT_SIZE as i32;
        (w, e, sticky)
    }

    /// Value of a buffer holding at most 64 significant bits.
    pub fn to_word(&self) -> Option<Word> {
        match self.bit_len() {
            0 => Some(0),
            l if l <= WORD_BIT_SIZE => self.inner.last().copied(),
            _ => None,
        }
    }
}

impl Deref for WordBuf {
    type Target = [Word];

    #[inline]
    fn deref(&self) -> &[Word] {
        self.inner.deref()
    }
}

impl DerefMut for WordBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Word] {
        self.inner.deref_mut()
    }
}

impl<I: SliceIndex<[Word]>> IndexMut<I> for WordBuf {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        self.inner.index_mut(index)
    }
}

impl<I: SliceIndex<[Word]>> Index<I> for WordBuf {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        self.inner.index(index)
    }
}

/// Decimal digit values, most significant first.
#[derive(Debug, Clone, Default)]
pub struct DigitBuf {
    inner: SmallVec<[u8; MAX_EXACT_DIGITS + 2]>,
}

impl DigitBuf {
    #[inline]
    pub fn new() -> Self {
        DigitBuf { inner: SmallVec::new() }
    }

    #[inline]
    pub fn push(&mut self, d: u8) {
        self.inner.push(d);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Append decimal digits of `n`, exactly `width` of them including leading zeros.
    pub fn push_u64(&mut self, mut n: u64, width: usize) {
        let start = self.inner.len();
        for _ in 0..width {
            self.inner.push(0);
        }
        for d in self.inner[start..].iter_mut().rev() {
            *d = (n % 10) as u8;
            n /= 10;
        }
    }

    /// Remove trailing zero digits.
    pub fn strip_zeros(&mut self) {
        while self.inner.last() == Some(&0) {
            self.inner.pop();
        }
    }

    /// Round up the last digit, return true if the carry went past the first digit.
    /// The buffer is then left empty.
    pub fn round_up(&mut self) -> bool {
        while let Some(d) = self.inner.pop() {
            if d < 9 {
                self.inner.push(d + 1);
                return false;
            }
        }
        true
    }

    /// Convert digit values to ASCII characters in place.
    pub fn to_ascii(&mut self) {
        for d in self.inner.iter_mut() {
            *d += b'0';
        }
    }
}

impl Deref for DigitBuf {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.inner.deref()
    }
}
