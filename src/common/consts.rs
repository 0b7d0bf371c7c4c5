//! Static constants.

use crate::common::buf::WordBuf;
use crate::common::int::div_rem;
use crate::common::util::log2_pow10;
use crate::defs::Word;
use lazy_static::lazy_static;

/// Smallest decimal exponent with a cached power.
pub const CACHED_POW10_MIN: i32 = -350;

/// Largest decimal exponent with a cached power.
pub const CACHED_POW10_MAX: i32 = 350;

/// Number of bits in a cached power of ten.
pub const CACHED_POW10_BITS: i32 = 96;

/// Decimal exponent step of `BIG_POW10`.
const BIG_POW10_STEP: u32 = 64;

/// Number of entries in `BIG_POW10`.
const BIG_POW10_LEN: usize = 20;

/// Powers of ten which fit in a word.
pub const SMALL_POW10: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

/// Lower case digit characters.
pub const DIGIT_CHARS: [u8; 16] = *b"0123456789abcdef";

/// Upper case digit characters.
pub const DIGIT_CHARS_UPPER: [u8; 16] = *b"0123456789ABCDEF";

/// Pairs of decimal digits "00" to "99".
pub const DEC_DIGITS_LUT: &[u8; 200] = b"\
    0001020304050607080910111213141516171819\
    2021222324252627282930313233343536373839\
    4041424344454647484950515253545556575859\
    6061626364656667686970717273747576777879\
    8081828384858687888990919293949596979899";

/// Value of a digit character in any radix up to 16, or 0xff.
pub const DIGIT_VALUE: [u8; 256] = digit_values();

const fn digit_values() -> [u8; 256] {
    let mut t = [0xffu8; 256];
    let mut i = 0;
    while i < 10 {
        t[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        t[b'a' as usize + i] = 10 + i as u8;
        t[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    t
}

/// Power of ten `10^n` approximated as `(high·2^32 + low)·2^exp`,
/// where the 96-bit significand has its most significant bit set
/// and is the truncation of the exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedPow10 {
    pub high: u64,
    pub low: u32,
    pub exp: i32,
}

impl CachedPow10 {
    fn from_top_bits(v: &WordBuf, exp: i32) -> Self {
        let mut hi96 = 0u128;
        for w in v.iter() {
            hi96 = (hi96 << 64) | *w as u128;
        }
        debug_assert!(hi96 >> 95 == 1);
        CachedPow10 {
            high: (hi96 >> 32) as u64,
            low: hi96 as u32,
            exp,
        }
    }
}

lazy_static! {

    /// `10^(64·j)` for `j` in `0..BIG_POW10_LEN`.
    static ref BIG_POW10: [WordBuf; BIG_POW10_LEN] = {
        let mut step = WordBuf::from_word(1);
        let mut left = BIG_POW10_STEP;
        while left > 0 {
            let k = left.min(19);
            step.mul_add_small(SMALL_POW10[k as usize], 0);
            left -= k;
        }

        let mut ret: [WordBuf; BIG_POW10_LEN] = Default::default();
        ret[0] = WordBuf::from_word(1);
        for j in 1..BIG_POW10_LEN {
            ret[j] = ret[j - 1].mul(&step);
        }
        ret
    };

    /// Cached 96-bit powers of ten from `10^CACHED_POW10_MIN` to `10^CACHED_POW10_MAX`.
    static ref CACHED_POW10: [CachedPow10; (CACHED_POW10_MAX - CACHED_POW10_MIN + 1) as usize] = {
        let mut ret = [CachedPow10 { high: 0, low: 0, exp: 0 }; (CACHED_POW10_MAX - CACHED_POW10_MIN + 1) as usize];

        for (i, p) in ret.iter_mut().enumerate() {
            let n = i as i32 + CACHED_POW10_MIN;
            let pw = big_pow10(n.unsigned_abs());
            let bl = pw.bit_len() as i32;

            *p = if n >= 0 {
                let mut v = pw.clone();
                if bl < CACHED_POW10_BITS {
                    v.shl((CACHED_POW10_BITS - bl) as usize);
                } else {
                    v.shr((bl - CACHED_POW10_BITS) as usize);
                }
                CachedPow10::from_top_bits(&v, bl - CACHED_POW10_BITS)
            } else {
                // floor(2^(bl + 95) / 10^-n)
                let mut num = WordBuf::from_word(1);
                num.shl((bl + CACHED_POW10_BITS - 1) as usize);
                let (q, _) = div_rem(&num, &pw);
                CachedPow10::from_top_bits(&q, -(bl + CACHED_POW10_BITS - 1))
            };

            debug_assert!(p.exp == log2_pow10(n) - (CACHED_POW10_BITS - 1));
        }

        tracing::debug!("built {} cached powers of ten", ret.len());

        ret
    };
}

/// Cached power `10^n`, if `n` is within the cached range.
#[inline]
pub fn cached_pow10(n: i32) -> Option<&'static CachedPow10> {
    if (CACHED_POW10_MIN..=CACHED_POW10_MAX).contains(&n) {
        Some(&CACHED_POW10[(n - CACHED_POW10_MIN) as usize])
    } else {
        None
    }
}

/// Exact value of `10^k`.
pub fn big_pow10(k: u32) -> WordBuf {
    let mut j = (k / BIG_POW10_STEP) as usize;
    let mut ret = if j < BIG_POW10_LEN {
        let r = BIG_POW10[j].clone();
        j = 0;
        r
    } else {
        WordBuf::from_word(1)
    };
    while j > 0 {
        let step = j.min(BIG_POW10_LEN - 1);
        ret = ret.mul(&BIG_POW10[step]);
        j -= step;
    }

    let mut left = k % BIG_POW10_STEP;
    while left > 0 {
        let s = left.min(19);
        ret.mul_add_small(SMALL_POW10[s as usize] as Word, 0);
        left -= s;
    }
    ret
}
