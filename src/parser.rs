//! Parser parses decimal numbers represented in scientific format.

use crate::common::buf::WordBuf;
use crate::common::consts::DIGIT_VALUE;
use crate::common::consts::SMALL_POW10;
use crate::defs::Sign;
use crate::defs::MAX_SIG_DIGITS;

/// Saturation bound of an exponent read from text.
const EXP_SATURATION: i64 = 1_000_000;

/// Bound of the final decimal exponent of a `Decimal`.
const EXP_CLAMP: i64 = 100_000_000;

/// Number of decimal digits accumulated in a word before it is folded into the big integer.
const CHUNK_DIGITS: u32 = 19;

/// Decimal number `words·10^exp`.
/// `words` holds `digits` significant decimal digits, the first of which is nonzero.
/// `tail` is set when nonzero digits were dropped past `MAX_SIG_DIGITS`.
#[derive(Debug, Clone, Default)]
pub struct Decimal {
    pub words: WordBuf,
    pub digits: u32,
    pub exp: i32,
    pub tail: bool,
    chunk: u64,
    chunk_len: u32,
    exp_acc: i64,
}

impl Decimal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decimal `m·10^exp`.
    #[cfg(test)]
    pub fn from_u64(m: u64, exp: i32) -> Self {
        let mut d = Decimal::new();
        if m != 0 {
            let mut buf = [0u8; 20];
            let mut n = m;
            let mut l = 0;
            while n > 0 {
                buf[l] = (n % 10) as u8;
                n /= 10;
                l += 1;
            }
            for c in buf[..l].iter().rev() {
                d.push_digit(*c);
            }
        }
        d.exp_acc += exp as i64;
        d.finish();
        d
    }

    /// Append a significant digit. Return false if the digit did not fit and was dropped.
    pub fn push_digit(&mut self, d: u8) -> bool {
        if self.digits as usize >= MAX_SIG_DIGITS {
            self.tail |= d != 0;
            return false;
        }
        self.chunk = self.chunk * 10 + d as u64;
        self.chunk_len += 1;
        self.digits += 1;
        if self.chunk_len == CHUNK_DIGITS {
            self.flush();
        }
        true
    }

    fn flush(&mut self) {
        if self.chunk_len > 0 {
            self.words.mul_add_small(SMALL_POW10[self.chunk_len as usize], self.chunk);
            self.chunk = 0;
            self.chunk_len = 0;
        }
    }

    fn shift_exp(&mut self, e: i64) {
        self.exp_acc += e;
    }

    fn finish(&mut self) {
        self.flush();
        self.exp = self.exp_acc.clamp(-EXP_CLAMP, EXP_CLAMP) as i32;
    }

    /// True if the number is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits == 0
    }

    /// Mantissa as a single word, if it fits.
    #[inline]
    pub fn to_word(&self) -> Option<u64> {
        self.words.to_word()
    }
}

/// State of parsing a number.
pub struct ParserState<'a> {
    s: &'a [u8],
    pos: usize,
    sign: Sign,
    dec: Decimal,
    inf: bool,
    nan: bool,
    valid: bool,
    consumed: usize,
}

impl<'a> ParserState<'a> {
    fn new(s: &'a [u8]) -> Self {
        ParserState {
            s,
            pos: 0,
            sign: Sign::Pos,
            dec: Decimal::new(),
            inf: false,
            nan: false,
            valid: false,
            consumed: 0,
        }
    }

    /// Returns the current character in lower case, or None if the end of input is reached.
    fn cur_char(&self) -> Option<u8> {
        self.s.get(self.pos).map(|c| c.to_ascii_lowercase())
    }

    /// Moves to the next character and returns it in lower case.
    fn next_char(&mut self) -> Option<u8> {
        if self.pos < self.s.len() {
            self.pos += 1;
        }
        self.cur_char()
    }

    fn accept(&mut self) {
        self.valid = true;
        self.consumed = self.pos;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_inf(&self) -> bool {
        self.inf
    }

    pub fn is_nan(&self) -> bool {
        self.nan
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Number of bytes consumed; 0 if the input is not a number.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn decimal(&self) -> &Decimal {
        &self.dec
    }
}

/// Parse a decimal number.
pub fn parse(s: &[u8]) -> ParserState<'_> {
    let mut ps = ParserState::new(s);

    match ps.cur_char() {
        Some(b'+') => {
            ps.next_char();
        }
        Some(b'-') => {
            ps.sign = Sign::Neg;
            ps.next_char();
        }
        _ => {}
    };

    match ps.cur_char() {
        Some(b'i') => parse_inf(&mut ps),
        Some(b'n') => parse_nan(&mut ps),
        Some(b'0'..=b'9' | b'.') => parse_num(&mut ps),
        _ => {}
    };

    ps
}

/// Try to match `word` at the current position, advance past it on success.
fn match_word(ps: &mut ParserState, word: &[u8]) -> bool {
    let end = ps.pos + word.len();
    if end <= ps.s.len() && ps.s[ps.pos..end].eq_ignore_ascii_case(word) {
        ps.pos = end;
        true
    } else {
        false
    }
}

fn parse_inf(ps: &mut ParserState) {
    if match_word(ps, b"inf") {
        match_word(ps, b"inity");
        ps.inf = true;
        ps.accept();
    }
}

fn parse_nan(ps: &mut ParserState) {
    if match_word(ps, b"nan") {
        ps.nan = true;
        ps.accept();
    }
}

fn parse_num(ps: &mut ParserState) {
    let mut seen = false;

    // integer part
    let mut ch = ps.cur_char();
    while let Some(c @ b'0'..=b'9') = ch {
        let d = c - b'0';
        seen = true;
        if !ps.dec.is_zero() || d != 0 {
            if !ps.dec.push_digit(d) {
                ps.dec.shift_exp(1);
            }
        }
        ch = ps.next_char();
    }

    // fractional part
    if ch == Some(b'.') {
        ch = ps.next_char();
        while let Some(c @ b'0'..=b'9') = ch {
            let d = c - b'0';
            seen = true;
            if ps.dec.is_zero() {
                if d != 0 {
                    ps.dec.push_digit(d);
                }
                ps.dec.shift_exp(-1);
            } else if ps.dec.push_digit(d) {
                ps.dec.shift_exp(-1);
            }
            ch = ps.next_char();
        }
    }

    if !seen {
        return;
    }

    ps.accept();

    if ch == Some(b'e') {
        if let Some((e, pos)) = parse_exponent(ps.s, ps.pos + 1) {
            ps.dec.shift_exp(e);
            ps.pos = pos;
            ps.consumed = pos;
        }
    }

    ps.dec.finish();
}

/// Parse an optionally signed decimal exponent starting at `pos`.
/// Return the value saturated at a large magnitude and the position after the last digit,
/// or None if there are no digits.
pub(crate) fn parse_exponent(s: &[u8], mut pos: usize) -> Option<(i64, usize)> {
    let mut neg = false;
    match s.get(pos) {
        Some(b'+') => pos += 1,
        Some(b'-') => {
            neg = true;
            pos += 1;
        }
        _ => {}
    };

    let start = pos;
    let mut e: i64 = 0;
    while let Some(&c) = s.get(pos) {
        let d = DIGIT_VALUE[c as usize];
        if d > 9 {
            break;
        }
        e = (e * 10 + d as i64).min(EXP_SATURATION);
        pos += 1;
    }

    if pos == start {
        None
    } else {
        Some((if neg { -e } else { e }, pos))
    }
}
