//! Parsing and formatting of numbers as text.

use crate::bin2dec::fp_dec_fmt;
use crate::bin2dec::Digits;
use crate::bin2dec::Mode;
use crate::common::buf::DigitBuf;
use crate::common::consts::DIGIT_CHARS;
use crate::common::consts::DIGIT_CHARS_UPPER;
use crate::common::util::dec_len;
use crate::dec2bin::fp10_to_fp2;
use crate::defs::Error;
use crate::defs::FloatStyle;
use crate::defs::Radix;
use crate::float::decode;
use crate::float::Decoded;
use crate::float::Float;
use crate::float::FloatFormat;
use crate::float::Unpacked;
use crate::hex::fp_hex_fmt;
use crate::hex::HexDigits;
use crate::integer;
use crate::integer::Integer;
use crate::parser::parse;
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Precision used when a style is requested without one.
const DEFAULT_PRECISION: u32 = 6;

const ZEROS: [u8; 32] = [b'0'; 32];

/// Append-only consumer of formatted text.
pub trait Sink {
    /// Append ASCII characters.
    fn push_ascii(&mut self, s: &[u8]);

    /// Append a character.
    fn push_char(&mut self, c: char);
}

impl Sink for String {
    fn push_ascii(&mut self, s: &[u8]) {
        self.extend(s.iter().map(|&c| c as char));
    }

    fn push_char(&mut self, c: char) {
        self.push(c);
    }
}

impl Sink for Vec<u8> {
    fn push_ascii(&mut self, s: &[u8]) {
        self.extend_from_slice(s);
    }

    fn push_char(&mut self, c: char) {
        let mut b = [0u8; 4];
        self.extend_from_slice(c.encode_utf8(&mut b).as_bytes());
    }
}

/// Formatting options.
///
/// Floating point numbers without a style and a precision are formatted with the shortest
/// digits that parse back to the same number, in fixed or scientific notation,
/// whichever is shorter. A precision without a style selects the general style.
/// With `base` set to `Radix::Hex` floating point numbers are formatted
/// as hexadecimal floating point numbers, other bases format them in decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Radix of the digits.
    pub base: Radix,

    /// Layout of floating point numbers.
    pub float_style: Option<FloatStyle>,

    /// Upper case digits, exponent characters, and prefixes.
    pub uppercase: bool,

    /// Integers get a radix prefix: `0b`, `0`, or `0x`.
    /// Floating point numbers always get a decimal point and general style keeps trailing zeroes.
    pub alternate_form: bool,

    /// Non-negative numbers get a `+` sign.
    pub force_sign: bool,

    /// Pad with zeroes between the sign and the digits instead of the fill character.
    /// Infinity and NaN are padded with the fill character.
    pub leading_zero_pad: bool,

    /// Number of digits after the point for fixed and scientific style,
    /// number of significant digits for general style.
    pub precision: Option<u32>,

    /// Minimum length of the text.
    pub width: u32,

    /// Character used to right-align the text to `width`.
    pub fill: char,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            base: Radix::Dec,
            float_style: None,
            uppercase: false,
            alternate_form: false,
            force_sign: false,
            leading_zero_pad: false,
            precision: None,
            width: 0,
            fill: ' ',
        }
    }
}

impl FormatOptions {
    /// Set the radix.
    pub fn with_base(mut self, base: Radix) -> Self {
        self.base = base;
        self
    }

    /// Set the floating point style.
    pub fn with_float_style(mut self, style: FloatStyle) -> Self {
        self.float_style = Some(style);
        self
    }

    /// Set upper case output.
    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Set the alternate form.
    pub fn with_alternate_form(mut self, alternate_form: bool) -> Self {
        self.alternate_form = alternate_form;
        self
    }

    /// Set whether non-negative numbers get a `+` sign.
    pub fn with_force_sign(mut self, force_sign: bool) -> Self {
        self.force_sign = force_sign;
        self
    }

    /// Set zero padding.
    pub fn with_leading_zero_pad(mut self, leading_zero_pad: bool) -> Self {
        self.leading_zero_pad = leading_zero_pad;
        self
    }

    /// Set the precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Set the minimum width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the fill character.
    pub fn with_fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }
}

/// Piece of formatted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
    /// Given number of zero digits.
    Zero(usize),

    /// Decimal digits of a number.
    Num(u32),

    /// Verbatim copy of the bytes.
    Copy(&'a [u8]),
}

impl<'a> Part<'a> {
    fn len(&self) -> usize {
        match *self {
            Part::Zero(n) => n,
            Part::Num(v) => dec_len(v as u64),
            Part::Copy(buf) => buf.len(),
        }
    }

    fn write<S: Sink>(&self, sink: &mut S) {
        match *self {
            Part::Zero(n) => write_zeros(n, sink),
            Part::Num(v) => sink.push_ascii(integer::to_unsigned(v as u64, Radix::Dec, false).as_bytes()),
            Part::Copy(buf) => sink.push_ascii(buf),
        }
    }
}

type Parts<'a> = SmallVec<[Part<'a>; 8]>;

fn parts_len(parts: &Parts) -> usize {
    parts.iter().map(|p| p.len()).sum()
}

fn write_zeros<S: Sink>(mut n: usize, sink: &mut S) {
    while n > 0 {
        let l = n.min(ZEROS.len());
        sink.push_ascii(&ZEROS[..l]);
        n -= l;
    }
}

/// Formatted number: sign, radix prefix and the rest.
struct Formatted<'a> {
    sign: &'static [u8],
    prefix: &'static [u8],
    parts: Parts<'a>,
}

impl<'a> Formatted<'a> {
    fn len(&self) -> usize {
        self.sign.len() + self.prefix.len() + parts_len(&self.parts)
    }

    fn write<S: Sink>(&self, opts: &FormatOptions, zero_pad: bool, sink: &mut S) {
        let pad = (opts.width as usize).saturating_sub(self.len());
        if zero_pad {
            sink.push_ascii(self.sign);
            sink.push_ascii(self.prefix);
            write_zeros(pad, sink);
        } else {
            for _ in 0..pad {
                sink.push_char(opts.fill);
            }
            sink.push_ascii(self.sign);
            sink.push_ascii(self.prefix);
        }
        for part in self.parts.iter() {
            part.write(sink);
        }
    }
}

fn sign_text(neg: bool, force_sign: bool) -> &'static [u8] {
    if neg {
        b"-"
    } else if force_sign {
        b"+"
    } else {
        b""
    }
}

/// Fixed notation of ASCII digits `buf` with scientific exponent `exp` and `frac` digits after the point.
fn fixed_parts(buf: &[u8], exp: i32, frac: usize, alt: bool) -> Parts<'_> {
    let mut parts = Parts::new();
    let mut rest: &[u8] = &[];
    let mut lead = 0;

    if buf.is_empty() || exp < 0 {
        parts.push(Part::Copy(b"0"));
        if !buf.is_empty() {
            lead = (-(exp as i64) - 1) as usize;
            rest = buf;
        }
    } else {
        let int_len = exp as usize + 1;
        if buf.len() >= int_len {
            parts.push(Part::Copy(&buf[..int_len]));
            rest = &buf[int_len..];
        } else {
            parts.push(Part::Copy(buf));
            parts.push(Part::Zero(int_len - buf.len()));
        }
    }

    if frac > 0 || alt {
        parts.push(Part::Copy(b"."));
    }

    let lead = lead.min(frac);
    if lead > 0 {
        parts.push(Part::Zero(lead));
    }
    let rest = &rest[..rest.len().min(frac - lead)];
    if !rest.is_empty() {
        parts.push(Part::Copy(rest));
    }
    let tail = frac - lead - rest.len();
    if tail > 0 {
        parts.push(Part::Zero(tail));
    }

    parts
}

/// Scientific notation of ASCII digits `buf` with exponent `exp` and `frac` digits after the point.
/// The exponent has at least two digits.
fn scientific_parts(buf: &[u8], exp: i32, frac: usize, alt: bool, upper: bool) -> Parts<'_> {
    let mut parts = Parts::new();
    let (first, rest, exp): (&[u8], &[u8], i32) = if buf.is_empty() {
        (&b"0"[..], &[][..], 0)
    } else {
        (&buf[..1], &buf[1..], exp)
    };

    parts.push(Part::Copy(first));
    if frac > 0 || alt {
        parts.push(Part::Copy(b"."));
    }
    let rest = &rest[..rest.len().min(frac)];
    if !rest.is_empty() {
        parts.push(Part::Copy(rest));
    }
    if frac > rest.len() {
        parts.push(Part::Zero(frac - rest.len()));
    }

    parts.push(Part::Copy(if upper { b"E" } else { b"e" }));
    parts.push(Part::Copy(if exp < 0 { b"-" } else { b"+" }));
    let e = exp.unsigned_abs();
    if e < 10 {
        parts.push(Part::Zero(1));
    }
    parts.push(Part::Num(e));

    parts
}

/// Number of digits after the point in fixed notation to show all of `n` digits.
fn exact_frac(n: usize, exp: i32) -> usize {
    (n as i64 - 1 - exp as i64).max(0) as usize
}

fn format_special<S: Sink>(text: &'static [u8], sign: &'static [u8], opts: &FormatOptions, sink: &mut S) {
    let mut parts = Parts::new();
    parts.push(Part::Copy(text));
    let f = Formatted { sign, prefix: b"", parts };
    f.write(opts, false, sink);
}

fn format_dec<S: Sink>(u: Option<&Unpacked>, sign: &'static [u8], opts: &FormatOptions, sink: &mut S) {
    let alt = opts.alternate_form;
    let upper = opts.uppercase;
    let style = match (opts.float_style, opts.precision) {
        (None, Some(_)) => Some(FloatStyle::General),
        (style, _) => style,
    };
    let p = opts.precision.unwrap_or(DEFAULT_PRECISION);

    let mode = match style {
        None => Mode::Shortest,
        Some(FloatStyle::Fixed) => Mode::Fractional(p),
        Some(FloatStyle::Scientific) => Mode::Significant(p.saturating_add(1)),
        Some(FloatStyle::General) => Mode::Significant(p.max(1)),
    };

    let mut d = u.map_or_else(Digits::zero, |u| fp_dec_fmt(u, mode));
    d.buf.to_ascii();
    let buf = &d.buf[..];
    let n = buf.len();
    let x = d.exp;
    let p = p as usize;

    let parts = match style {
        None => {
            let fixed = fixed_parts(buf, x, exact_frac(n, x), alt);
            let sci = scientific_parts(buf, x, n.saturating_sub(1), alt, upper);
            if parts_len(&fixed) <= parts_len(&sci) {
                fixed
            } else {
                sci
            }
        }
        Some(FloatStyle::Fixed) => fixed_parts(buf, x, p, alt),
        Some(FloatStyle::Scientific) => scientific_parts(buf, x, p, alt, upper),
        Some(FloatStyle::General) => {
            let pg = p.max(1) as i64;
            if -4 <= x as i64 && (x as i64) < pg {
                let frac = if alt { (pg - 1 - x as i64) as usize } else { exact_frac(n, x) };
                fixed_parts(buf, x, frac, alt)
            } else {
                let frac = if alt { (pg - 1) as usize } else { n.saturating_sub(1) };
                scientific_parts(buf, x, frac, alt, upper)
            }
        }
    };

    let f = Formatted { sign, prefix: b"", parts };
    f.write(opts, opts.leading_zero_pad, sink);
}

fn format_hex<S: Sink>(u: Option<&Unpacked>, sign: &'static [u8], opts: &FormatOptions, sink: &mut S) {
    let upper = opts.uppercase;
    let chars = if upper { &DIGIT_CHARS_UPPER } else { &DIGIT_CHARS };
    let (lead, h): (&[u8], HexDigits) = match u {
        Some(u) => (&b"1"[..], fp_hex_fmt(u, opts.precision)),
        None => (&b"0"[..], HexDigits::default()),
    };

    let mut digits = DigitBuf::new();
    for &d in h.frac.iter() {
        digits.push(chars[d as usize]);
    }
    let frac = opts.precision.map_or(digits.len(), |p| (p as usize).max(digits.len()));

    let mut parts = Parts::new();
    parts.push(Part::Copy(lead));
    if frac > 0 || opts.alternate_form {
        parts.push(Part::Copy(b"."));
    }
    if !digits.is_empty() {
        parts.push(Part::Copy(&digits));
    }
    if frac > digits.len() {
        parts.push(Part::Zero(frac - digits.len()));
    }
    parts.push(Part::Copy(if upper { b"P" } else { b"p" }));
    parts.push(Part::Copy(if h.exp < 0 { b"-" } else { b"+" }));
    parts.push(Part::Num(h.exp.unsigned_abs()));

    let f = Formatted {
        sign,
        prefix: if upper { b"0X" } else { b"0x" },
        parts,
    };
    f.write(opts, opts.leading_zero_pad, sink);
}

/// Format the floating point number with bit pattern `bits` of format `fmt`.
pub fn format_float_bits<S: Sink>(bits: u64, fmt: &FloatFormat, opts: &FormatOptions, sink: &mut S) {
    let (s, decoded) = decode(bits, fmt);
    let sign = sign_text(s.is_negative(), opts.force_sign);

    let u = match decoded {
        Decoded::Nan => return format_special(if opts.uppercase { b"NAN" } else { b"nan" }, sign, opts, sink),
        Decoded::Infinite => return format_special(if opts.uppercase { b"INF" } else { b"inf" }, sign, opts, sink),
        Decoded::Zero => None,
        Decoded::Finite(u) => Some(u),
    };

    if opts.base == Radix::Hex {
        format_hex(u.as_ref(), sign, opts, sink);
    } else {
        format_dec(u.as_ref(), sign, opts, sink);
    }
}

/// Format a floating point number.
pub fn format_float<F: Float, S: Sink>(v: F, opts: &FormatOptions, sink: &mut S) {
    format_float_bits(v.to_bits_u64(), &F::FORMAT, opts, sink);
}

/// Format an integer. The precision and the float style are ignored.
pub fn format_integer<T: Integer, S: Sink>(v: T, opts: &FormatOptions, sink: &mut S) {
    let (neg, mag) = v.to_parts();
    let digits = integer::to_unsigned(mag, opts.base, opts.uppercase);

    let prefix: &'static [u8] = match (opts.alternate_form, opts.base) {
        (false, _) | (true, Radix::Dec) => b"",
        (true, Radix::Bin) => {
            if opts.uppercase {
                b"0B"
            } else {
                b"0b"
            }
        }
        (true, Radix::Oct) => {
            if mag == 0 {
                b""
            } else {
                b"0"
            }
        }
        (true, Radix::Hex) => {
            if opts.uppercase {
                b"0X"
            } else {
                b"0x"
            }
        }
    };

    let mut parts = Parts::new();
    parts.push(Part::Copy(digits.as_bytes()));
    let f = Formatted {
        sign: sign_text(neg, opts.force_sign),
        prefix,
        parts,
    };
    f.write(opts, opts.leading_zero_pad, sink);
}

/// Parse a decimal floating point number, `inf`, `infinity`, or `nan` into the bit pattern of format `fmt`.
/// Return the bit pattern and the number of bytes consumed, 0 if the input is not a number.
pub fn parse_float_bits(s: &[u8], fmt: &FloatFormat) -> (u64, usize) {
    let ps = parse(s);
    if !ps.is_valid() {
        return (0, 0);
    }

    let sign = if ps.sign().is_negative() { fmt.sign_bit() } else { 0 };
    let bits = if ps.is_nan() {
        fmt.nan_bits()
    } else if ps.is_inf() {
        fmt.infinity_bits()
    } else {
        fp10_to_fp2(ps.decimal(), fmt)
    };

    (sign | bits, ps.consumed())
}

/// Parse a floating point number.
/// Return the number and the number of bytes consumed, 0 if the input is not a number.
pub fn parse_float<F: Float>(s: &[u8]) -> (F, usize) {
    let (bits, n) = parse_float_bits(s, &F::FORMAT);
    (F::from_bits_u64(bits), n)
}

/// Parse a floating point number occupying the whole string.
///
/// ## Errors
///
///  - InvalidArgument: the string does not start with a number.
///  - TrailingCharacters: characters remain after the number.
pub fn parse_float_exact<F: Float>(s: &str) -> Result<F, Error> {
    let (v, n) = parse_float(s.as_bytes());
    check_consumed(s, n).map(|_| v)
}

/// Parse an integer with digits of radix `rdx` and an optional sign, saturating at the bounds of `T`.
/// Return the number and the number of bytes consumed, 0 if the input is not a number.
pub fn parse_integer<T: Integer>(s: &[u8], rdx: Radix) -> (T, usize) {
    integer::from_digits(s, rdx)
}

/// Parse an integer occupying the whole string.
///
/// ## Errors
///
///  - InvalidArgument: the string does not start with a number.
///  - TrailingCharacters: characters remain after the number.
pub fn parse_integer_exact<T: Integer>(s: &str, rdx: Radix) -> Result<T, Error> {
    let (v, n) = parse_integer(s.as_bytes(), rdx);
    check_consumed(s, n).map(|_| v)
}

fn check_consumed(s: &str, n: usize) -> Result<(), Error> {
    if n == 0 {
        Err(Error::InvalidArgument)
    } else if n < s.len() {
        Err(Error::TrailingCharacters(n))
    } else {
        Ok(())
    }
}
