//! Correctly rounded conversion of binary floating point numbers and integers to and from text.
//!
//! Decimal text is converted to the nearest `f32` or `f64`, and numbers are formatted
//! either with the shortest digits that convert back to the same bit pattern,
//! or with a requested number of correctly rounded digits.
//! Both directions first compute with a cached 96-bit power of ten and fall back
//! to exact multi-word arithmetic when the approximation can not decide the rounding.
//! Hexadecimal floating point text and integers in bases 2, 8, 10, and 16 are supported as well.
//!
//! ## Examples
//!
//! ```
//! use astro_scvt::{format_float, parse_float, FloatStyle, FormatOptions};
//!
//! let (v, consumed) = parse_float::<f64>(b"3.14159265358979");
//! assert_eq!(consumed, 16);
//!
//! let mut s = String::new();
//! format_float(v, &FormatOptions::default(), &mut s);
//! assert_eq!(s, "3.14159265358979");
//!
//! let mut s = String::new();
//! let opts = FormatOptions::default().with_float_style(FloatStyle::Scientific).with_precision(3);
//! format_float(v, &opts, &mut s);
//! assert_eq!(s, "3.142e+00");
//! ```
//!
//! The library does not install a `tracing` subscriber; the exact fallbacks are reported
//! at `trace` level, and table initialization at `debug` level.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![cfg_attr(test, allow(clippy::approx_constant))]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bin2dec;
mod common;
mod dec2bin;
mod defs;
mod float;
mod hex;
mod integer;
mod parser;
mod strop;

#[cfg(feature = "serde")]
pub mod for_3rd;

pub use crate::defs::Error;
pub use crate::defs::FloatStyle;
pub use crate::defs::Radix;
pub use crate::float::Float;
pub use crate::float::FloatFormat;
pub use crate::hex::parse_hex_float;
pub use crate::integer::from_signed;
pub use crate::integer::from_unsigned;
pub use crate::integer::to_signed;
pub use crate::integer::to_unsigned;
pub use crate::integer::IntBuf;
pub use crate::integer::Integer;
pub use crate::strop::format_float;
pub use crate::strop::format_float_bits;
pub use crate::strop::format_integer;
pub use crate::strop::parse_float;
pub use crate::strop::parse_float_bits;
pub use crate::strop::parse_float_exact;
pub use crate::strop::parse_integer;
pub use crate::strop::parse_integer_exact;
pub use crate::strop::FormatOptions;
pub use crate::strop::Sink;
