//! Serialization of floating point numbers.

use crate::float::Float;
use crate::strop::format_float;
use crate::strop::FormatOptions;
use serde::Serializer;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Serialize a floating point number as a string with its shortest round-trip decimal digits.
pub fn serialize<F: Float, S: Serializer>(v: &F, serializer: S) -> Result<S::Ok, S::Error> {
    let mut s = String::new();
    format_float(*v, &FormatOptions::default(), &mut s);
    serializer.serialize_str(&s)
}
