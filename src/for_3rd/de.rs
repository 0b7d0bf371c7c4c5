//! Deserialization of floating point numbers.

use core::fmt::Formatter;
use core::marker::PhantomData;

use crate::float::Float;
use crate::strop::format_float;
use crate::strop::format_integer;
use crate::strop::parse_float_exact;
use crate::strop::FormatOptions;
use serde::de::Error;
use serde::de::Visitor;
use serde::Deserializer;

#[cfg(not(feature = "std"))]
use alloc::string::String;

struct FloatVisitor<F> {
    marker: PhantomData<F>,
}

impl<'de, F: Float> Visitor<'de> for FloatVisitor<F> {
    type Value = F;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "a number or a string containing a number")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_float_exact(v).map_err(E::custom)
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        self.visit_str(&v)
    }

    // numbers go through their decimal text to get a correctly rounded result for any target type

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        let mut s = String::new();
        format_integer(v, &FormatOptions::default(), &mut s);
        self.visit_str(&s)
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        let mut s = String::new();
        format_integer(v, &FormatOptions::default(), &mut s);
        self.visit_str(&s)
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        let mut s = String::new();
        format_float(v, &FormatOptions::default(), &mut s);
        self.visit_str(&s)
    }
}

/// Deserialize a floating point number from a string or a number.
pub fn deserialize<'de, F: Float, D: Deserializer<'de>>(deserializer: D) -> Result<F, D::Error> {
    deserializer.deserialize_any(FloatVisitor { marker: PhantomData })
}
