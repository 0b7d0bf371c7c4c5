//! Serde helpers for floating point fields.
//!
//! Numbers are serialized as strings of their shortest round-trip decimal digits,
//! so the exact bit pattern survives formats with lossy or missing float support.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Sample {
//!     #[serde(with = "astro_scvt::for_3rd")]
//!     value: f64,
//! }
//! ```

mod de;
mod ser;

pub use de::deserialize;
pub use ser::serialize;
