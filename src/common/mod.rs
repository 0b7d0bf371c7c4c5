//! Arithmetic and tables shared by both conversion directions.

pub mod buf;
pub mod consts;
pub mod int;
pub mod util;
