//! The numeric type lattice and its implicit promotion rules.
//!
//! Enigma has exactly six scalar types. Every binary arithmetic, bitwise or
//! relational operator first resolves a single common type with [`promote`]
//! and converts both operands to it, mimicking C's usual arithmetic
//! conversions, with a few consensus-specific quirks.

mod error;
mod numeric;

#[cfg(test)]
mod numeric_test;

pub use error::TypeError;
pub use numeric::{NumericType, promote};
