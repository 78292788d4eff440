//! **pathkit-core** — shared types for the *pathkit* workspace.
//!
//! This crate provides the geometry primitives used as search nodes on
//! grids, plus the small helpers puzzle solvers keep reaching for: integer
//! parsing with a real error type, digit and bit views of integers, text
//! splitting, and power-set enumeration.

pub mod bits;
pub mod combos;
pub mod geom;
pub mod parse;
pub mod text;

pub use bits::IntBits;
pub use combos::{Combinations, combinations};
pub use geom::{Point, Range, RangeIter};
pub use parse::{FromRadix, ParseError, Required, parse_hex_digit, parse_int};
pub use text::{lines, split_on};
