//! Test data generators for Questmap.
//!
//! Random generators take an explicit seed so every failing case can be
//! replayed.

mod dsl;
mod forest;

pub use dsl::*;
pub use forest::*;
