//! Assertion utilities for forests and layouts.
//!
//! Each helper returns a `Result` naming the first violation, so tests can
//! `unwrap()` for a readable failure or inspect the error.

mod forest;
mod layout;

pub use forest::*;
pub use layout::*;
