//! Testing utilities for Questmap.
//!
//! This crate provides builders for node and progress snapshots, seeded
//! random data generators, and assertion helpers that check the structural
//! guarantees of forests and layouts.

pub mod assertions;
pub mod builders;
pub mod data_generators;

pub use builders::{ProgressBuilder, RoadmapBuilder};
pub use data_generators::ForestShape;
