//! Generator abstraction shared by the sponge and terrain builders.
//!
//! Provides a trait over both builders and a versioned source that replaces
//! "dirty flag" polling with snapshot version comparison.

mod generator;

pub use generator::{GeneratorId, MeshGenerator, MeshSource};
