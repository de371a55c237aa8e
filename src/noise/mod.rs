//! Value noise for heightfield synthesis.
//!
//! A seeded lattice of random scalars, eased bilinear interpolation with
//! wraparound, and multi-octave fBm summation.

mod field;
mod fractal;
mod lattice;

pub use field::{fade, lerp, NoiseField};
pub use fractal::FbmConfig;
pub use lattice::{NoiseLattice, NoiseSeed};
