//! Smoothly interpolated value noise over a wrapping lattice.

use super::fractal::FbmConfig;
use super::lattice::NoiseLattice;

/// Quintic ease curve `6t^5 - 15t^4 + 10t^3`.
///
/// Has zero first and second derivative at `t = 0` and `t = 1`.
pub fn fade(t: f32) -> f32 {
    ((6.0 * t - 15.0) * t + 10.0) * t * t * t
}

/// Linear interpolation from `lo` to `hi`.
pub fn lerp(lo: f32, hi: f32, t: f32) -> f32 {
    lo + t * (hi - lo)
}

/// Continuous 2-D noise over a lattice spread across `domain_size` units.
///
/// Sampling is periodic with period `domain_size` along both axes.
#[derive(Debug, Clone)]
pub struct NoiseField {
    lattice: NoiseLattice,
    domain_size: f32,
}

impl NoiseField {
    pub fn new(lattice: NoiseLattice, domain_size: f32) -> Self {
        Self { lattice, domain_size }
    }

    pub fn lattice(&self) -> &NoiseLattice {
        &self.lattice
    }

    pub fn domain_size(&self) -> f32 {
        self.domain_size
    }

    /// World units spanned by one lattice cell.
    pub fn cell_size(&self) -> f32 {
        self.domain_size / self.lattice.nodes() as f32
    }

    /// Samples the field at `(x, y)`.
    ///
    /// Locates the enclosing cell, eases the fractional offsets with [`fade`]
    /// and blends the four corner values bilinearly. An empty lattice samples
    /// as zero everywhere.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        if self.lattice.is_empty() {
            return 0.0;
        }
        let scale = self.cell_size();
        let gx = x / scale;
        let gy = y / scale;
        let cx = gx.floor();
        let cy = gy.floor();
        let u = fade(gx - cx);
        let v = fade(gy - cy);

        let x0 = cx as i64;
        let y0 = cy as i64;
        let v00 = self.lattice.get_wrapped(x0, y0);
        let v10 = self.lattice.get_wrapped(x0 + 1, y0);
        let v01 = self.lattice.get_wrapped(x0, y0 + 1);
        let v11 = self.lattice.get_wrapped(x0 + 1, y0 + 1);

        lerp(lerp(v00, v10, u), lerp(v01, v11, u), v)
    }

    /// Fractal Brownian motion: sums `config.octaves` octaves of [`sample`](Self::sample).
    ///
    /// The result is not normalized; its magnitude is bounded by
    /// [`FbmConfig::amplitude_bound`].
    pub fn fbm(&self, x: f32, y: f32, config: &FbmConfig) -> f32 {
        let mut total = 0.0f32;
        let mut amplitude = config.amplitude;
        let mut frequency = config.frequency;

        for _ in 0..config.octaves {
            total += amplitude * self.sample(x * frequency, y * frequency);
            amplitude *= config.persistence;
            frequency *= config.lacunarity;
        }

        total
    }
}
