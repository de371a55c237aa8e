//! Random value lattice backing the noise field.

use std::f32::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness for a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseSeed {
    /// Deterministic: the same seed always yields the same lattice.
    Fixed(u64),
    /// Fresh entropy on every generation, so every build differs.
    Random,
}

impl Default for NoiseSeed {
    fn default() -> Self {
        NoiseSeed::Random
    }
}

impl NoiseSeed {
    /// Returns the concrete seed to use, drawing one from the thread RNG for
    /// [`NoiseSeed::Random`].
    pub fn resolve(self) -> u64 {
        match self {
            NoiseSeed::Fixed(seed) => seed,
            NoiseSeed::Random => rand::random(),
        }
    }
}

/// A square grid of independent scalars in `[-1, 1]`.
///
/// Values are stored x-major: `values[x * nodes + y]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseLattice {
    nodes: usize,
    seed: u64,
    values: Vec<f32>,
}

impl NoiseLattice {
    /// Fills a `nodes × nodes` lattice with `cos(θ)` for uniformly random angles `θ`.
    pub fn generate(nodes: usize, seed: NoiseSeed) -> Self {
        let seed = seed.resolve();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values = (0..nodes * nodes)
            .map(|_| (rng.random::<f32>() * TAU).cos())
            .collect();
        log::debug!("Generated {}x{} noise lattice with seed {}", nodes, nodes, seed);
        Self { nodes, seed, values }
    }

    /// Builds a lattice from explicit values, e.g. for tests.
    ///
    /// # Panics
    /// Panics if `values.len() != nodes * nodes`.
    pub fn from_values(nodes: usize, values: Vec<f32>) -> Self {
        assert_eq!(values.len(), nodes * nodes, "Lattice needs nodes^2 values");
        Self { nodes, seed: 0, values }
    }

    /// Returns the lattice resolution along each axis.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Returns the seed the lattice was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the value at `(x, y)`, wrapping both coordinates modulo `nodes`.
    pub fn get_wrapped(&self, x: i64, y: i64) -> f32 {
        let n = self.nodes as i64;
        let xi = x.rem_euclid(n) as usize;
        let yi = y.rem_euclid(n) as usize;
        self.values[xi * self.nodes + yi]
    }
}
