//! Multi-octave fractal Brownian motion (fBm) parameters.

use serde::{Deserialize, Serialize};

/// Configuration for multi-octave fractal noise summation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmConfig {
    /// Number of noise octaves.
    pub octaves: u32,
    /// Amplitude of the first octave.
    pub amplitude: f32,
    /// Frequency of the first octave.
    pub frequency: f32,
    /// Amplitude multiplier per octave.
    pub persistence: f32,
    /// Frequency multiplier per octave.
    pub lacunarity: f32,
}

impl Default for FbmConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            amplitude: 4.0,
            frequency: 0.05,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl FbmConfig {
    /// Creates the default configuration with a different octave count.
    pub fn with_octaves(octaves: u32) -> Self {
        Self {
            octaves,
            ..Default::default()
        }
    }

    /// Upper bound on `|fbm|`: the sum of all octave amplitudes.
    pub fn amplitude_bound(&self) -> f32 {
        let mut bound = 0.0f32;
        let mut amplitude = self.amplitude.abs();
        for _ in 0..self.octaves {
            bound += amplitude;
            amplitude *= self.persistence.abs();
        }
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FbmConfig::default();
        assert_eq!(config.octaves, 4);
        assert_eq!(config.amplitude, 4.0);
        assert_eq!(config.frequency, 0.05);
        assert_eq!(config.persistence, 0.5);
        assert_eq!(config.lacunarity, 2.0);
    }

    #[test]
    fn test_amplitude_bound() {
        assert_eq!(FbmConfig::default().amplitude_bound(), 7.5);
        assert_eq!(FbmConfig::with_octaves(0).amplitude_bound(), 0.0);
        assert_eq!(FbmConfig::with_octaves(1).amplitude_bound(), 4.0);
    }

    #[test]
    fn test_with_octaves_keeps_other_defaults() {
        let config = FbmConfig::with_octaves(6);
        assert_eq!(config.octaves, 6);
        assert_eq!(config.frequency, FbmConfig::default().frequency);
    }
}
