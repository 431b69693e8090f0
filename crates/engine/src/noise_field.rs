//! Multi-octave noise wrapper for the biome field.
//!
//! Deterministic for a fixed seed; the biome registry samples this at
//! chunk-coordinate granularity so neighboring chunks see a smoothly varying
//! value and biome regions stay contiguous.

use noise::{NoiseFn, Perlin};

/// Configuration for multi-octave noise generation.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    /// Number of octaves (layers of detail).
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves (persistence).
    pub persistence: f64,
    /// Base frequency (scale).
    pub frequency: f64,
    /// Seed for deterministic generation.
    pub seed: u32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 3,
            lacunarity: 2.0,
            persistence: 0.5,
            frequency: 1.0,
            seed: 0,
        }
    }
}

impl NoiseConfig {
    /// Create config for the biome field at the given sampling scale.
    pub fn biome(seed: u32, scale: f64) -> Self {
        Self {
            octaves: 3,
            lacunarity: 2.0,
            persistence: 0.5,
            frequency: scale,
            seed: seed.wrapping_add(3000), // Offset seed from other fields
        }
    }
}

/// Noise generator using Perlin noise.
pub struct NoiseGenerator {
    perlin: Perlin,
    config: NoiseConfig,
}

impl NoiseGenerator {
    /// Create a new noise generator with the given configuration.
    pub fn new(config: NoiseConfig) -> Self {
        Self {
            perlin: Perlin::new(config.seed),
            config,
        }
    }

    /// Generate noise value at 2D coordinates with multi-octave sampling.
    ///
    /// Returns value in range [-1.0, 1.0].
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.config.frequency;
        let mut max_value = 0.0;

        for _ in 0..self.config.octaves {
            value += self.perlin.get([x * frequency, y * frequency]) * amplitude;
            max_value += amplitude;

            amplitude *= self.config.persistence;
            frequency *= self.config.lacunarity;
        }

        // Normalize to [-1.0, 1.0]
        value / max_value
    }

    /// Sample noise mapped to the half-open unit range [0.0, 1.0).
    pub fn sample_2d_unit(&self, x: f64, y: f64) -> f64 {
        let unit = (self.sample_2d(x, y) + 1.0) * 0.5;
        // The octave sum can brush the closed bounds.
        unit.clamp(0.0, 0.999_999)
    }
}
