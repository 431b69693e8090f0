//! Static configuration surface for the streaming engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values.
///
/// Configuration is validated once at engine construction; nothing on the
/// per-tick path can fail.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Chunk size must be a positive length.
    #[error("chunk_size must be > 0, got {0}")]
    InvalidChunkSize(f32),
    /// Retention radius must be non-negative.
    #[error("retention_radius must be >= 0, got {0}")]
    InvalidRetentionRadius(i32),
    /// Placement sub-grids need at least one cell per axis.
    #[error("{name} must be >= 1, got {value}")]
    InvalidGrid {
        /// Offending field name.
        name: &'static str,
        /// Offending value.
        value: usize,
    },
}

/// Static, loaded-once configuration for the streaming engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// World seed; the only source of randomness in the engine.
    pub world_seed: u64,
    /// Side length of a chunk in world units. Must be positive.
    pub chunk_size: f32,
    /// Chebyshev radius (in chunks) kept loaded around the observer. Chunks
    /// are only unloaded past `retention_radius + 1` (one chunk of
    /// hysteresis against boundary thrashing).
    pub retention_radius: i32,
    /// Hard cap on non-terrain entities per chunk; bounds worst-case
    /// generation cost within a tick.
    pub max_objects_per_chunk: usize,
    /// Sampling scale of the biome noise field in chunk-coordinate space.
    pub biome_noise_scale: f64,
    /// Distance from a chunk's origin to the observer below which its
    /// content is kept in the active presentation state.
    pub lod_distance: f32,
    /// Recycle chunk records through the pool. Behaviorally transparent;
    /// disabling it must not change generation results.
    pub pooling: bool,
    /// Global multiplier on biome enemy spawn rates.
    pub enemy_rate_modifier: f32,
    /// Global multiplier on biome item spawn rates.
    pub item_rate_modifier: f32,
    /// Structure spawn probability. Structures roll against this alone,
    /// without a biome rate.
    pub structure_rate_modifier: f32,
    /// Global multiplier on biome decoration density.
    pub decoration_rate_modifier: f32,
    /// Terrain tiles per chunk axis.
    pub terrain_grid: usize,
    /// Content placement cells per chunk axis.
    pub content_grid: usize,
    /// World-space distance over which hostile difficulty grows by 1.
    pub difficulty_distance_unit: f32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            world_seed: 0,
            chunk_size: 50.0,
            retention_radius: 3,
            max_objects_per_chunk: 24,
            biome_noise_scale: 0.05,
            lod_distance: 120.0,
            pooling: true,
            enemy_rate_modifier: 1.0,
            item_rate_modifier: 1.0,
            structure_rate_modifier: 0.05,
            decoration_rate_modifier: 1.0,
            terrain_grid: 4,
            content_grid: 5,
            difficulty_distance_unit: 1000.0,
        }
    }
}

impl StreamingConfig {
    /// Validate the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.chunk_size > 0.0) {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        if self.retention_radius < 0 {
            return Err(ConfigError::InvalidRetentionRadius(self.retention_radius));
        }
        if self.terrain_grid == 0 {
            return Err(ConfigError::InvalidGrid {
                name: "terrain_grid",
                value: self.terrain_grid,
            });
        }
        if self.content_grid == 0 {
            return Err(ConfigError::InvalidGrid {
                name: "content_grid",
                value: self.content_grid,
            });
        }
        Ok(())
    }
}
