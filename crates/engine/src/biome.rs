//! Biome definitions and noise-based biome resolution.
//!
//! A biome is a named configuration bundle: spawn-rate scalars plus
//! per-category template collections. Which biome owns a chunk is a pure
//! function of the chunk coordinate and the static biome table, resolved
//! through a continuous noise field so neighboring chunks form contiguous
//! regions instead of per-chunk noise.

use driftworld_core::ChunkCoord;
use tracing::warn;

use crate::noise_field::{NoiseConfig, NoiseGenerator};
use crate::template::{ContentKind, ContentTemplate};

/// Per-category spawn-rate scalars for one biome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRates {
    /// Per-cell enemy spawn probability before the global modifier.
    pub enemy: f32,
    /// Per-cell item spawn probability before the global modifier.
    pub item: f32,
    /// Decoration density before the global modifier.
    pub decoration: f32,
    /// Structure affinity. Kept for authoring symmetry; structure rolls use
    /// the global modifier alone.
    pub structure: f32,
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            enemy: 0.1,
            item: 0.05,
            decoration: 0.3,
            structure: 0.02,
        }
    }
}

/// Immutable authoring bundle for one biome.
#[derive(Debug, Clone)]
pub struct BiomeDefinition {
    /// Display name, used in logs.
    pub name: String,
    /// Debug color (R, G, B) for overlays and map dumps.
    pub debug_color: (u8, u8, u8),
    /// Spawn-rate scalars.
    pub rates: SpawnRates,
    /// Ground tile pool.
    pub terrain: Vec<ContentTemplate>,
    /// Hostile content pool.
    pub enemies: Vec<ContentTemplate>,
    /// Pickup pool.
    pub items: Vec<ContentTemplate>,
    /// Set-piece pool; may be empty and fall back to the global pool.
    pub structures: Vec<ContentTemplate>,
    /// Filler pool; may be empty and fall back to the global pool.
    pub decorations: Vec<ContentTemplate>,
}

impl BiomeDefinition {
    /// Biome-local template pool for a category.
    pub fn templates(&self, kind: ContentKind) -> &[ContentTemplate] {
        match kind {
            ContentKind::Terrain => &self.terrain,
            ContentKind::Enemy => &self.enemies,
            ContentKind::Item => &self.items,
            ContentKind::Structure => &self.structures,
            ContentKind::Decoration => &self.decorations,
        }
    }
}

/// Global per-category template pools used when a biome provides none.
///
/// Partial biome configuration (a biome with no structures, say) is an
/// expected authoring state, not an error.
#[derive(Debug, Clone, Default)]
pub struct FallbackTemplates {
    /// Global ground tile pool.
    pub terrain: Vec<ContentTemplate>,
    /// Global hostile pool.
    pub enemies: Vec<ContentTemplate>,
    /// Global pickup pool.
    pub items: Vec<ContentTemplate>,
    /// Global set-piece pool.
    pub structures: Vec<ContentTemplate>,
    /// Global filler pool.
    pub decorations: Vec<ContentTemplate>,
}

impl FallbackTemplates {
    fn templates(&self, kind: ContentKind) -> &[ContentTemplate] {
        match kind {
            ContentKind::Terrain => &self.terrain,
            ContentKind::Enemy => &self.enemies,
            ContentKind::Item => &self.items,
            ContentKind::Structure => &self.structures,
            ContentKind::Decoration => &self.decorations,
        }
    }
}

/// Resolves "which biome owns this chunk coordinate" via a noise field.
pub struct BiomeRegistry {
    biomes: Vec<BiomeDefinition>,
    fallback: FallbackTemplates,
    field: NoiseGenerator,
}

impl BiomeRegistry {
    /// Build a registry from a biome table and global fallback pools.
    ///
    /// An empty table is not an error: a single default biome is synthesized
    /// from the fallback pools and default spawn rates, with one warning.
    pub fn new(
        mut biomes: Vec<BiomeDefinition>,
        fallback: FallbackTemplates,
        world_seed: u64,
        biome_noise_scale: f64,
    ) -> Self {
        if biomes.is_empty() {
            warn!("no biome table configured, synthesizing a default biome from global pools");
            biomes.push(BiomeDefinition {
                name: "default".to_string(),
                debug_color: (128, 128, 128),
                rates: SpawnRates::default(),
                terrain: fallback.terrain.clone(),
                enemies: fallback.enemies.clone(),
                items: fallback.items.clone(),
                structures: fallback.structures.clone(),
                decorations: fallback.decorations.clone(),
            });
        }
        Self {
            biomes,
            fallback,
            field: NoiseGenerator::new(NoiseConfig::biome(world_seed as u32, biome_noise_scale)),
        }
    }

    /// Number of configured (or synthesized) biomes.
    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    /// Always false; construction guarantees at least one biome.
    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// Resolve the biome owning a chunk coordinate.
    ///
    /// Samples the noise field at the coordinate, maps the unit value
    /// linearly onto the table index range and clamps. Pure in `coord` and
    /// the static configuration; load history never affects the result.
    pub fn resolve(&self, coord: ChunkCoord) -> &BiomeDefinition {
        let unit = self.field.sample_2d_unit(f64::from(coord.x), f64::from(coord.y));
        let index = ((unit * self.biomes.len() as f64) as usize).min(self.biomes.len() - 1);
        &self.biomes[index]
    }

    /// Template pool for a category, preferring the biome's own pool and
    /// falling back to the global one. May be empty, which callers treat as
    /// "no content available" for that category.
    pub fn templates_for<'a>(
        &'a self,
        biome: &'a BiomeDefinition,
        kind: ContentKind,
    ) -> &'a [ContentTemplate] {
        let own = biome.templates(kind);
        if own.is_empty() {
            self.fallback.templates(kind)
        } else {
            own
        }
    }
}
