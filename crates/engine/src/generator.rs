//! Deterministic per-chunk content generation.
//!
//! All randomness comes from one RNG seeded purely by the world seed and the
//! chunk coordinate, so a chunk regenerates identically after an
//! unload/reload cycle regardless of wall-clock time, generation order or
//! prior session history.

use driftworld_core::{chunk_rng, ChunkCoord, Tick};
use glam::Vec2;
use rand::Rng;
use tracing::{debug, instrument};

use crate::biome::{BiomeDefinition, BiomeRegistry};
use crate::chunk::{SpawnedEntity, WorldChunk};
use crate::config::StreamingConfig;
use crate::coords::chunk_to_world_origin;
use crate::pool::ChunkPool;
use crate::template::{ContentKind, Spawner};

/// Populates chunk records with terrain and probability-rolled content.
pub struct ChunkGenerator {
    config: StreamingConfig,
}

impl ChunkGenerator {
    /// Create a generator. The config is assumed validated.
    pub fn new(config: StreamingConfig) -> Self {
        Self { config }
    }

    /// Generate the chunk at `coord`, drawing a record from the pool.
    ///
    /// Runs the terrain pass (a fixed sub-grid of ground tiles, placed
    /// behind everything else) and then the content pass (priority-rolled
    /// enemy/item/structure/decoration placement, bounded by the per-chunk
    /// object budget). Synchronous; completes within the calling tick.
    #[instrument(skip(self, registry, biome, pool, spawner), fields(coord = %coord, biome = %biome.name))]
    pub fn generate(
        &self,
        coord: ChunkCoord,
        tick: Tick,
        biome: &BiomeDefinition,
        registry: &BiomeRegistry,
        pool: &mut ChunkPool,
        spawner: &mut dyn Spawner,
    ) -> WorldChunk {
        let origin = chunk_to_world_origin(coord, self.config.chunk_size);
        let mut chunk = pool.acquire();
        chunk.reset(coord, origin, tick);

        let mut rng = chunk_rng(self.config.world_seed, coord);
        let corner = origin - Vec2::splat(self.config.chunk_size * 0.5);

        self.terrain_pass(&mut chunk, corner, biome, registry, &mut rng, spawner);
        self.content_pass(&mut chunk, corner, biome, registry, &mut rng, spawner);

        debug!(
            entities = chunk.entities().len(),
            objects = chunk.object_count(),
            "chunk generated"
        );
        chunk
    }

    /// Tile the chunk footprint with ground content on a fixed sub-grid,
    /// each tile jittered within its cell.
    fn terrain_pass(
        &self,
        chunk: &mut WorldChunk,
        corner: Vec2,
        biome: &BiomeDefinition,
        registry: &BiomeRegistry,
        rng: &mut impl Rng,
        spawner: &mut dyn Spawner,
    ) {
        let templates = registry.templates_for(biome, ContentKind::Terrain);
        if templates.is_empty() {
            debug!("no terrain templates available, skipping terrain pass");
            return;
        }
        let grid = self.config.terrain_grid;
        let cell = self.config.chunk_size / grid as f32;
        for gy in 0..grid {
            for gx in 0..grid {
                let jitter_x: f32 = rng.gen();
                let jitter_y: f32 = rng.gen();
                let position = corner
                    + Vec2::new(
                        (gx as f32 + jitter_x) * cell,
                        (gy as f32 + jitter_y) * cell,
                    );
                let template = &templates[rng.gen_range(0..templates.len())];
                let handle = spawner.spawn(template, position);
                chunk.push_entity(SpawnedEntity {
                    handle,
                    template: template.id,
                    kind: ContentKind::Terrain,
                    position,
                    difficulty: None,
                    active: true,
                });
            }
        }
    }

    /// Roll one content item per placement cell, in strict category priority
    /// order (enemy, item, structure, decoration). Each category consumes its
    /// own draw; the first success wins the cell. The budget check runs
    /// before any draw in a cell so a full chunk short-circuits the rest of
    /// the pass instead of discarding already-drawn content.
    fn content_pass(
        &self,
        chunk: &mut WorldChunk,
        corner: Vec2,
        biome: &BiomeDefinition,
        registry: &BiomeRegistry,
        rng: &mut impl Rng,
        spawner: &mut dyn Spawner,
    ) {
        let grid = self.config.content_grid;
        let cell = self.config.chunk_size / grid as f32;
        let mut placed = 0usize;

        'cells: for gy in 0..grid {
            for gx in 0..grid {
                if placed >= self.config.max_objects_per_chunk {
                    debug!(placed, "object budget reached, skipping remaining cells");
                    break 'cells;
                }

                let jitter_x: f32 = rng.gen();
                let jitter_y: f32 = rng.gen();
                let position = corner
                    + Vec2::new(
                        (gx as f32 + jitter_x) * cell,
                        (gy as f32 + jitter_y) * cell,
                    );

                for kind in ContentKind::CONTENT_PRIORITY {
                    let templates = registry.templates_for(biome, kind);
                    if templates.is_empty() {
                        // "No content available" is an expected authoring
                        // state; the category's roll is skipped entirely.
                        continue;
                    }
                    let probability = self.category_probability(biome, kind);
                    let roll: f32 = rng.gen();
                    if roll >= probability {
                        continue;
                    }
                    let template = &templates[rng.gen_range(0..templates.len())];
                    let difficulty = (kind == ContentKind::Enemy)
                        .then(|| self.difficulty_at(position));
                    let handle = spawner.spawn(template, position);
                    chunk.push_entity(SpawnedEntity {
                        handle,
                        template: template.id,
                        kind,
                        position,
                        difficulty,
                        active: true,
                    });
                    placed += 1;
                    break;
                }
            }
        }
    }

    fn category_probability(&self, biome: &BiomeDefinition, kind: ContentKind) -> f32 {
        match kind {
            ContentKind::Enemy => biome.rates.enemy * self.config.enemy_rate_modifier,
            ContentKind::Item => biome.rates.item * self.config.item_rate_modifier,
            // Structures roll against the global modifier alone.
            ContentKind::Structure => self.config.structure_rate_modifier,
            ContentKind::Decoration => {
                biome.rates.decoration * self.config.decoration_rate_modifier
            }
            ContentKind::Terrain => 0.0,
        }
    }

    /// Advisory difficulty scalar, monotone in distance from the world
    /// origin. Consumers may apply it however their stat model allows.
    fn difficulty_at(&self, position: Vec2) -> f32 {
        1.0 + position.distance(Vec2::ZERO) / self.config.difficulty_distance_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{FallbackTemplates, SpawnRates};
    use crate::template::{ContentTemplate, NullSpawner};

    fn test_biome(rates: SpawnRates) -> BiomeDefinition {
        BiomeDefinition {
            name: "meadow".to_string(),
            debug_color: (80, 160, 60),
            rates,
            terrain: vec![
                ContentTemplate::new(1, ContentKind::Terrain, "grass"),
                ContentTemplate::new(2, ContentKind::Terrain, "dirt"),
            ],
            enemies: vec![ContentTemplate::new(10, ContentKind::Enemy, "slime")],
            items: vec![ContentTemplate::new(20, ContentKind::Item, "coin")],
            structures: vec![ContentTemplate::new(30, ContentKind::Structure, "ruin")],
            decorations: vec![ContentTemplate::new(40, ContentKind::Decoration, "bush")],
        }
    }

    fn registry_with(biome: BiomeDefinition, config: &StreamingConfig) -> BiomeRegistry {
        BiomeRegistry::new(
            vec![biome],
            FallbackTemplates::default(),
            config.world_seed,
            config.biome_noise_scale,
        )
    }

    fn placements(config: &StreamingConfig, coord: ChunkCoord) -> Vec<(ContentKind, u32, Vec2)> {
        let registry = registry_with(test_biome(SpawnRates::default()), config);
        let generator = ChunkGenerator::new(config.clone());
        let mut pool = ChunkPool::new(config.pooling);
        let mut spawner = NullSpawner::default();
        let biome = registry.resolve(coord);
        let chunk = generator.generate(coord, Tick::ZERO, biome, &registry, &mut pool, &mut spawner);
        chunk
            .entities()
            .iter()
            .map(|e| (e.kind, e.template.0, e.position))
            .collect()
    }

    #[test]
    fn generation_is_deterministic_across_calls() {
        let config = StreamingConfig {
            world_seed: 99,
            ..Default::default()
        };
        let coord = ChunkCoord::new(4, -7);
        assert_eq!(placements(&config, coord), placements(&config, coord));
    }

    #[test]
    fn different_coordinates_differ() {
        let config = StreamingConfig {
            world_seed: 99,
            ..Default::default()
        };
        assert_ne!(
            placements(&config, ChunkCoord::new(0, 0)),
            placements(&config, ChunkCoord::new(1, 0))
        );
    }

    #[test]
    fn terrain_pass_fills_the_sub_grid() {
        let config = StreamingConfig::default();
        let entities = placements(&config, ChunkCoord::new(0, 0));
        let terrain = entities
            .iter()
            .filter(|(kind, _, _)| *kind == ContentKind::Terrain)
            .count();
        assert_eq!(terrain, config.terrain_grid * config.terrain_grid);
    }

    #[test]
    fn entities_stay_inside_the_chunk_footprint() {
        let config = StreamingConfig::default();
        let coord = ChunkCoord::new(-3, 2);
        let origin = chunk_to_world_origin(coord, config.chunk_size);
        let half = config.chunk_size * 0.5;
        for (_, _, position) in placements(&config, coord) {
            assert!((position.x - origin.x).abs() <= half);
            assert!((position.y - origin.y).abs() <= half);
        }
    }

    #[test]
    fn budget_bounds_non_terrain_entities() {
        // Max out every rate so most cells want to place something.
        let config = StreamingConfig {
            world_seed: 5,
            max_objects_per_chunk: 4,
            enemy_rate_modifier: 10.0,
            item_rate_modifier: 10.0,
            decoration_rate_modifier: 10.0,
            structure_rate_modifier: 1.0,
            ..Default::default()
        };
        for x in -5..5 {
            let entities = placements(&config, ChunkCoord::new(x, 0));
            let objects = entities
                .iter()
                .filter(|(kind, _, _)| *kind != ContentKind::Terrain)
                .count();
            assert!(objects <= 4, "chunk ({x}, 0) placed {objects} objects");
        }
    }

    #[test]
    fn empty_category_without_fallback_spawns_nothing() {
        let config = StreamingConfig {
            world_seed: 11,
            enemy_rate_modifier: 10.0,
            ..Default::default()
        };
        let mut biome = test_biome(SpawnRates {
            enemy: 1.0,
            ..SpawnRates::default()
        });
        biome.enemies.clear();
        let registry = registry_with(biome, &config);
        let generator = ChunkGenerator::new(config.clone());
        let mut pool = ChunkPool::new(true);
        let mut spawner = NullSpawner::default();

        for x in 0..100 {
            let coord = ChunkCoord::new(x, 0);
            let biome = registry.resolve(coord);
            let mut chunk =
                generator.generate(coord, Tick::ZERO, biome, &registry, &mut pool, &mut spawner);
            let enemies = chunk
                .entities()
                .iter()
                .filter(|e| e.kind == ContentKind::Enemy)
                .count();
            assert_eq!(enemies, 0, "chunk ({x}, 0) spawned enemies without templates");
            for entity in chunk.drain_entities() {
                spawner.despawn(entity.handle);
            }
            pool.release(chunk);
        }
    }

    #[test]
    fn enemy_priority_beats_lower_categories() {
        // With a guaranteed enemy roll, every decided cell is an enemy.
        let config = StreamingConfig {
            world_seed: 3,
            enemy_rate_modifier: 10.0,
            max_objects_per_chunk: 1000,
            ..Default::default()
        };
        let biome = test_biome(SpawnRates {
            enemy: 1.0,
            item: 1.0,
            decoration: 1.0,
            structure: 1.0,
        });
        let registry = registry_with(biome, &config);
        let generator = ChunkGenerator::new(config.clone());
        let mut pool = ChunkPool::new(true);
        let mut spawner = NullSpawner::default();
        let coord = ChunkCoord::new(0, 0);
        let biome = registry.resolve(coord);
        let chunk =
            generator.generate(coord, Tick::ZERO, biome, &registry, &mut pool, &mut spawner);
        let non_terrain: Vec<_> = chunk
            .entities()
            .iter()
            .filter(|e| !e.is_terrain())
            .collect();
        assert_eq!(non_terrain.len(), config.content_grid * config.content_grid);
        assert!(non_terrain.iter().all(|e| e.kind == ContentKind::Enemy));
    }

    #[test]
    fn hostile_difficulty_grows_with_distance_from_origin() {
        let config = StreamingConfig {
            world_seed: 3,
            enemy_rate_modifier: 10.0,
            ..Default::default()
        };
        let biome = test_biome(SpawnRates {
            enemy: 1.0,
            ..SpawnRates::default()
        });
        let registry = registry_with(biome, &config);
        let generator = ChunkGenerator::new(config.clone());
        let mut pool = ChunkPool::new(true);
        let mut spawner = NullSpawner::default();

        let near = generator.generate(
            ChunkCoord::new(0, 0),
            Tick::ZERO,
            registry.resolve(ChunkCoord::new(0, 0)),
            &registry,
            &mut pool,
            &mut spawner,
        );
        let far = generator.generate(
            ChunkCoord::new(100, 0),
            Tick::ZERO,
            registry.resolve(ChunkCoord::new(100, 0)),
            &registry,
            &mut pool,
            &mut spawner,
        );
        let max_near = near
            .entities()
            .iter()
            .filter_map(|e| e.difficulty)
            .fold(f32::MIN, f32::max);
        let min_far = far
            .entities()
            .iter()
            .filter_map(|e| e.difficulty)
            .fold(f32::MAX, f32::min);
        assert!(min_far > max_near);
        assert!(near.entities().iter().all(|e| {
            e.difficulty.is_some() == (e.kind == ContentKind::Enemy)
        }));
    }
}
