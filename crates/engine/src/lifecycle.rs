//! Observer-driven chunk load/unload orchestration.
//!
//! One logical thread owns the loaded-chunk map. Each tick is gated on a
//! single chunk-equality check, so per-frame cost stays near zero while the
//! observer remains inside one chunk; all real work happens on boundary
//! crossings. Nothing in here may panic or propagate an error out of the
//! tick path.

use std::collections::BTreeMap;

use driftworld_core::{ChunkCoord, Tick};
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::biome::BiomeRegistry;
use crate::chunk::WorldChunk;
use crate::config::{ConfigError, StreamingConfig};
use crate::coords::world_to_chunk;
use crate::events::EventSink;
use crate::generator::ChunkGenerator;
use crate::pool::ChunkPool;
use crate::template::Spawner;

/// Streams chunks around a moving observer.
///
/// Tracks the set of loaded chunks keyed by coordinate (a `BTreeMap`, so
/// iteration and event emission order are deterministic), generates
/// newly-required chunks on boundary crossings and reclaims chunks past the
/// retention radius plus one chunk of hysteresis.
pub struct ChunkStreamer {
    config: StreamingConfig,
    registry: BiomeRegistry,
    generator: ChunkGenerator,
    pool: ChunkPool,
    loaded: BTreeMap<ChunkCoord, WorldChunk>,
    observer_chunk: Option<ChunkCoord>,
    tick: Tick,
}

impl ChunkStreamer {
    /// Build a streamer from validated configuration and a biome registry.
    pub fn new(config: StreamingConfig, registry: BiomeRegistry) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = ChunkGenerator::new(config.clone());
        let pool = ChunkPool::new(config.pooling);
        Ok(Self {
            config,
            registry,
            generator,
            pool,
            loaded: BTreeMap::new(),
            observer_chunk: None,
            tick: Tick::ZERO,
        })
    }

    /// Advance one tick with the observer at `observer`.
    ///
    /// If the observer is still inside the chunk it occupied last tick this
    /// does nothing (no scan, no allocation). On a boundary crossing -
    /// including arbitrary teleports - the required set around the new chunk
    /// is generated and everything past the retention band is unloaded.
    pub fn update(
        &mut self,
        observer: Vec2,
        spawner: &mut dyn Spawner,
        events: &mut dyn EventSink,
    ) {
        self.tick = self.tick.advance(1);
        let current = world_to_chunk(observer, self.config.chunk_size);
        if self.observer_chunk == Some(current) {
            return;
        }
        let previous = self.observer_chunk.replace(current);
        if let Some(previous) = previous {
            debug!(%previous, %current, "observer crossed chunk boundary");
            events.observer_chunk_changed(current, previous);
        } else {
            debug!(%current, "observer entered the world");
        }

        self.load_around(current, spawner, events);
        self.unload_distant(current, spawner, events);
    }

    /// Tear down and regenerate a single chunk.
    ///
    /// Defined as unload-then-generate, never an in-place patch. A
    /// coordinate that was never loaded is simply generated fresh.
    pub fn force_regenerate(
        &mut self,
        coord: ChunkCoord,
        spawner: &mut dyn Spawner,
        events: &mut dyn EventSink,
    ) {
        if let Some(chunk) = self.loaded.remove(&coord) {
            self.teardown(chunk, spawner);
            events.chunk_unloaded(coord);
        }
        self.generate_into_loaded(coord, spawner, events);
    }

    /// Number of currently loaded chunks.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// True when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Fetch a loaded chunk.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&WorldChunk> {
        self.loaded.get(&coord)
    }

    /// Coordinates of all loaded chunks, in deterministic order.
    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.loaded.keys().copied()
    }

    /// Loaded chunks, in deterministic order.
    pub fn chunks(&self) -> impl Iterator<Item = &WorldChunk> {
        self.loaded.values()
    }

    pub(crate) fn chunks_mut(&mut self) -> impl Iterator<Item = &mut WorldChunk> {
        self.loaded.values_mut()
    }

    /// The chunk the observer occupied at the last update, if any.
    pub fn observer_chunk(&self) -> Option<ChunkCoord> {
        self.observer_chunk
    }

    /// Tick counter as of the last update.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Log pool counters.
    pub fn log_pool_stats(&self) {
        self.pool.log_stats();
    }

    fn load_around(
        &mut self,
        center: ChunkCoord,
        spawner: &mut dyn Spawner,
        events: &mut dyn EventSink,
    ) {
        let radius = self.config.retention_radius;
        let mut generated = 0u32;
        // dx-major iteration matches ChunkCoord ordering, so generation
        // events come out in coordinate order.
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let coord = ChunkCoord::new(center.x + dx, center.y + dy);
                if self.loaded.contains_key(&coord) {
                    continue;
                }
                self.generate_into_loaded(coord, spawner, events);
                generated += 1;
            }
        }
        if generated > 0 {
            info!(%center, generated, loaded = self.loaded.len(), "generated chunks");
        }
    }

    fn unload_distant(
        &mut self,
        center: ChunkCoord,
        spawner: &mut dyn Spawner,
        events: &mut dyn EventSink,
    ) {
        // One chunk of hysteresis past the retention radius avoids
        // load/unload thrashing right at the boundary.
        let cutoff = self.config.retention_radius + 1;
        let evict: Vec<ChunkCoord> = self
            .loaded
            .keys()
            .copied()
            .filter(|coord| coord.chebyshev_distance(center) > cutoff)
            .collect();
        for coord in evict {
            // Present by construction; the coordinate was just collected.
            if let Some(chunk) = self.loaded.remove(&coord) {
                self.teardown(chunk, spawner);
                events.chunk_unloaded(coord);
            }
        }
    }

    fn generate_into_loaded(
        &mut self,
        coord: ChunkCoord,
        spawner: &mut dyn Spawner,
        events: &mut dyn EventSink,
    ) {
        let biome = self.registry.resolve(coord);
        let chunk = self.generator.generate(
            coord,
            self.tick,
            biome,
            &self.registry,
            &mut self.pool,
            spawner,
        );
        events.chunk_generated(coord, &chunk);
        if let Some(stale) = self.loaded.insert(coord, chunk) {
            // Unreachable by construction (callers check residency first);
            // tear the stale record down rather than leak its entities.
            warn!(%coord, "displaced an already-loaded chunk, releasing it");
            self.teardown(stale, spawner);
        }
    }

    /// Release every entity in the chunk best-effort, then pool the record.
    fn teardown(&mut self, mut chunk: WorldChunk, spawner: &mut dyn Spawner) {
        let coord = chunk.coord();
        for entity in chunk.drain_entities() {
            if !spawner.despawn(entity.handle) {
                // A stale handle must not abort the rest of the teardown.
                warn!(%coord, handle = entity.handle.0, "stale entity handle at unload");
            }
        }
        self.pool.release(chunk);
    }
}
