//! driftworld - headless chunk-streaming demo
//!
//! Walks a scripted observer through a procedurally generated world and logs
//! chunk lifecycle activity. No rendering; the spawner here only counts.

mod config;

use anyhow::Result;
use driftworld_core::ChunkCoord;
use driftworld_engine::{
    BiomeDefinition, BiomeRegistry, ChunkStreamer, ContentKind, ContentTemplate, EventSink,
    FallbackTemplates, LodController, NullSpawner, SpawnRates, StreamingConfig, WorldChunk,
};
use glam::Vec2;
use tracing::info;

const DEMO_TICKS: u64 = 600;
const OBSERVER_SPEED: f32 = 4.0;

/// Counts lifecycle notifications for the end-of-run summary.
#[derive(Default)]
struct TallySink {
    generated: u64,
    unloaded: u64,
    crossings: u64,
}

impl EventSink for TallySink {
    fn chunk_generated(&mut self, _coord: ChunkCoord, _chunk: &WorldChunk) {
        self.generated += 1;
    }

    fn chunk_unloaded(&mut self, _coord: ChunkCoord) {
        self.unloaded += 1;
    }

    fn observer_chunk_changed(&mut self, current: ChunkCoord, previous: ChunkCoord) {
        self.crossings += 1;
        info!(%previous, %current, "observer crossed chunk boundary");
    }
}

fn demo_biomes() -> Vec<BiomeDefinition> {
    vec![
        BiomeDefinition {
            name: "meadow".to_string(),
            debug_color: (96, 176, 64),
            rates: SpawnRates {
                enemy: 0.12,
                item: 0.08,
                decoration: 0.45,
                structure: 0.02,
            },
            terrain: vec![
                ContentTemplate::new(1, ContentKind::Terrain, "grass"),
                ContentTemplate::new(2, ContentKind::Terrain, "clover"),
            ],
            enemies: vec![ContentTemplate::new(10, ContentKind::Enemy, "slime")],
            items: vec![ContentTemplate::new(20, ContentKind::Item, "berry")],
            structures: vec![],
            decorations: vec![
                ContentTemplate::new(40, ContentKind::Decoration, "bush"),
                ContentTemplate::new(41, ContentKind::Decoration, "boulder"),
            ],
        },
        BiomeDefinition {
            name: "ashlands".to_string(),
            debug_color: (122, 92, 92),
            rates: SpawnRates {
                enemy: 0.28,
                item: 0.04,
                decoration: 0.18,
                structure: 0.03,
            },
            terrain: vec![ContentTemplate::new(3, ContentKind::Terrain, "ash")],
            enemies: vec![
                ContentTemplate::new(11, ContentKind::Enemy, "ember"),
                ContentTemplate::new(12, ContentKind::Enemy, "wraith"),
            ],
            items: vec![ContentTemplate::new(21, ContentKind::Item, "cinder")],
            structures: vec![ContentTemplate::new(30, ContentKind::Structure, "obelisk")],
            decorations: vec![],
        },
        BiomeDefinition {
            name: "frostreach".to_string(),
            debug_color: (190, 210, 235),
            rates: SpawnRates {
                enemy: 0.18,
                item: 0.06,
                decoration: 0.25,
                structure: 0.02,
            },
            terrain: vec![
                ContentTemplate::new(4, ContentKind::Terrain, "snow"),
                ContentTemplate::new(5, ContentKind::Terrain, "ice"),
            ],
            enemies: vec![ContentTemplate::new(13, ContentKind::Enemy, "howler")],
            items: vec![ContentTemplate::new(22, ContentKind::Item, "frostbloom")],
            structures: vec![],
            decorations: vec![ContentTemplate::new(42, ContentKind::Decoration, "drift")],
        },
    ]
}

fn demo_fallbacks() -> FallbackTemplates {
    FallbackTemplates {
        structures: vec![ContentTemplate::new(31, ContentKind::Structure, "cairn")],
        decorations: vec![ContentTemplate::new(43, ContentKind::Decoration, "rubble")],
        ..Default::default()
    }
}

/// Scripted walk: an outward drift with a lateral weave plus one teleport,
/// which exercises both gradual boundary crossings and a cold jump.
fn observer_position(tick: u64) -> Vec2 {
    let base = if tick >= 400 {
        Vec2::new(-8_000.0, 2_500.0)
    } else {
        Vec2::ZERO
    };
    let t = (tick % 400) as f32;
    base + Vec2::new(t * OBSERVER_SPEED, (t * 0.05).sin() * 80.0)
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting driftworld v{}", env!("CARGO_PKG_VERSION"));

    let config: StreamingConfig = config::load();
    let lod = LodController::new(config.lod_distance);
    let registry = BiomeRegistry::new(
        demo_biomes(),
        demo_fallbacks(),
        config.world_seed,
        config.biome_noise_scale,
    );
    let mut streamer = ChunkStreamer::new(config, registry)?;

    let mut spawner = NullSpawner::default();
    let mut events = TallySink::default();

    for tick in 0..DEMO_TICKS {
        let position = observer_position(tick);
        streamer.update(position, &mut spawner, &mut events);
        lod.update(&mut streamer, position, &mut spawner);
    }

    let entities: usize = streamer.chunks().map(|c| c.entities().len()).sum();
    let active: usize = streamer
        .chunks()
        .flat_map(|c| c.entities().iter())
        .filter(|e| e.active)
        .count();
    info!(
        ticks = DEMO_TICKS,
        crossings = events.crossings,
        generated = events.generated,
        unloaded = events.unloaded,
        loaded = streamer.len(),
        entities,
        active,
        "demo walk complete"
    );
    streamer.log_pool_stats();

    Ok(())
}
