//! Chunk records and the entities they own.

use driftworld_core::{ChunkCoord, Tick};
use glam::Vec2;

use crate::template::{ContentKind, EntityHandle, TemplateId};

/// One content instance placed in a chunk.
///
/// The handle is owned exclusively by the chunk record; no other component
/// holds a strong reference, so unloading the chunk releases everything.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedEntity {
    /// Handle issued by the spawner.
    pub handle: EntityHandle,
    /// Template the instance was created from.
    pub template: TemplateId,
    /// Category of the placed content.
    pub kind: ContentKind,
    /// World-space placement position.
    pub position: Vec2,
    /// Advisory difficulty scalar for hostile content, monotone in distance
    /// from the world origin. The engine never reads it back.
    pub difficulty: Option<f32>,
    /// Current LOD presentation state.
    pub active: bool,
}

impl SpawnedEntity {
    /// Terrain tiles render behind all other content and do not count
    /// against the per-chunk object budget.
    pub fn is_terrain(&self) -> bool {
        self.kind == ContentKind::Terrain
    }
}

/// One generated region of the world.
///
/// Created empty (fresh or recycled from the pool), populated exactly once by
/// the generator, then lives in the loaded set until unloaded. Never
/// partially regenerated in place.
#[derive(Debug)]
pub struct WorldChunk {
    coord: ChunkCoord,
    origin: Vec2,
    entities: Vec<SpawnedEntity>,
    generated_at: Tick,
}

impl WorldChunk {
    /// Allocate an empty chunk record.
    pub(crate) fn empty() -> Self {
        Self {
            coord: ChunkCoord::new(0, 0),
            origin: Vec2::ZERO,
            entities: Vec::new(),
            generated_at: Tick::ZERO,
        }
    }

    /// Re-target a (recycled) record at a new coordinate.
    ///
    /// Precondition: the entity list is already empty.
    pub(crate) fn reset(&mut self, coord: ChunkCoord, origin: Vec2, tick: Tick) {
        debug_assert!(self.entities.is_empty(), "reset of a populated chunk");
        self.coord = coord;
        self.origin = origin;
        self.generated_at = tick;
    }

    /// Grid identity of this chunk.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// World-space anchor (center), derived purely from the coordinate.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Tick at which this chunk was generated. Informational only.
    pub fn generated_at(&self) -> Tick {
        self.generated_at
    }

    /// Entities placed in this chunk, terrain included, in placement order.
    pub fn entities(&self) -> &[SpawnedEntity] {
        &self.entities
    }

    /// Mutable access for LOD toggling.
    pub(crate) fn entities_mut(&mut self) -> &mut [SpawnedEntity] {
        &mut self.entities
    }

    /// Append a placed entity during generation.
    pub(crate) fn push_entity(&mut self, entity: SpawnedEntity) {
        self.entities.push(entity);
    }

    /// Number of non-terrain entities, the quantity bounded by the budget.
    pub fn object_count(&self) -> usize {
        self.entities.iter().filter(|e| !e.is_terrain()).count()
    }

    /// Drain all entities for teardown, leaving the record empty.
    pub(crate) fn drain_entities(&mut self) -> std::vec::Drain<'_, SpawnedEntity> {
        self.entities.drain(..)
    }
}
