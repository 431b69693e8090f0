//! Lifecycle event publication.
//!
//! The engine announces chunk lifecycle transitions to the embedding
//! application fire-and-forget: no acknowledgment, no subscriber required.
//! Emission order within the engine is deterministic (coordinate order
//! within one boundary crossing); no ordering is promised relative to other
//! subsystems' traffic.

use driftworld_core::ChunkCoord;

use crate::chunk::WorldChunk;

/// Subscriber seam for chunk lifecycle notifications.
///
/// Constructor-injected; use [`NullSink`] when nobody listens.
pub trait EventSink {
    /// A chunk finished generating and entered the loaded set.
    fn chunk_generated(&mut self, coord: ChunkCoord, chunk: &WorldChunk);

    /// A chunk was torn down and left the loaded set.
    fn chunk_unloaded(&mut self, coord: ChunkCoord);

    /// The observer crossed a chunk boundary.
    fn observer_chunk_changed(&mut self, current: ChunkCoord, previous: ChunkCoord);
}

/// Sink that discards every notification.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn chunk_generated(&mut self, _coord: ChunkCoord, _chunk: &WorldChunk) {}

    fn chunk_unloaded(&mut self, _coord: ChunkCoord) {}

    fn observer_chunk_changed(&mut self, _current: ChunkCoord, _previous: ChunkCoord) {}
}
