//! Distance-based content activation.
//!
//! Runs every tick, independent of chunk boundary crossings: content in
//! chunks near the observer is kept in the active presentation state, distant
//! content is hidden. Purely a presentation toggle; it never creates,
//! destroys or mutates generated content, and repeated calls with an
//! unchanged distance are no-ops in effect.

use glam::Vec2;

use crate::lifecycle::ChunkStreamer;
use crate::template::Spawner;

/// Toggles entity activity against the configured LOD distance.
pub struct LodController {
    lod_distance: f32,
}

impl LodController {
    /// Create a controller with the given activation distance.
    pub fn new(lod_distance: f32) -> Self {
        Self { lod_distance }
    }

    /// Evaluate every loaded chunk against the observer position.
    ///
    /// The spawner is only invoked for entities whose state actually flips.
    pub fn update(
        &self,
        streamer: &mut ChunkStreamer,
        observer: Vec2,
        spawner: &mut dyn Spawner,
    ) {
        for chunk in streamer.chunks_mut() {
            let desired = chunk.origin().distance(observer) <= self.lod_distance;
            for entity in chunk.entities_mut() {
                if entity.active != desired {
                    spawner.set_active(entity.handle, desired);
                    entity.active = desired;
                }
            }
        }
    }
}
