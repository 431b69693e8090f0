#![warn(missing_docs)]
//! Deterministic testing surfaces: a bookkeeping spawner and lifecycle event
//! capture for worldtests.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use driftworld_core::ChunkCoord;
use driftworld_engine::{
    ContentKind, ContentTemplate, EntityHandle, EventSink, Spawner, TemplateId, WorldChunk,
};
use glam::Vec2;

/// One spawn a [`RecordingSpawner`] currently considers live.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveEntity {
    /// Template the instance was created from.
    pub template: TemplateId,
    /// Category of the instance.
    pub kind: ContentKind,
    /// Placement position.
    pub position: Vec2,
    /// Last activity state the engine requested.
    pub active: bool,
}

/// Spawner that keeps full books on every instance it issues.
///
/// Used by tests to assert the leak-freedom invariant: after unloading,
/// every handle has been released exactly once, and none twice.
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    next: u64,
    live: BTreeMap<EntityHandle, LiveEntity>,
    /// Total spawns issued over the spawner's lifetime.
    pub total_spawned: u64,
    /// Total successful despawns.
    pub total_despawned: u64,
    /// Despawns of handles that were not live (double-release attempts).
    pub stale_despawns: u64,
    /// Handles that should report as invalid on despawn, for teardown tests.
    pub poisoned: Vec<EntityHandle>,
}

impl RecordingSpawner {
    /// Number of instances currently live.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Look up a live instance.
    pub fn live(&self, handle: EntityHandle) -> Option<&LiveEntity> {
        self.live.get(&handle)
    }

    /// Iterate live instances in handle order.
    pub fn live_entities(&self) -> impl Iterator<Item = (&EntityHandle, &LiveEntity)> {
        self.live.iter()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&mut self, template: &ContentTemplate, position: Vec2) -> EntityHandle {
        let handle = EntityHandle(self.next);
        self.next += 1;
        self.total_spawned += 1;
        self.live.insert(
            handle,
            LiveEntity {
                template: template.id,
                kind: template.kind,
                position,
                active: true,
            },
        );
        handle
    }

    fn despawn(&mut self, handle: EntityHandle) -> bool {
        if self.poisoned.contains(&handle) {
            self.live.remove(&handle);
            self.stale_despawns += 1;
            return false;
        }
        if self.live.remove(&handle).is_some() {
            self.total_despawned += 1;
            true
        } else {
            self.stale_despawns += 1;
            false
        }
    }

    fn set_active(&mut self, handle: EntityHandle, active: bool) {
        if let Some(entity) = self.live.get_mut(&handle) {
            entity.active = active;
        }
    }
}

/// A captured lifecycle notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CapturedEvent {
    /// Chunk generated, with its total entity count.
    Generated {
        /// Coordinate of the generated chunk.
        coord: ChunkCoord,
        /// Entities placed, terrain included.
        entities: usize,
    },
    /// Chunk unloaded.
    Unloaded {
        /// Coordinate of the unloaded chunk.
        coord: ChunkCoord,
    },
    /// Observer crossed a chunk boundary.
    ObserverChanged {
        /// Chunk the observer moved into.
        current: ChunkCoord,
        /// Chunk the observer came from.
        previous: ChunkCoord,
    },
}

/// Event sink that records every notification in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    /// Captured events, oldest first.
    pub events: Vec<CapturedEvent>,
}

impl EventLog {
    /// Count captured events of a given discriminant.
    pub fn count(&self, matches: impl Fn(&CapturedEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matches(e)).count()
    }
}

impl EventSink for EventLog {
    fn chunk_generated(&mut self, coord: ChunkCoord, chunk: &WorldChunk) {
        self.events.push(CapturedEvent::Generated {
            coord,
            entities: chunk.entities().len(),
        });
    }

    fn chunk_unloaded(&mut self, coord: ChunkCoord) {
        self.events.push(CapturedEvent::Unloaded { coord });
    }

    fn observer_chunk_changed(&mut self, current: ChunkCoord, previous: ChunkCoord) {
        self.events
            .push(CapturedEvent::ObserverChanged { current, previous });
    }
}

/// Timestamped JSONL record for headless run artifacts.
#[derive(Debug, Serialize)]
struct JsonlRecord<'a> {
    timestamp: chrono::DateTime<chrono::Utc>,
    event: &'a CapturedEvent,
}

/// A sink that writes captured events as newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &CapturedEvent) -> Result<()> {
        let record = JsonlRecord {
            timestamp: chrono::Utc::now(),
            event,
        };
        let line = serde_json::to_string(&record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_spawner_tracks_live_set() {
        let mut spawner = RecordingSpawner::default();
        let template = ContentTemplate::new(1, ContentKind::Item, "coin");
        let a = spawner.spawn(&template, Vec2::new(1.0, 2.0));
        let b = spawner.spawn(&template, Vec2::ZERO);
        assert_eq!(spawner.live_count(), 2);
        assert!(spawner.despawn(a));
        assert_eq!(spawner.live_count(), 1);
        // Double release is reported, not ignored.
        assert!(!spawner.despawn(a));
        assert_eq!(spawner.stale_despawns, 1);
        assert!(spawner.despawn(b));
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let path = std::env::temp_dir().join(format!(
            "driftworld-events-{}.jsonl",
            std::process::id()
        ));
        let mut sink = JsonlSink::create(&path).unwrap();
        sink.write(&CapturedEvent::Unloaded {
            coord: ChunkCoord::new(1, 2),
        })
        .unwrap();
        sink.write(&CapturedEvent::ObserverChanged {
            current: ChunkCoord::new(1, 0),
            previous: ChunkCoord::new(0, 0),
        })
        .unwrap();
        drop(sink);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        std::fs::remove_file(&path).ok();
    }
}
