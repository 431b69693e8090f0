//! Content templates and the external spawner seam.
//!
//! A template is an opaque, reusable descriptor for a spawnable thing; the
//! engine only ever draws one from a biome-scoped collection and asks the
//! embedding application's [`Spawner`] to instantiate it at a position. What
//! a template actually looks like (sprite, stats, prefab) is out of scope.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Content categories placed by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// Ground tiles, rendered behind all other content.
    Terrain,
    /// Hostile content; receives a distance-based difficulty scalar.
    Enemy,
    /// Pickups.
    Item,
    /// Larger set pieces.
    Structure,
    /// Non-interactive filler.
    Decoration,
}

impl ContentKind {
    /// Categories rolled in the content pass, in strict priority order.
    ///
    /// The first successful roll wins the cell; changing this order changes
    /// observable placement distributions.
    pub const CONTENT_PRIORITY: [ContentKind; 4] = [
        ContentKind::Enemy,
        ContentKind::Item,
        ContentKind::Structure,
        ContentKind::Decoration,
    ];
}

/// Stable identifier for a content template within the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

/// Opaque descriptor for a spawnable thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTemplate {
    /// Application-defined identity.
    pub id: TemplateId,
    /// Category this template belongs to.
    pub kind: ContentKind,
    /// Human-readable name for logs and debugging.
    pub name: String,
}

impl ContentTemplate {
    /// Convenience constructor.
    pub fn new(id: u32, kind: ContentKind, name: impl Into<String>) -> Self {
        Self {
            id: TemplateId(id),
            kind,
            name: name.into(),
        }
    }
}

/// Opaque handle to a spawned content instance, issued by the [`Spawner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

/// External factory that instantiates templates in the presentation world.
///
/// Constructor-injected into the engine; the engine never resolves it through
/// any global lookup. All methods are fire-and-forget from the engine's
/// perspective except [`despawn`], whose return value lets teardown proceed
/// best-effort past already-invalid handles.
///
/// [`despawn`]: Spawner::despawn
pub trait Spawner {
    /// Instantiate `template` at `position`, returning a handle the engine
    /// will hold until the owning chunk unloads.
    fn spawn(&mut self, template: &ContentTemplate, position: Vec2) -> EntityHandle;

    /// Destroy a previously spawned instance. Returns false if the handle was
    /// already invalid; the engine logs and continues.
    fn despawn(&mut self, handle: EntityHandle) -> bool;

    /// Toggle the active/visible presentation state of an instance.
    fn set_active(&mut self, handle: EntityHandle, active: bool);
}

/// Spawner that materializes nothing, for headless runs and benchmarks.
#[derive(Debug, Default)]
pub struct NullSpawner {
    next: u64,
}

impl Spawner for NullSpawner {
    fn spawn(&mut self, _template: &ContentTemplate, _position: Vec2) -> EntityHandle {
        let handle = EntityHandle(self.next);
        self.next += 1;
        handle
    }

    fn despawn(&mut self, _handle: EntityHandle) -> bool {
        true
    }

    fn set_active(&mut self, _handle: EntityHandle, _active: bool) {}
}
