#![warn(missing_docs)]
//! Chunk lifecycle and deterministic generation engine.
//!
//! Lazily materializes terrain, enemies, items, structures and decorations in
//! fixed-size chunks around a moving observer, and reclaims chunks once they
//! fall out of range. Rendering, input, combat and persistence live behind
//! the [`Spawner`] and [`EventSink`] seams and are not this crate's concern.

mod biome;
mod chunk;
mod config;
mod coords;
mod events;
mod generator;
mod lifecycle;
mod lod;
mod noise_field;
mod pool;
mod template;

pub use biome::*;
pub use chunk::*;
pub use config::*;
pub use coords::*;
pub use events::*;
pub use generator::*;
pub use lifecycle::*;
pub use lod::*;
pub use noise_field::*;
pub use pool::*;
pub use template::*;
