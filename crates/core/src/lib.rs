#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod seed;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use seed::{chunk_rng, derive_chunk_seed};

/// Chunk coordinate (X, Y) on the infinite chunk grid.
///
/// This is the sole identity of a chunk: two coordinates are equal iff both
/// components match. Implements Ord for deterministic iteration in
/// BTreeMap/BTreeSet (sorts by x, then y).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    /// Grid column.
    pub x: i32,
    /// Grid row.
    pub y: i32,
}

impl ChunkCoord {
    /// Construct a coordinate from its grid components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance to another coordinate.
    ///
    /// This is the metric used for retention: a square ring of radius `r`
    /// around a coordinate is exactly the set of coordinates at Chebyshev
    /// distance `<= r`.
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Monotone observer tick driving the streaming loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// First tick in any streaming timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

impl Default for Tick {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_coord_equality_is_componentwise() {
        assert_eq!(ChunkCoord::new(3, -7), ChunkCoord::new(3, -7));
        assert_ne!(ChunkCoord::new(3, -7), ChunkCoord::new(-7, 3));
    }

    #[test]
    fn chunk_coord_ordering_sorts_x_then_y() {
        let a = ChunkCoord::new(0, 5);
        let b = ChunkCoord::new(1, 0);
        let c = ChunkCoord::new(0, 6);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn chebyshev_distance_is_max_axis_delta() {
        let origin = ChunkCoord::new(0, 0);
        assert_eq!(origin.chebyshev_distance(ChunkCoord::new(3, 1)), 3);
        assert_eq!(origin.chebyshev_distance(ChunkCoord::new(-2, -4)), 4);
        assert_eq!(origin.chebyshev_distance(origin), 0);
    }

    #[test]
    fn chunk_coord_display() {
        assert_eq!(format!("{}", ChunkCoord::new(5, -3)), "(5, -3)");
    }

    #[test]
    fn chunk_coord_serialization_roundtrip() {
        let coord = ChunkCoord::new(-5, 10);
        let json = serde_json::to_string(&coord).unwrap();
        let back: ChunkCoord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coord);
    }

    #[test]
    fn tick_advances() {
        let tick = Tick::ZERO.advance(3).advance(2);
        assert_eq!(tick, Tick(5));
    }
}
