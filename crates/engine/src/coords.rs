//! World-space to chunk-grid coordinate mapping.
//!
//! Pure functions; the chunk-size constant comes from [`StreamingConfig`]
//! and must be positive.
//!
//! [`StreamingConfig`]: crate::StreamingConfig

use driftworld_core::ChunkCoord;
use glam::Vec2;

/// Map a continuous world-space position to the chunk containing it.
///
/// Floor division on each axis, so negative positions map correctly
/// (e.g. x = -0.1 falls in chunk column -1, not 0).
pub fn world_to_chunk(position: Vec2, chunk_size: f32) -> ChunkCoord {
    debug_assert!(chunk_size > 0.0);
    ChunkCoord::new(
        (position.x / chunk_size).floor() as i32,
        (position.y / chunk_size).floor() as i32,
    )
}

/// World-space anchor (center) of a chunk.
///
/// Inverse-consistent with [`world_to_chunk`] up to chunk granularity: the
/// returned position always maps back to the same coordinate.
pub fn chunk_to_world_origin(coord: ChunkCoord, chunk_size: f32) -> Vec2 {
    debug_assert!(chunk_size > 0.0);
    Vec2::new(
        coord.x as f32 * chunk_size + chunk_size * 0.5,
        coord.y as f32 * chunk_size + chunk_size * 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: f32 = 50.0;

    #[test]
    fn positions_inside_first_chunk_map_to_zero() {
        assert_eq!(world_to_chunk(Vec2::new(0.0, 0.0), SIZE), ChunkCoord::new(0, 0));
        assert_eq!(world_to_chunk(Vec2::new(49.9, 49.9), SIZE), ChunkCoord::new(0, 0));
    }

    #[test]
    fn boundary_crossing_increments_coordinate() {
        assert_eq!(world_to_chunk(Vec2::new(50.0, 0.0), SIZE), ChunkCoord::new(1, 0));
        assert_eq!(world_to_chunk(Vec2::new(51.0, 0.0), SIZE), ChunkCoord::new(1, 0));
    }

    #[test]
    fn negative_positions_floor_toward_negative_infinity() {
        assert_eq!(world_to_chunk(Vec2::new(-0.1, -0.1), SIZE), ChunkCoord::new(-1, -1));
        assert_eq!(world_to_chunk(Vec2::new(-50.0, 0.0), SIZE), ChunkCoord::new(-1, 0));
        assert_eq!(world_to_chunk(Vec2::new(-50.1, 0.0), SIZE), ChunkCoord::new(-2, 0));
    }

    #[test]
    fn origin_is_chunk_center() {
        assert_eq!(
            chunk_to_world_origin(ChunkCoord::new(0, 0), SIZE),
            Vec2::new(25.0, 25.0)
        );
        assert_eq!(
            chunk_to_world_origin(ChunkCoord::new(-1, 2), SIZE),
            Vec2::new(-25.0, 125.0)
        );
    }

    #[test]
    fn origin_maps_back_to_same_coordinate() {
        for x in -5..=5 {
            for y in -5..=5 {
                let coord = ChunkCoord::new(x, y);
                let origin = chunk_to_world_origin(coord, SIZE);
                assert_eq!(world_to_chunk(origin, SIZE), coord);
            }
        }
    }
}
