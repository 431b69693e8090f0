//! Chunk record recycling.
//!
//! Pure allocation-churn optimization: a released record is reused by the
//! next acquire instead of allocating a fresh one. Behaviorally transparent;
//! disabling pooling changes no observable generation result.

use tracing::debug;

use crate::chunk::WorldChunk;

/// Free list of empty chunk records.
pub struct ChunkPool {
    free: Vec<WorldChunk>,
    enabled: bool,
    recycled: u64,
    allocated: u64,
}

impl ChunkPool {
    /// Create a pool. When `enabled` is false every acquire allocates and
    /// every release drops.
    pub fn new(enabled: bool) -> Self {
        Self {
            free: Vec::new(),
            enabled,
            recycled: 0,
            allocated: 0,
        }
    }

    /// Take an empty chunk record, recycled if one is available.
    pub fn acquire(&mut self) -> WorldChunk {
        if let Some(chunk) = self.free.pop() {
            self.recycled += 1;
            chunk
        } else {
            self.allocated += 1;
            WorldChunk::empty()
        }
    }

    /// Return a fully torn-down record for reuse.
    ///
    /// Precondition: the caller has already released every entity; the
    /// record's entity list must be empty.
    pub fn release(&mut self, chunk: WorldChunk) {
        debug_assert!(
            chunk.entities().is_empty(),
            "released chunk {} still holds entities",
            chunk.coord()
        );
        if self.enabled {
            self.free.push(chunk);
        }
    }

    /// Records currently sitting on the free list.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Log lifetime counters; useful when tuning retention radii.
    pub fn log_stats(&self) {
        debug!(
            recycled = self.recycled,
            allocated = self.allocated,
            idle = self.free.len(),
            "chunk pool stats"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_then_acquire_recycles() {
        let mut pool = ChunkPool::new(true);
        let chunk = pool.acquire();
        pool.release(chunk);
        assert_eq!(pool.idle(), 1);
        let _chunk = pool.acquire();
        assert_eq!(pool.idle(), 0);
        assert_eq!(pool.recycled, 1);
        assert_eq!(pool.allocated, 1);
    }

    #[test]
    fn disabled_pool_drops_releases() {
        let mut pool = ChunkPool::new(false);
        let chunk = pool.acquire();
        pool.release(chunk);
        assert_eq!(pool.idle(), 0);
        let _chunk = pool.acquire();
        assert_eq!(pool.allocated, 2);
    }
}
