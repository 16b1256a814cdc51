//! Per-pass chunk pool for transient layout buffers.
//!
//! Line boxes and float lists need short-lived vectors that are opened and
//! closed many times during one pass. They are taken from this arena and handed
//! back on close, so a pass reaches a steady state with no further allocation.
//! The arena is owned by the pass and dropped with it.

use crate::box_tree::{FloatEntry, LineFragment};

/// Free list of cleared vectors of one element type.
#[derive(Debug)]
pub struct ChunkPool<T> {
    free: Vec<Vec<T>>,
    capacity: usize,
    allocated: usize,
    reused: usize,
}

impl<T> ChunkPool<T> {
    pub const fn new(capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            capacity,
            allocated: 0,
            reused: 0,
        }
    }

    /// Hand out an empty chunk, recycling a returned one when possible.
    pub fn allocate(&mut self) -> Vec<T> {
        if let Some(chunk) = self.free.pop() {
            self.reused += 1;
            chunk
        } else {
            self.allocated += 1;
            Vec::with_capacity(self.capacity)
        }
    }

    /// Return a chunk to the pool. Its contents are dropped; its capacity is kept.
    pub fn deallocate(&mut self, mut chunk: Vec<T>) {
        chunk.clear();
        self.free.push(chunk);
    }

    pub const fn allocated(&self) -> usize {
        self.allocated
    }

    pub const fn reused(&self) -> usize {
        self.reused
    }
}

/// Buffers for one layout pass.
#[derive(Debug)]
pub struct LayoutArena {
    pub(crate) fragments: ChunkPool<LineFragment>,
    pub(crate) floats: ChunkPool<FloatEntry>,
}

impl LayoutArena {
    pub const fn new(chunk_capacity: usize) -> Self {
        Self {
            fragments: ChunkPool::new(chunk_capacity),
            floats: ChunkPool::new(chunk_capacity),
        }
    }

    /// Chunks created fresh over the arena's lifetime.
    pub const fn chunks_allocated(&self) -> usize {
        self.fragments.allocated() + self.floats.allocated()
    }

    /// Chunks served from the free lists.
    pub const fn chunks_reused(&self) -> usize {
        self.fragments.reused() + self.floats.reused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returned chunks are recycled empty, with their capacity.
    ///
    /// # Panics
    /// Panics if a chunk is not reused or comes back non-empty.
    #[test]
    fn test_chunks_are_recycled() {
        let mut pool: ChunkPool<u32> = ChunkPool::new(4);
        let mut first = pool.allocate();
        first.extend([1, 2, 3, 4, 5]);
        let grown = first.capacity();
        pool.deallocate(first);

        let second = pool.allocate();
        assert!(second.is_empty());
        assert_eq!(second.capacity(), grown);
        assert_eq!(pool.allocated(), 1);
        assert_eq!(pool.reused(), 1);

        let third = pool.allocate();
        assert_eq!(third.capacity(), 4);
        assert_eq!(pool.allocated(), 2);
    }
}
