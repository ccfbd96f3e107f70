//! An in-memory [`Scene`] that keeps every live batch.
//!
//! Used by the headless frame driver and by tests, which inspect it to see
//! exactly what the world handed to the renderer.

use std::collections::HashMap;

use log::trace;

use super::{BatchId, Scene, SurfaceBatch};

/// Stores the batches currently displayed, keyed by handle.
#[derive(Debug, Default)]
pub struct BatchScene {
    batches: HashMap<BatchId, SurfaceBatch>,
    next_id: u64,
    added_total: u64,
    removed_total: u64,
}

impl BatchScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live batch.
    pub fn get(&self, id: BatchId) -> Option<&SurfaceBatch> {
        self.batches.get(&id)
    }

    /// Whether the handle refers to a live batch.
    pub fn contains(&self, id: BatchId) -> bool {
        self.batches.contains_key(&id)
    }

    /// Iterates over every live batch.
    pub fn batches(&self) -> impl Iterator<Item = (&BatchId, &SurfaceBatch)> {
        self.batches.iter()
    }

    /// Number of live batches.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Number of quads across all live batches.
    pub fn total_quads(&self) -> usize {
        self.batches.values().map(SurfaceBatch::quad_count).sum()
    }

    /// Number of batches ever added.
    pub fn added_total(&self) -> u64 {
        self.added_total
    }

    /// Number of batches ever removed.
    pub fn removed_total(&self) -> u64 {
        self.removed_total
    }
}

impl Scene for BatchScene {
    fn add_batch(&mut self, batch: SurfaceBatch) -> BatchId {
        let id = BatchId(self.next_id);
        self.next_id += 1;
        self.added_total += 1;
        trace!(
            "Adding batch {:?} (block {}, {} quads) at {:?}",
            id,
            batch.block_id,
            batch.quad_count(),
            batch.origin
        );
        self.batches.insert(id, batch);
        id
    }

    fn remove_batch(&mut self, id: BatchId) -> Option<SurfaceBatch> {
        let removed = self.batches.remove(&id);
        if removed.is_some() {
            self.removed_total += 1;
        }
        removed
    }
}
