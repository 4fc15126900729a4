//! Undo history of logging actions

use super::coord::NodeCoord;

/// One undoable unit of cell insertions
///
/// A single manual point log produces a one-element batch; a region fill
/// produces one batch holding every newly inserted cell.
pub type Batch = Vec<NodeCoord>;

/// LIFO stack of batches
///
/// The top of the stack is always the most recently completed logging
/// action that has not yet been undone.
#[derive(Debug, Default, Clone)]
pub struct History {
    batches: Vec<Batch>,
}

impl History {
    /// Create a new empty history
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
        }
    }

    /// Push a completed batch onto the stack
    pub fn push(&mut self, batch: Batch) {
        self.batches.push(batch);
    }

    /// Pop the most recent batch, if any
    pub fn pop(&mut self) -> Option<Batch> {
        self.batches.pop()
    }

    /// Number of batches on the stack
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Check if there is nothing to undo
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Peek at the most recent batch without popping it
    pub fn last(&self) -> Option<&Batch> {
        self.batches.last()
    }
}
