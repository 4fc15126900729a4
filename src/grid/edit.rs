//! Editing operations on the logged cell set
//!
//! Point logging and region fills record their insertions as batches on
//! the history stack so they can be undone as one unit. Direct removal
//! (`remove_nodes`) bypasses history and is not undoable.

use glam::Vec3;

use super::coord::NodeCoord;
use super::history::{Batch, History};
use super::set::NodeSet;

/// Result of an undo request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoResult {
    /// The most recent batch was reverted; holds the removed cells
    Undone(Batch),
    /// The history stack was empty
    NoHistory,
}

/// Log the cell containing a world position
///
/// Returns the one-element batch when the cell was newly inserted, `None`
/// when it was already logged (no set mutation, no history entry).
pub fn log_point(
    position: Vec3,
    cell_size: f32,
    nodes: &mut NodeSet,
    history: &mut History,
) -> Option<Batch> {
    let coord = NodeCoord::from_world_pos(position, cell_size);
    if !nodes.insert(coord) {
        return None;
    }

    let batch = vec![coord];
    history.push(batch.clone());
    Some(batch)
}

/// Fill the inclusive axis-aligned box between two corner cells
///
/// Iterates x-major, then y, then z, all ascending. Cells already present
/// are skipped and excluded from the batch so a later undo never removes
/// a cell this fill did not add. The batch is pushed onto history even
/// when empty, keeping one history entry per completed corner pair.
pub fn fill_region(
    corner_a: NodeCoord,
    corner_b: NodeCoord,
    nodes: &mut NodeSet,
    history: &mut History,
) -> Batch {
    let min_x = corner_a.x.min(corner_b.x);
    let max_x = corner_a.x.max(corner_b.x);
    let min_y = corner_a.y.min(corner_b.y);
    let max_y = corner_a.y.max(corner_b.y);
    let min_z = corner_a.z.min(corner_b.z);
    let max_z = corner_a.z.max(corner_b.z);

    let mut batch = Batch::new();
    for x in min_x..=max_x {
        for y in min_y..=max_y {
            for z in min_z..=max_z {
                let coord = NodeCoord::new(x, y, z);
                if nodes.insert(coord) {
                    batch.push(coord);
                }
            }
        }
    }

    history.push(batch.clone());
    batch
}

/// Revert the most recent logging action
///
/// Pops the top batch and removes each of its cells from the set. Cells
/// already absent are tolerated. Returns the batch so the caller can
/// retire the matching markers.
pub fn undo_last(history: &mut History, nodes: &mut NodeSet) -> UndoResult {
    match history.pop() {
        Some(batch) => {
            for &coord in &batch {
                nodes.remove(coord);
            }
            UndoResult::Undone(batch)
        }
        None => UndoResult::NoHistory,
    }
}

/// Remove specific cells from the set, bypassing history
///
/// Targets are pre-quantized by the caller. Absent cells are skipped.
/// Returns the cells actually removed so their markers can be destroyed.
pub fn remove_nodes(targets: &[NodeCoord], nodes: &mut NodeSet) -> Vec<NodeCoord> {
    let mut removed = Vec::new();
    for &coord in targets {
        if nodes.remove(coord) {
            removed.push(coord);
        }
    }
    removed
}
