//! Discrete commands accepted by the session controller

use crate::grid::NodeCoord;

/// A discrete command event, typically bound to a host key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle between `Logging` and `Paused`
    TogglePause,
    /// Open a logging session, or close it and save the node map
    ToggleLogging,
    /// While paused, mark the observer's cell as a fill corner
    SetCorner,
    /// While paused, revert the most recent logging action
    Undo,
    /// Merge the current map's node map file from disk
    Load,
    /// Remove the given pre-quantized cells, bypassing history
    RemoveSelected(Vec<NodeCoord>),
}
