//! Session states and the fill corner buffer

use crate::grid::NodeCoord;

/// Observable state of the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No logging session is open
    Idle,
    /// Logging the observer's cell every tick
    Logging,
    /// Session open, tick logging suspended
    Paused,
    /// Paused with the first fill corner armed
    SettingCorners,
    /// A node map load is in flight; all commands are rejected
    Loading,
}

/// Two-slot buffer for fill corners
///
/// The first `push` arms corner A. The second completes the pair: it is
/// returned together with corner A and the buffer clears itself, so a
/// completed pair never persists.
#[derive(Debug, Default)]
pub struct CornerPair {
    armed: Option<NodeCoord>,
}

impl CornerPair {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self { armed: None }
    }

    /// Place the next corner
    ///
    /// Returns `Some((a, b))` when this call completes the pair; the
    /// buffer is empty again afterwards.
    pub fn push(&mut self, coord: NodeCoord) -> Option<(NodeCoord, NodeCoord)> {
        match self.armed.take() {
            None => {
                self.armed = Some(coord);
                None
            }
            Some(a) => Some((a, coord)),
        }
    }

    /// The armed corner A, if any
    pub fn armed(&self) -> Option<NodeCoord> {
        self.armed
    }

    /// Abandon the armed corner, returning it if one was set
    pub fn clear(&mut self) -> Option<NodeCoord> {
        self.armed.take()
    }
}
