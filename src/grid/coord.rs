//! Grid cell coordinates and world-space conversions

use std::fmt;

use glam::Vec3;

/// Default edge length of one grid cell in world units
pub const NODE_SIZE: f32 = 1.0;

/// Integer coordinate identifying one cell in the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl NodeCoord {
    /// Create a new node coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Quantize a world position to its containing cell
    ///
    /// Uses true floor division so negative positions quantize toward
    /// negative infinity, never toward zero.
    pub fn from_world_pos(pos: Vec3, cell_size: f32) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i32,
            y: (pos.y / cell_size).floor() as i32,
            z: (pos.z / cell_size).floor() as i32,
        }
    }

    /// Get the world-space center of this cell
    pub fn world_center(&self, cell_size: f32) -> Vec3 {
        Vec3::new(
            self.x as f32 * cell_size + cell_size / 2.0,
            self.y as f32 * cell_size + cell_size / 2.0,
            self.z as f32 * cell_size + cell_size / 2.0,
        )
    }
}

impl fmt::Display for NodeCoord {
    /// Formats as `(x, y, z)`, the node map file's line format
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
