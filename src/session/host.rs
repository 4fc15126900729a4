//! Host services consumed by the session controller

use glam::Vec3;

use super::markers::{MarkerColor, MarkerId};

/// Services supplied by the embedding host
///
/// The controller never touches the host environment directly: user
/// notices and marker rendering go through this trait, so the core stays
/// decoupled from any particular frame loop or scene graph.
pub trait SessionHost {
    /// Show a user-facing notice
    fn notify(&mut self, message: &str);

    /// Create a visual marker cube centered at `center` with edge `size`
    fn create_marker(&mut self, center: Vec3, size: f32, color: MarkerColor) -> MarkerId;

    /// Destroy a marker previously returned by `create_marker`
    fn destroy_marker(&mut self, id: MarkerId);
}
