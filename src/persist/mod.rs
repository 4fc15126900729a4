//! Node map persistence: text codec and background loading

pub mod codec;
pub mod loader;

pub use codec::{load_node_map, node_map_path, parse_line, save_node_map};
pub use loader::{LoadEvent, NodeMapLoader};
