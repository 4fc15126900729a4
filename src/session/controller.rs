//! Session controller: command dispatch, per-tick logging, load polling
//!
//! All mutation of the cell set and history happens here, on the host's
//! tick thread. The only long-running operation, a node map load, runs as
//! a background reader whose parsed batches are merged during `tick`.

use glam::Vec3;

use crate::grid::edit::{self, UndoResult};
use crate::grid::{History, NodeCoord, NodeSet};
use crate::persist::codec;
use crate::persist::loader::{LoadEvent, NodeMapLoader};

use super::command::Command;
use super::config::SessionConfig;
use super::host::SessionHost;
use super::markers::{MarkerColor, MarkerId, MarkerStore};
use super::state::{CornerPair, SessionState};

pub const PAUSED_MSG: &str = "Logging positions paused...";
pub const UNPAUSED_MSG: &str = "Logging positions unpaused...";
pub const STARTED_MSG: &str = "Started logging valid positions...";
pub const STOPPED_MSG: &str = "Stopped logging valid positions. Saving to file...";
pub const SET_CORNER_A_MSG: &str = "Corner A set. Please set Corner B.";
pub const SET_CORNER_B_MSG: &str = "Corner B set. Logging surface nodes...";
pub const SURFACE_LOGGED_MSG: &str = "Surface nodes logged successfully.";
pub const NO_NODES_TO_REMOVE_MSG: &str = "No nodes to remove.";
pub const NODES_REMOVED_MSG: &str = "Last logged nodes removed.";
pub const LOADING_MSG: &str = "Starting node map loading...";
pub const FINISHED_LOADING_MSG: &str = "Finished loading nodes. Total loaded:";

/// Session mode excluding the load overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Logging,
    Paused,
}

/// An in-flight node map load
struct LoadTask {
    loader: NodeMapLoader,
    /// Newly inserted cells so far
    loaded: usize,
}

/// Drives the logging workflow against a command stream and a tick signal
pub struct SessionController {
    config: SessionConfig,
    map_id: String,
    /// Host-supplied gating flag; a disabled controller ignores everything
    enabled: bool,
    mode: Mode,
    corners: CornerPair,
    /// Red marker on the armed corner, retired with the corner
    corner_marker: Option<MarkerId>,
    nodes: NodeSet,
    history: History,
    markers: MarkerStore,
    load: Option<LoadTask>,
}

impl SessionController {
    /// Create a controller for one map
    ///
    /// `enabled` is the host's mode gate, checked once at session start.
    /// When false the controller stays inert for its whole life.
    pub fn new(config: SessionConfig, map_id: impl Into<String>, enabled: bool) -> Self {
        let map_id = map_id.into();

        if enabled {
            if let Err(e) = std::fs::create_dir_all(&config.node_map_dir) {
                log::warn!(
                    "failed to create node map dir {}: {}",
                    config.node_map_dir.display(),
                    e
                );
            }
            log::info!("node logging enabled for map {map_id}");
        }

        Self {
            config,
            map_id,
            enabled,
            mode: Mode::Idle,
            corners: CornerPair::new(),
            corner_marker: None,
            nodes: NodeSet::new(),
            history: History::new(),
            markers: MarkerStore::new(),
            load: None,
        }
    }

    /// Current observable state
    pub fn state(&self) -> SessionState {
        if self.load.is_some() {
            return SessionState::Loading;
        }
        match self.mode {
            Mode::Idle => SessionState::Idle,
            Mode::Logging => SessionState::Logging,
            Mode::Paused => {
                if self.corners.armed().is_some() {
                    SessionState::SettingCorners
                } else {
                    SessionState::Paused
                }
            }
        }
    }

    /// The logged cell set
    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    /// The undo history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Handle one discrete command
    ///
    /// `position` is the observer's current world position, used by
    /// `SetCorner`. Every command is rejected while a load is in flight.
    pub fn handle_command(
        &mut self,
        command: Command,
        position: Vec3,
        host: &mut dyn SessionHost,
    ) {
        if !self.enabled || self.load.is_some() {
            return;
        }

        match command {
            Command::TogglePause => self.toggle_pause(host),
            Command::ToggleLogging => self.toggle_logging(host),
            Command::SetCorner => {
                if self.mode == Mode::Paused {
                    self.set_corner(position, host);
                }
            }
            Command::Undo => {
                if self.mode == Mode::Paused {
                    self.undo(host);
                }
            }
            Command::Load => self.begin_load(host),
            Command::RemoveSelected(targets) => self.remove_selected(&targets, host),
        }
    }

    /// Advance one tick
    ///
    /// While a load is in flight, drains and merges its events. Otherwise,
    /// while `Logging`, logs the observer's current cell.
    pub fn tick(&mut self, position: Vec3, host: &mut dyn SessionHost) {
        if !self.enabled {
            return;
        }

        if self.load.is_some() {
            self.poll_load(host);
            return;
        }

        if self.mode == Mode::Logging {
            let cell_size = self.config.cell_size;
            if let Some(batch) = edit::log_point(position, cell_size, &mut self.nodes, &mut self.history) {
                for coord in batch {
                    self.place_marker(coord, host);
                }
            }
        }
    }

    fn toggle_pause(&mut self, host: &mut dyn SessionHost) {
        match self.mode {
            Mode::Logging => {
                self.mode = Mode::Paused;
                host.notify(PAUSED_MSG);
            }
            Mode::Paused => {
                self.mode = Mode::Logging;
                host.notify(UNPAUSED_MSG);
            }
            Mode::Idle => {}
        }
    }

    fn toggle_logging(&mut self, host: &mut dyn SessionHost) {
        match self.mode {
            Mode::Idle | Mode::Paused => {
                self.mode = Mode::Logging;
                host.notify(STARTED_MSG);
            }
            Mode::Logging => {
                self.mode = Mode::Idle;
                host.notify(STOPPED_MSG);
                self.save();
            }
        }
    }

    fn set_corner(&mut self, position: Vec3, host: &mut dyn SessionHost) {
        let cell_size = self.config.cell_size;
        let coord = NodeCoord::from_world_pos(position, cell_size);

        match self.corners.push(coord) {
            None => {
                let id = host.create_marker(coord.world_center(cell_size), cell_size, MarkerColor::Red);
                self.corner_marker = Some(id);
                host.notify(SET_CORNER_A_MSG);
            }
            Some((a, b)) => {
                host.notify(SET_CORNER_B_MSG);
                let batch = edit::fill_region(a, b, &mut self.nodes, &mut self.history);
                for coord in batch {
                    self.place_marker(coord, host);
                }
                // The pair is consumed; retire the armed-corner marker
                if let Some(id) = self.corner_marker.take() {
                    host.destroy_marker(id);
                }
                host.notify(SURFACE_LOGGED_MSG);
            }
        }
    }

    fn undo(&mut self, host: &mut dyn SessionHost) {
        // An armed corner is abandoned along with its marker
        if self.corners.clear().is_some() {
            if let Some(id) = self.corner_marker.take() {
                host.destroy_marker(id);
            }
        }

        match edit::undo_last(&mut self.history, &mut self.nodes) {
            UndoResult::Undone(batch) => {
                for coord in batch {
                    if let Some(id) = self.markers.take(coord) {
                        host.destroy_marker(id);
                    }
                }
                host.notify(NODES_REMOVED_MSG);
            }
            UndoResult::NoHistory => host.notify(NO_NODES_TO_REMOVE_MSG),
        }
    }

    fn remove_selected(&mut self, targets: &[NodeCoord], host: &mut dyn SessionHost) {
        let removed = edit::remove_nodes(targets, &mut self.nodes);
        for coord in removed {
            host.notify(&format!("Removing node in {coord}"));
            if let Some(id) = self.markers.take(coord) {
                host.destroy_marker(id);
            }
        }
    }

    fn begin_load(&mut self, host: &mut dyn SessionHost) {
        // Loading forces a paused session; it stays paused after the merge
        self.mode = Mode::Paused;
        host.notify(LOADING_MSG);

        let path = codec::node_map_path(&self.config.node_map_dir, &self.map_id);
        self.load = Some(LoadTask {
            loader: NodeMapLoader::new(path),
            loaded: 0,
        });
    }

    /// Merge pending load events into the live set
    fn poll_load(&mut self, host: &mut dyn SessionHost) {
        let Some(task) = self.load.as_mut() else {
            return;
        };

        let mut done = false;
        for event in task.loader.poll_events() {
            match event {
                LoadEvent::Parsed(coords) => {
                    for coord in coords {
                        if !self.nodes.insert(coord) {
                            continue;
                        }
                        task.loaded += 1;
                        let id = host.create_marker(
                            coord.world_center(self.config.cell_size),
                            self.config.cell_size,
                            MarkerColor::Green,
                        );
                        self.markers.insert(coord, id);
                        if self.config.progress_every > 0
                            && task.loaded % self.config.progress_every == 0
                        {
                            host.notify(&format!("Loaded {} nodes...", task.loaded));
                        }
                    }
                }
                LoadEvent::Finished { .. } => {
                    host.notify(&format!("{} {}", FINISHED_LOADING_MSG, task.loaded));
                    done = true;
                }
                LoadEvent::NotFound(path) => {
                    host.notify(&format!("File not found: {}", path.display()));
                    done = true;
                }
                LoadEvent::Error(e) => {
                    log::error!("node map load failed: {e}");
                    done = true;
                }
            }
        }

        if done {
            self.load = None;
        }
    }

    /// Save the node map, swallowing I/O failures at this boundary
    fn save(&self) {
        let path = codec::node_map_path(&self.config.node_map_dir, &self.map_id);
        match codec::save_node_map(&path, &self.nodes) {
            Ok(()) => log::info!("saved {} nodes to {}", self.nodes.len(), path.display()),
            Err(e) => log::error!("failed to save node map {}: {}", path.display(), e),
        }
    }

    fn place_marker(&mut self, coord: NodeCoord, host: &mut dyn SessionHost) {
        let id = host.create_marker(
            coord.world_center(self.config.cell_size),
            self.config.cell_size,
            MarkerColor::Green,
        );
        self.markers.insert(coord, id);
    }
}
