//! Session state machine driving the logging workflow

pub mod command;
pub mod config;
pub mod controller;
pub mod host;
pub mod markers;
pub mod state;

pub use command::Command;
pub use config::SessionConfig;
pub use controller::SessionController;
pub use host::SessionHost;
pub use markers::{MarkerColor, MarkerId};
pub use state::SessionState;
