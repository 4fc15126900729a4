//! Background node map loading with periodic yielding
//!
//! A single reader task parses the node map file line by line and posts
//! batches of coordinates through a channel, yielding between batches so
//! a large file never monopolizes the runtime. The owner drains events
//! with a non-blocking poll from its tick and performs the actual merge
//! into the live set, keeping all set mutation on one thread.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::grid::NodeCoord;
use super::codec::parse_line;

/// Parsed lines sent per event before the reader yields
const READ_BATCH: usize = 64;

/// Event emitted by the background load task
#[derive(Debug)]
pub enum LoadEvent {
    /// A batch of parsed coordinates, in file order
    Parsed(Vec<NodeCoord>),
    /// The file was fully read; `lines` is the total line count seen
    Finished { lines: usize },
    /// The node map file does not exist
    NotFound(PathBuf),
    /// Error while opening or reading the file
    Error(String),
}

/// Background reader for one node map file
pub struct NodeMapLoader {
    /// Channel for receiving load events
    event_rx: mpsc::UnboundedReceiver<LoadEvent>,
    /// Tokio runtime handle (None when using the caller's runtime)
    #[allow(dead_code)]
    runtime: Option<Runtime>,
}

impl NodeMapLoader {
    /// Start loading `path` on a dedicated runtime
    ///
    /// Use this from hosts that don't run tokio themselves.
    pub fn new(path: PathBuf) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let runtime = Runtime::new().expect("Failed to create tokio runtime");
        runtime.spawn(async move {
            Self::read_task(path, event_tx).await;
        });

        Self {
            event_rx,
            runtime: Some(runtime),
        }
    }

    /// Start loading `path` on the current tokio runtime
    ///
    /// Panics if called outside a tokio runtime context.
    pub fn new_with_current_runtime(path: PathBuf) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            Self::read_task(path, event_tx).await;
        });

        Self {
            event_rx,
            runtime: None,
        }
    }

    /// Reader task: parse lines, post batches, yield between them
    async fn read_task(path: PathBuf, event_tx: mpsc::UnboundedSender<LoadEvent>) {
        if !path.exists() {
            let _ = event_tx.send(LoadEvent::NotFound(path));
            return;
        }

        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                let _ = event_tx.send(LoadEvent::Error(e.to_string()));
                return;
            }
        };

        let mut lines = BufReader::new(file).lines();
        let mut parsed = Vec::with_capacity(READ_BATCH);
        let mut seen = 0usize;

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    seen += 1;
                    if let Some(coord) = parse_line(&line) {
                        parsed.push(coord);
                    }
                    if parsed.len() >= READ_BATCH {
                        let _ = event_tx.send(LoadEvent::Parsed(std::mem::take(&mut parsed)));
                        tokio::task::yield_now().await;
                        parsed.reserve(READ_BATCH);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    let _ = event_tx.send(LoadEvent::Error(e.to_string()));
                    return;
                }
            }
        }

        if !parsed.is_empty() {
            let _ = event_tx.send(LoadEvent::Parsed(parsed));
        }
        let _ = event_tx.send(LoadEvent::Finished { lines: seen });
    }

    /// Poll for pending load events (non-blocking)
    ///
    /// Returns all currently available events, in order.
    pub fn poll_events(&mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }
}
