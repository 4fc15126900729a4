//! Node map text format and synchronous save/load
//!
//! A node map is plain text, one logged cell per line, each line the
//! bracketed form `(x, y, z)`. No header, footer or count prefix.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::grid::{NodeCoord, NodeSet};

/// Parse one node map line into a cell coordinate
///
/// Accepts the `(x, y, z)` form with arbitrary whitespace around each
/// integer. Returns `None` for anything else; malformed lines never abort
/// a load.
pub fn parse_line(line: &str) -> Option<NodeCoord> {
    let inner = line
        .trim()
        .strip_prefix('(')?
        .strip_suffix(')')?;

    let mut parts = inner.split(',');
    let x = parts.next()?.trim().parse::<i32>().ok()?;
    let y = parts.next()?.trim().parse::<i32>().ok()?;
    let z = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(NodeCoord::new(x, y, z))
}

/// Get the node map file path for a map identifier
pub fn node_map_path(base_dir: &Path, map_id: &str) -> PathBuf {
    base_dir.join(format!("{map_id}.txt"))
}

/// Save the logged cell set, overwriting the target file
///
/// Writes one line per cell in set iteration order. Creates the parent
/// directory if it doesn't exist.
pub fn save_node_map(path: &Path, nodes: &NodeSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for coord in nodes.iter() {
        writeln!(writer, "{coord}")?;
    }
    writer.flush()?;

    Ok(())
}

/// Incrementally load a node map, merging into an existing set
///
/// Fails with [`Error::NotFound`] if the file does not exist. Each line is
/// parsed as a cell coordinate; malformed lines are skipped. Cells already
/// present are not re-inserted and do not count. `on_progress` is invoked
/// with the running count after every `progress_every`-th new insertion.
///
/// Returns the total number of newly inserted cells.
pub fn load_node_map(
    path: &Path,
    nodes: &mut NodeSet,
    progress_every: usize,
    mut on_progress: impl FnMut(usize),
) -> Result<usize> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut loaded = 0usize;
    for line in reader.lines() {
        let line = line?;
        let Some(coord) = parse_line(&line) else {
            continue;
        };
        if nodes.insert(coord) {
            loaded += 1;
            if progress_every > 0 && loaded % progress_every == 0 {
                on_progress(loaded);
            }
        }
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_line_valid() {
        assert_eq!(parse_line("(1, 2, 3)"), Some(NodeCoord::new(1, 2, 3)));
        assert_eq!(parse_line("(-4,5,-6)"), Some(NodeCoord::new(-4, 5, -6)));
        assert_eq!(parse_line("  ( 7 , 8 , 9 )  "), Some(NodeCoord::new(7, 8, 9)));
    }

    #[test]
    fn test_parse_line_malformed() {
        assert_eq!(parse_line("garbage"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("(1, 2)"), None);
        assert_eq!(parse_line("(1, 2, 3, 4)"), None);
        assert_eq!(parse_line("(1, 2, z)"), None);
        assert_eq!(parse_line("1, 2, 3"), None);
    }

    #[test]
    fn test_node_map_path() {
        let path = node_map_path(Path::new("/data/nodemap"), "42");
        assert_eq!(path, PathBuf::from("/data/nodemap/42.txt"));
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("13.txt");

        let original: NodeSet = [
            NodeCoord::new(0, 0, 0),
            NodeCoord::new(-1, 2, -3),
            NodeCoord::new(100, -200, 300),
        ]
        .into_iter()
        .collect();

        save_node_map(&path, &original).expect("save failed");

        let mut loaded = NodeSet::new();
        let count = load_node_map(&path, &mut loaded, 10, |_| {}).expect("load failed");

        assert_eq!(count, 3);
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested/nodemap/7.txt");

        save_node_map(&path, &NodeSet::new()).expect("save failed");
        assert!(path.exists());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("map.txt");

        let big: NodeSet = (0..20).map(|i| NodeCoord::new(i, 0, 0)).collect();
        save_node_map(&path, &big).expect("save failed");

        let small: NodeSet = [NodeCoord::new(5, 5, 5)].into_iter().collect();
        save_node_map(&path, &small).expect("save failed");

        let mut loaded = NodeSet::new();
        let count = load_node_map(&path, &mut loaded, 10, |_| {}).expect("load failed");
        assert_eq!(count, 1);
        assert_eq!(loaded, small);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("nope.txt");

        let mut nodes = NodeSet::new();
        match load_node_map(&path, &mut nodes, 10, |_| {}) {
            Err(Error::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("map.txt");
        std::fs::write(&path, "(1,2,3)\ngarbage\n(4,5,6)\n").expect("write failed");

        let mut nodes = NodeSet::new();
        let count = load_node_map(&path, &mut nodes, 10, |_| {}).expect("load failed");

        assert_eq!(count, 2);
        assert_eq!(nodes.len(), 2);
        assert!(nodes.contains(NodeCoord::new(1, 2, 3)));
        assert!(nodes.contains(NodeCoord::new(4, 5, 6)));
    }

    #[test]
    fn test_load_merges_without_clobbering() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("map.txt");
        std::fs::write(&path, "(1,2,3)\n(4,5,6)\n").expect("write failed");

        let mut nodes = NodeSet::new();
        nodes.insert(NodeCoord::new(1, 2, 3));

        let count = load_node_map(&path, &mut nodes, 10, |_| {}).expect("load failed");

        // Only the genuinely new cell counts
        assert_eq!(count, 1);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_load_progress_cadence() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("map.txt");

        let mut contents = String::new();
        for i in 0..25 {
            contents.push_str(&format!("({i}, 0, 0)\n"));
        }
        std::fs::write(&path, contents).expect("write failed");

        let mut nodes = NodeSet::new();
        let mut reports = Vec::new();
        let count = load_node_map(&path, &mut nodes, 10, |n| reports.push(n)).expect("load failed");

        assert_eq!(count, 25);
        // Fires on every 10th new insertion, not per line
        assert_eq!(reports, vec![10, 20]);
    }
}
