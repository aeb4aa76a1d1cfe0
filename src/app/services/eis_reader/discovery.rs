//! Discovery of EIS export files on disk
//!
//! Each test step leaves its first sweep as `<step>_EIS00001.csv`. Runs are
//! exported twice: the main export, and a copy with every cycle in a sibling
//! directory whose name ends with `All`.

use crate::constants::ALL_RUNS_DIR_SUFFIX;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Which export directories to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunSelection {
    /// Main exports only
    #[default]
    Main,
    /// Exports under `*All` directories only
    All,
}

impl RunSelection {
    /// True if a file in `dir` belongs to this selection
    pub fn accepts_dir(self, dir: Option<&Path>) -> bool {
        let in_all_dir = dir
            .and_then(|d| d.file_name())
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(ALL_RUNS_DIR_SUFFIX));

        match self {
            RunSelection::Main => !in_all_dir,
            RunSelection::All => in_all_dir,
        }
    }
}

impl std::fmt::Display for RunSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunSelection::Main => write!(f, "main"),
            RunSelection::All => write!(f, "all"),
        }
    }
}

/// Find export files under `root` whose file name matches `file_pattern`
///
/// Results are sorted so loading order does not depend on the filesystem.
pub fn discover_eis_files(
    root: &Path,
    file_pattern: &str,
    selection: RunSelection,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::io(
            format!("Input directory does not exist: {}", root.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "Directory not found"),
        ));
    }

    let pattern = glob::Pattern::new(file_pattern).map_err(|e| {
        Error::configuration(format!("Invalid file pattern '{}': {}", file_pattern, e))
    })?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to walk {}", root.display()), e)
        })?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }
        let matches_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches(name));
        if matches_name && selection.accepts_dir(path.parent()) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    info!(
        "Discovered {} {} EIS files in {}",
        files.len(),
        selection,
        root.display()
    );
    for file in &files {
        debug!("  Found: {}", file.display());
    }

    Ok(files)
}
