//! Input file discovery.
//!
//! A command-line path ending in `.xaml` is taken as a file; anything else is
//! walked recursively for `.xaml` files.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file to format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Path to read.
    pub path: PathBuf,
    /// Path relative to the command-line argument it was found under; used to
    /// mirror the layout into an output directory.
    pub relative: PathBuf,
}

/// Returns true if the path has a `.xaml` extension, ignoring case.
pub fn is_xaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xaml"))
}

/// Expands one command-line argument into the files it names.
pub fn collect_targets(item: &Path) -> Vec<Target> {
    if item.as_os_str().is_empty() {
        return Vec::new();
    }

    if is_xaml(item) {
        let relative = item
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| item.to_path_buf());
        return vec![Target {
            path: item.to_path_buf(),
            relative,
        }];
    }

    if !item.is_dir() {
        warn!(path = %item.display(), "not a .xaml file or a directory, skipping");
        return Vec::new();
    }

    let mut targets = Vec::new();
    for entry in WalkDir::new(item).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_xaml(path) {
            if let Ok(relative) = path.strip_prefix(item) {
                debug!(path = %path.display(), "discovered .xaml file");
                targets.push(Target {
                    path: path.to_path_buf(),
                    relative: relative.to_path_buf(),
                });
            }
        }
    }

    // Sort for deterministic ordering
    targets.sort_by(|a, b| a.path.cmp(&b.path));
    targets
}
