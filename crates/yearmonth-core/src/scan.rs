use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::media::SourceFile;

/// Pre-count of the source tree, used only for progress totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    pub dirs_with_files: u64,
    pub total_files: u64,
}

/// If `target` lives strictly inside `source`, its path as seen from the walk so it can be pruned.
/// Equal roots are not pruned: the whole tree is still walked.
pub fn nested_target(source: &Path, target: &Path) -> Option<PathBuf> {
    let source_abs = source.canonicalize().ok()?;
    let target_abs = target.canonicalize().ok()?;
    let rel = target_abs.strip_prefix(&source_abs).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(source.join(rel))
}

/// Directories, and symlinks pointing at one, are not files.
fn is_dir_like(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn walker(root: &Path, prune: Option<&Path>) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    let prune = prune.map(Path::to_path_buf);
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| prune.as_deref().map_or(true, |p| e.path() != p))
}

/// Count directories holding at least one file, and the files themselves.
/// Unreadable entries are ignored here; the real walk reports them.
pub fn estimate(root: &Path, prune: Option<&Path>) -> Estimate {
    let mut dirs: HashSet<PathBuf> = HashSet::new();
    let mut total_files = 0u64;

    for entry in walker(root, prune).filter_map(|e| e.ok()) {
        if is_dir_like(&entry) {
            continue;
        }
        total_files += 1;
        if let Some(parent) = entry.path().parent() {
            dirs.insert(parent.to_path_buf());
        }
    }

    Estimate {
        dirs_with_files: dirs.len() as u64,
        total_files,
    }
}

/// Every non-directory entry under `root`, each exactly once, sorted by name
/// within a directory. Symlinks to directories are not followed.
///
/// Only a failure to read `root` itself is yielded as an error; unreadable
/// entries below it are logged and left out.
pub fn walk_files(root: &Path, prune: Option<&Path>) -> impl Iterator<Item = Result<SourceFile>> {
    walker(root, prune).filter_map(|entry| match entry {
        Ok(e) if is_dir_like(&e) => None,
        Ok(e) => SourceFile::new(e.into_path()).map(Ok),
        Err(err) if err.depth() > 0 => {
            let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
            warn!("cannot read {}, skipping: {}", path, err);
            None
        }
        Err(err) => Some(Err(err.into())),
    })
}
