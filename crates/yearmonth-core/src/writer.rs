use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::{OrganizeError, Result};

/// Create `dir` and any missing ancestors. Existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OrganizeError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// `src` and `dest` are the same file; nothing was written
    AlreadyInPlace,
}

/// True when `dest` exists and is `src` itself (same path, symlink or hard link).
fn is_same_file(src: &Path, dest: &Path) -> bool {
    dest.exists() && same_file::is_same_file(src, dest).unwrap_or(false)
}

/// Copy `src` to `dest`, overwriting, and carry over permissions plus
/// access/modification times. Never writes when both name the same file,
/// since opening `dest` for writing would truncate the source.
pub fn copy_with_metadata(src: &Path, dest: &Path) -> Result<CopyOutcome> {
    let copy_err = |source: std::io::Error| OrganizeError::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    if is_same_file(src, dest) {
        return Ok(CopyOutcome::AlreadyInPlace);
    }

    let meta = fs::metadata(src).map_err(copy_err)?;
    fs::copy(src, dest).map_err(copy_err)?;

    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dest, atime, mtime).map_err(copy_err)?;

    Ok(CopyOutcome::Copied)
}

/// Ensure `dest_dir` exists and copy `src` into it under `filename`.
pub fn copy_into(
    src: &Path,
    dest_dir: &Path,
    filename: &std::ffi::OsStr,
) -> Result<(PathBuf, CopyOutcome)> {
    ensure_dir(dest_dir)?;
    let dest = dest_dir.join(filename);
    let outcome = copy_with_metadata(src, &dest)?;
    Ok((dest, outcome))
}
