pub mod date;
pub mod error;
pub mod media;
pub mod scan;
pub mod writer;

#[cfg(test)]
mod testutil;

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

pub use date::{extract_capture_date, CaptureDate};
pub use error::{OrganizeError, Result};
pub use scan::Estimate;
pub use writer::CopyOutcome;

/// Files between two progress reports unless configured otherwise.
pub const DEFAULT_REPORT_EVERY: u64 = 100;

fn default_report_every() -> Option<u64> {
    Some(DEFAULT_REPORT_EVERY)
}

fn default_estimate() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeOptions {
    /// Root directory of all source images
    pub source: PathBuf,
    /// Directory under which images are copied into YYYY/MM
    pub target: PathBuf,
    /// Report progress every N visited files; `None` disables periodic reports
    #[serde(default = "default_report_every")]
    pub report_every: Option<u64>,
    /// Pre-count the source tree so progress reports carry a total
    #[serde(default = "default_estimate")]
    pub estimate: bool,
}

impl OrganizeOptions {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            report_every: default_report_every(),
            estimate: default_estimate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Result of the pre-count, before any file is processed
    Estimated(Estimate),
    /// Periodic report
    Processed {
        visited: u64,
        total: Option<u64>,
        copied: u64,
    },
    /// A file without a usable capture date
    Skipped(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeResult {
    pub files_visited: u64,
    pub images_copied: u64,
    /// Files with no usable capture date; each path went out as `Progress::Skipped`
    pub files_skipped: u64,
    /// Dated files that already were their own destination
    #[serde(default)]
    pub already_in_place: u64,
    /// Pre-counted total, if the estimate ran
    pub total_files: Option<u64>,
}

/// Type alias for progress callback
pub type ProgressCallback<'a> = dyn Fn(&Progress) + 'a;

/// Forwards progress to a callback, emitting `Processed` once every N files.
pub struct ProgressReporter<'a> {
    inner: &'a ProgressCallback<'a>,
    report_every: Option<u64>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(inner: &'a ProgressCallback<'a>, report_every: Option<u64>) -> Self {
        Self {
            inner,
            report_every: report_every.filter(|n| *n > 0),
        }
    }

    pub fn estimated(&self, estimate: Estimate) {
        (self.inner)(&Progress::Estimated(estimate));
    }

    /// Called before the `visited`-th file is counted, so the first report shows 0.
    pub fn tick(&self, visited: u64, total: Option<u64>, copied: u64) {
        let Some(every) = self.report_every else {
            return;
        };
        if visited % every == 0 {
            (self.inner)(&Progress::Processed {
                visited,
                total,
                copied,
            });
        }
    }

    pub fn skipped(&self, path: &Path) {
        (self.inner)(&Progress::Skipped(path.to_path_buf()));
    }
}

/// Copy every image under `options.source` with a readable capture date into
/// `options.target/YYYY/MM/`. Files without one are skipped and reported.
///
/// Fails before reporting anything if the source root is unusable; directory
/// creation or copy failures abort the run.
pub fn organize(
    options: &OrganizeOptions,
    progress_callback: &ProgressCallback<'_>,
) -> Result<OrganizeResult> {
    let reporter = ProgressReporter::new(progress_callback, options.report_every);
    let source = options.source.as_path();
    let target = options.target.as_path();

    let meta = fs::metadata(source).map_err(|e| OrganizeError::SourceRoot {
        path: source.to_path_buf(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(OrganizeError::NotADirectory {
            path: source.to_path_buf(),
        });
    }
    fs::read_dir(source).map_err(|e| OrganizeError::SourceRoot {
        path: source.to_path_buf(),
        source: e,
    })?;

    writer::ensure_dir(target)?;
    let prune = scan::nested_target(source, target);
    if let Some(p) = &prune {
        debug!("target {} is inside the source tree, not walking it", p.display());
    }

    let total_files = if options.estimate {
        let estimate = scan::estimate(source, prune.as_deref());
        reporter.estimated(estimate);
        Some(estimate.total_files)
    } else {
        None
    };

    let mut result = OrganizeResult {
        total_files,
        ..Default::default()
    };

    for file in scan::walk_files(source, prune.as_deref()) {
        let file = file?;
        reporter.tick(result.files_visited, total_files, result.images_copied);
        result.files_visited += 1;

        match date::extract_capture_date(&file.path) {
            Some(date) => {
                match writer::copy_into(&file.path, &date.dest_dir(target), &file.filename)? {
                    (dest, CopyOutcome::Copied) => {
                        debug!("copied {} to {}", file.path.display(), dest.display());
                        result.images_copied += 1;
                    }
                    (_, CopyOutcome::AlreadyInPlace) => {
                        info!("{} is already in place", file.path.display());
                        result.already_in_place += 1;
                    }
                }
            }
            None => {
                info!("{} was not copied", file.path.display());
                reporter.skipped(&file.path);
                result.files_skipped += 1;
            }
        }
    }

    Ok(result)
}
