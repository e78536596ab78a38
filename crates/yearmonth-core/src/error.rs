//! Errors that abort an organize run.
//!
//! Missing or malformed capture dates are not errors: the extractor
//! returns `None` and the file is skipped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizeError {
    /// Source root missing or unreadable
    #[error("cannot read source directory '{}': {source}", path.display())]
    SourceRoot { path: PathBuf, source: io::Error },

    #[error("source '{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Source root became unreadable once the walk started
    #[error("traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot create directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot copy '{}' to '{}': {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, OrganizeError>;
