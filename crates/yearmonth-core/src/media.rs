use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Full path under the source root
    pub path: PathBuf,
    /// Just the filename, kept as-is in the destination
    pub filename: OsString,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Option<Self> {
        let filename = path.file_name()?.to_os_string();
        Some(Self { path, filename })
    }
}
