pub mod exif;

use regex::Regex;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `YYYY:MM:DD HH:MM:SS`, matched from the start of the value.
static DATETIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>\d{4}):(?P<month>\d{2}):\d{2} \d{2}:\d{2}:\d{2}").unwrap()
});

/// Year and month an image was captured, as they appear in its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureDate {
    /// Four digits
    pub year: String,
    /// Two digits, zero padded
    pub month: String,
}

impl CaptureDate {
    /// `target/year/month`
    pub fn dest_dir(&self, target: &Path) -> PathBuf {
        target.join(&self.year).join(&self.month)
    }
}

/// Match a raw EXIF datetime value against the fixed `YYYY:MM:DD HH:MM:SS` shape.
pub fn parse_capture_date(value: &str) -> Option<CaptureDate> {
    let caps = DATETIME_RE.captures(value)?;
    Some(CaptureDate {
        year: caps["year"].to_string(),
        month: caps["month"].to_string(),
    })
}

/// Read the capture date embedded in the file at `path`.
/// Any failure (unreadable file, no metadata, malformed value) yields `None`.
pub fn extract_capture_date(path: &Path) -> Option<CaptureDate> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    exif::capture_date_from_reader(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::jpeg_with_datetime;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_capture_date() {
        let date = parse_capture_date("2019:07:04 10:00:00").unwrap();
        assert_eq!(date.year, "2019");
        assert_eq!(date.month, "07");

        // trailing data after the seconds is tolerated
        assert!(parse_capture_date("2019:07:04 10:00:00.123").is_some());

        assert!(parse_capture_date("2020/01/01 00:00:00").is_none());
        assert!(parse_capture_date("2020-01-01 00:00:00").is_none());
        assert!(parse_capture_date("2020:01:01").is_none());
        assert!(parse_capture_date(" 2020:01:01 00:00:00").is_none());
        assert!(parse_capture_date("").is_none());
    }

    #[test]
    fn test_dest_dir() {
        let date = parse_capture_date("2021:05:30 08:15:00").unwrap();
        assert_eq!(
            date.dest_dir(Path::new("/out")),
            PathBuf::from("/out").join("2021").join("05")
        );
    }

    #[test]
    fn test_extract_from_file() {
        let dir = tempdir().unwrap();

        let jpg = dir.path().join("a.jpg");
        fs::write(&jpg, jpeg_with_datetime("2019:07:04 10:00:00")).unwrap();
        let date = extract_capture_date(&jpg).unwrap();
        assert_eq!((date.year.as_str(), date.month.as_str()), ("2019", "07"));

        let bad = dir.path().join("bad.jpg");
        fs::write(&bad, jpeg_with_datetime("2020/01/01 00:00:00")).unwrap();
        assert!(extract_capture_date(&bad).is_none());
    }

    #[test]
    fn test_extract_never_fails_loudly() {
        let dir = tempdir().unwrap();

        let empty = dir.path().join("empty.jpg");
        fs::write(&empty, b"").unwrap();
        assert!(extract_capture_date(&empty).is_none());

        let text = dir.path().join("b.txt");
        fs::write(&text, b"just some notes").unwrap();
        assert!(extract_capture_date(&text).is_none());

        // JPEG magic followed by garbage
        let corrupt = dir.path().join("corrupt.jpg");
        fs::write(&corrupt, [0xFF, 0xD8, 0xFF, 0xE1, 0x00]).unwrap();
        assert!(extract_capture_date(&corrupt).is_none());

        assert!(extract_capture_date(&dir.path().join("missing.jpg")).is_none());
        assert!(extract_capture_date(dir.path()).is_none());
    }
}
