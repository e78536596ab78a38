use exif::{In, Reader, Tag, Value};
use std::io::{BufRead, Seek};

use super::{parse_capture_date, CaptureDate};

/// Extract the capture date from an image container (JPEG, TIFF, HEIF, PNG, WebP).
/// Only the metadata segment is read, not the image data.
pub fn capture_date_from_reader<R: BufRead + Seek>(reader: &mut R) -> Option<CaptureDate> {
    let exif = Reader::new().read_from_container(reader).ok()?;
    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    let raw = raw_ascii(&field.value)?;
    parse_capture_date(raw)
}

/// The undecorated ASCII value. `display_value()` would rewrite
/// datetimes as `YYYY-MM-DD`, which must not be matched.
fn raw_ascii(value: &Value) -> Option<&str> {
    match value {
        Value::Ascii(parts) => std::str::from_utf8(parts.first()?).ok(),
        _ => None,
    }
}
