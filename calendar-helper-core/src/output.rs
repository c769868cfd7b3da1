//! JSON written to stdout.
//!
//! The encoding matches what existing consumers of fetch-events parse:
//! `", "` between items, `": "` between key and value, everything on one line,
//! and non-ASCII characters escaped as `\uXXXX` unless disabled.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::HelperResult;

/// Body printed when the requested calendar does not exist.
#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub error: String,
}

impl NotFoundBody {
    pub fn new(calendar_name: &str) -> Self {
        NotFoundBody {
            error: format!("Calendar '{}' not found", calendar_name),
        }
    }
}

/// Single-line formatter with spaced separators.
#[derive(Debug, Clone, Copy)]
pub struct SpacedFormatter {
    ensure_ascii: bool,
}

impl SpacedFormatter {
    pub fn new(ensure_ascii: bool) -> Self {
        SpacedFormatter { ensure_ascii }
    }
}

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if !self.ensure_ascii || fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize `value` with [`SpacedFormatter`] and terminate the line.
pub fn write_json<W, T>(mut writer: W, value: &T, ensure_ascii: bool) -> HelperResult<()>
where
    W: Write,
    T: ?Sized + Serialize,
{
    {
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, SpacedFormatter::new(ensure_ascii));
        value.serialize(&mut serializer)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
