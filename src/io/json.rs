//! JSON documents on disk and pretty-printed output.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Error;

/// Reads a JSON document from `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened and [`Error::Json`]
/// if its content is not valid JSON.
pub fn read_json(path: &Path) -> Result<Value, Error> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-prints `value` with `indent` spaces per level, followed by a
/// newline.
///
/// # Errors
///
/// Returns [`Error::Write`] if writing fails.
pub fn write_json<W: Write>(mut writer: W, value: &Value, indent: usize) -> Result<(), Error> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut ser).map_err(|e| Error::Write(e.into()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
