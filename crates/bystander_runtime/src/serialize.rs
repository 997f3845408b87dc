//! Output encoding for processed documents.
//!
//! Documents are written as plain text, pretty-printed JSON, or `MessagePack`,
//! either to a file or to standard output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use bystander_foundation::{Error, ErrorKind, Result};
use serde::Serialize;

use crate::document::Document;

/// Output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// `MessagePack` with named fields.
    MessagePack,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "msgpack" | "messagepack" => Ok(Self::MessagePack),
            other => Err(Error::new(ErrorKind::Serialization(format!(
                "unknown output format: {other}"
            )))),
        }
    }
}

/// Serializes a value to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Serializes a value to `MessagePack` bytes.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_msgpack<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(value).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Encodes documents in the given format.
///
/// A single document is encoded on its own; several are encoded as a list.
/// Text output separates documents with a blank line.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(documents: &[Document], format: OutputFormat) -> Result<Vec<u8>> {
    match (format, documents) {
        (OutputFormat::Text, _) => {
            let text = documents
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            Ok(text.into_bytes())
        }
        (OutputFormat::Json, [document]) => Ok(with_newline(to_json(document)?)),
        (OutputFormat::Json, _) => Ok(with_newline(to_json(documents)?)),
        (OutputFormat::MessagePack, [document]) => to_msgpack(document),
        (OutputFormat::MessagePack, _) => to_msgpack(documents),
    }
}

fn with_newline(mut text: String) -> Vec<u8> {
    text.push('\n');
    text.into_bytes()
}

/// Writes encoded output to a file, or to standard output if no path is given.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_output(bytes: &[u8], path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        return stdout
            .write_all(bytes)
            .and_then(|()| stdout.flush())
            .map_err(|e| Error::new(ErrorKind::Io(format!("failed to write to stdout: {e}"))));
    };

    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to create file '{}': {e}",
            path.display()
        )))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to write to file '{}': {e}",
            path.display()
        )))
    })?;

    writer.flush().map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to flush file '{}': {e}",
            path.display()
        )))
    })?;

    Ok(())
}
