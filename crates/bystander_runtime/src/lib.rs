//! REPL, CLI, and output formats for Bystander.
//!
//! This crate provides:
//! - [`Repl`] - Interactive tokenize/parse loop
//! - [`Document`] - The result of processing one input for the CLI
//! - [`serialize`] - Text, JSON and `MessagePack` output

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod document;
pub mod editor;
pub mod highlight;
pub mod repl;
pub mod serialize;

pub use document::{Document, Mode, TokenLine, process_path, process_source};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::TagHighlighter;
pub use repl::Repl;
pub use serialize::{OutputFormat, encode, to_json, to_msgpack, write_output};
