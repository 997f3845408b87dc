//! Line joiner, tokenizer, and parser for Bystander story scripts.
//!
//! Story scripts interleave bracketed tags with narrative prose:
//!
//! ```text
//! [name="Amiya", delay=0.1]Doctor, are you awake?
//! ```
//!
//! # Architecture
//!
//! ```text
//! raw script text
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ LINE JOINER     │  → logical lines (`\` continues a line)
//! └─────────────────┘
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ TOKENIZER       │  → '[' identifier '=' string ',' ... ']' actor_text
//! └─────────────────┘
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ PARSER          │  → ScriptLine { actions, actor_text }
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`lines`] - Logical line segmentation
//! - [`token`] - Token kinds and tokens
//! - [`lexer`] - Character-level tokenizer
//! - [`ast`] - Actions and parsed lines
//! - [`parser`] - Backtracking recursive-descent parser
//! - [`batch`] - Whole-script processing with per-line error policy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod batch;
pub mod lexer;
pub mod lines;
pub mod parser;
pub mod token;

pub use ast::{Action, Call, Property, ScriptLine};
pub use batch::{BatchConfig, ErrorPolicy, LineFailure, ParsedEntry, ScriptReport, parse_script};
pub use lexer::{Tokenizer, tokenize};
pub use lines::{numbered_lines, split_lines};
pub use parser::{Parser, parse, parse_line};
pub use token::{Token, TokenKind};
