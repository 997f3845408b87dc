//! Bystander - Story script tokenizer and parser
//!
//! This crate re-exports all layers of the Bystander system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: bystander_runtime    - REPL, CLI, output formats
//! Layer 2: bystander_story      - Speaker resolution, passages, chapters
//! Layer 1: bystander_script     - Line joiner, tokenizer, parser, batch processing
//! Layer 0: bystander_foundation - Core types (Value, Error)
//! ```

pub use bystander_foundation as foundation;
pub use bystander_runtime as runtime;
pub use bystander_script as script;
pub use bystander_story as story;
