//! Core value and error types for Bystander story scripts.
//!
//! This crate provides:
//! - [`Value`] - The value carried by a tag property
//! - [`Error`] - Rich error types with diagnostic context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use value::Value;
