//! Dialogue extraction from parsed Bystander story scripts.
//!
//! This crate provides:
//! - [`ActorLine`] - One speaker/text pair
//! - [`Passage`] - The dialogue of one script file, with its title
//! - [`Chapter`] - A directory of passages
//! - [`convert_story_text`] - Speaker resolution over parsed lines

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chapter;
pub mod dialogue;

pub use chapter::{Chapter, load_chapter};
pub use dialogue::{ActorLine, Passage, convert_passage, convert_story_text};
