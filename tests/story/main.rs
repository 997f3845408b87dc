//! Integration tests for Layer 2: Story
//!
//! Tests for speaker resolution, passages, and chapter loading.

mod chapter;
mod dialogue;
