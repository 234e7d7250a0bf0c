//! Shared primitive types used across the tokenizer, classifier and document layer.

pub mod range;

pub use range::{LineColumn, LineIndex, TextRange};
