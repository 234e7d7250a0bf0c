//! Token system for highlighting
//!
//! The first two stages of the highlighting pipeline:
//!
//! - **[`Tokenizer`]** - splits a text slice into raw tokens with UTF-8 byte
//!   lengths. Knows nothing about any language.
//! - **[`TokenCursor`]** - pull-based queue over the tokenizer with consume,
//!   bounded lookahead and whitespace-skipping peeks.
//!
//! The classifier in [`crate::highlight`] drives the cursor and decides styles.

pub mod cursor;
pub mod token;
pub mod tokenizer;

pub use cursor::TokenCursor;
pub use token::{Token, BRACKETS, OPERATORS};
pub use tokenizer::{tokenize, Tokenizer};
