//! Syntax highlighting: style identifiers, word registries and the classifier
//!
//! ## Pipeline
//!
//! editor text → [`Tokenizer`](crate::tokens::Tokenizer) →
//! [`TokenCursor`](crate::tokens::TokenCursor) → [`Classifier`] → [`StyleSpan`]s
//! → [`StyleSink`]
//!
//! Classification is synchronous and performs no I/O. A [`Classifier`] is
//! immutable while highlighting, so one instance can serve several panes.

pub mod classifier;
pub mod registry;
pub mod style;

pub use classifier::{
    Classifier, DeclarationStyles, Highlight, HighlightError, SpanRecorder, StyleSink,
};
pub use registry::{LanguageProfile, WordSet};
pub use style::{ClassifierState, StyleId, StyleSpan};
