// Internal modules
pub mod config;
pub mod document;
pub mod highlight;
#[macro_use]
pub mod logging;
pub mod theme;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use document::{Document, DocumentError, DocumentId, DocumentRegistry, FileEvent};
pub use highlight::{
    Classifier, ClassifierState, DeclarationStyles, HighlightError, LanguageProfile, SpanRecorder,
    StyleId, StyleSink, StyleSpan,
};
pub use theme::{load_theme_file, parse_theme, StyleTable, ThemeError, ThemeLoader};
pub use tokens::{Token, TokenCursor, Tokenizer};
pub use utils::TextRange;
