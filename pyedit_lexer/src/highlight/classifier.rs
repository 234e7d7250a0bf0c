//! Style classifier state machine
//!
//! Drives a [`TokenCursor`] over one slice of text and emits styled spans whose
//! byte lengths always sum to the slice length. The classifier instance holds
//! only long-lived configuration; the cursor and the string flag live inside
//! a single call.

use super::registry::LanguageProfile;
use super::style::{ClassifierState, StyleId, StyleSpan};
use crate::config::runtime::HighlightPreferences;
use crate::logging::codes;
use crate::logging::Code;
use crate::theme::{StyleAttributes, StyleTable};
use crate::tokens::{Token, TokenCursor};
use crate::utils::TextRange;
use crate::{log_debug, log_error};

/// Invalid restyle requests
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    #[error("Range {start}..{end} is outside the document ({len} bytes)")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

impl HighlightError {
    pub fn error_code(&self) -> Code {
        match self {
            HighlightError::RangeOutOfBounds { .. } => codes::highlight::RANGE_OUT_OF_BOUNDS,
            HighlightError::NotCharBoundary { .. } => codes::highlight::RANGE_NOT_CHAR_BOUNDARY,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Receiver of styling commands, normally the editor widget.
///
/// A restyle call issues one `begin_styling` followed by `set_styling` for
/// each span in text order.
pub trait StyleSink {
    fn begin_styling(&mut self, start: usize);
    fn set_styling(&mut self, byte_len: usize, style: StyleId);
}

/// Sink that records the commands it receives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanRecorder {
    pub start: Option<usize>,
    pub spans: Vec<StyleSpan>,
}

impl SpanRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded spans as absolute document ranges
    pub fn styled_ranges(&self) -> Vec<(TextRange, StyleId)> {
        let mut offset = self.start.unwrap_or(0);
        self.spans
            .iter()
            .map(|span| {
                let range = TextRange::new(offset, offset + span.byte_len);
                offset = range.end;
                (range, span.style)
            })
            .collect()
    }

    pub fn total_len(&self) -> usize {
        self.spans.iter().map(|span| span.byte_len).sum()
    }
}

impl StyleSink for SpanRecorder {
    fn begin_styling(&mut self, start: usize) {
        self.start = Some(start);
    }

    fn set_styling(&mut self, byte_len: usize, style: StyleId) {
        self.spans.push(StyleSpan::new(byte_len, style));
    }
}

/// Styles used for the `class`/`def` declaration rules.
///
/// The default reproduces the established behaviour, where `def` followed by
/// a name is painted like a class name while `class` is always a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationStyles {
    /// `class` keyword, whether or not a declaration follows
    pub class_keyword: StyleId,
    /// `def` keyword when a function name follows
    pub def_keyword: StyleId,
    /// `def` keyword with no valid name after it
    pub def_keyword_fallback: StyleId,
}

impl DeclarationStyles {
    /// `def` and `class` both painted as keywords
    pub const fn consistent() -> Self {
        Self {
            class_keyword: StyleId::Keyword,
            def_keyword: StyleId::Keyword,
            def_keyword_fallback: StyleId::Keyword,
        }
    }
}

impl Default for DeclarationStyles {
    fn default() -> Self {
        Self {
            class_keyword: StyleId::Keyword,
            def_keyword: StyleId::Classes,
            def_keyword_fallback: StyleId::Keyword,
        }
    }
}

/// Result of classifying one slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub spans: Vec<StyleSpan>,
    /// State after the last token; `InString` means the slice ended inside an
    /// unterminated string
    pub ending_state: ClassifierState,
    pub token_count: usize,
}

impl Highlight {
    pub fn total_len(&self) -> usize {
        self.spans.iter().map(|span| span.byte_len).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    profile: LanguageProfile,
    styles: StyleTable,
    declarations: DeclarationStyles,
    log_metrics: bool,
}

impl Classifier {
    pub fn new(profile: LanguageProfile, styles: StyleTable) -> Self {
        Self {
            profile,
            styles,
            declarations: DeclarationStyles::default(),
            log_metrics: false,
        }
    }

    /// Python keywords and builtins with the built-in dark palette
    pub fn python() -> Self {
        Self::new(LanguageProfile::python(), StyleTable::one_dark())
    }

    pub fn from_preferences(
        profile: LanguageProfile,
        styles: StyleTable,
        preferences: &HighlightPreferences,
    ) -> Self {
        let declarations = if preferences.consistent_def_style {
            DeclarationStyles::consistent()
        } else {
            DeclarationStyles::default()
        };

        Self::new(profile, styles)
            .with_declaration_styles(declarations)
            .with_metrics(preferences.log_metrics)
    }

    pub fn with_declaration_styles(mut self, declarations: DeclarationStyles) -> Self {
        self.declarations = declarations;
        self
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.log_metrics = enabled;
        self
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn set_styles(&mut self, styles: StyleTable) {
        self.styles = styles;
    }

    pub fn declaration_styles(&self) -> DeclarationStyles {
        self.declarations
    }

    /// Paint attributes for a style
    pub fn resolve(&self, style: StyleId) -> &StyleAttributes {
        self.styles.resolve(style)
    }

    /// Classify `text` starting from [`ClassifierState::Normal`]
    pub fn highlight(&self, text: &str) -> Vec<StyleSpan> {
        self.highlight_from(text, ClassifierState::Normal).spans
    }

    /// Classify `text` starting from an explicit entering state
    pub fn highlight_from(&self, text: &str, entering: ClassifierState) -> Highlight {
        let mut pass = Pass {
            classifier: self,
            cursor: TokenCursor::new(text),
            state: entering,
            spans: Vec::new(),
        };
        pass.run();

        let highlight = Highlight {
            token_count: pass.cursor.consumed_tokens(),
            ending_state: pass.state,
            spans: pass.spans,
        };
        debug_assert_eq!(highlight.total_len(), text.len());
        highlight
    }

    /// Restyle `document[start..end)` into `sink`, starting from `Normal`.
    ///
    /// Returns the state at `end`.
    pub fn style_range<S: StyleSink + ?Sized>(
        &self,
        document: &str,
        start: usize,
        end: usize,
        sink: &mut S,
    ) -> Result<ClassifierState, HighlightError> {
        self.style_range_from(document, start, end, ClassifierState::Normal, sink)
    }

    /// Restyle `document[start..end)` into `sink` from an explicit entering state
    pub fn style_range_from<S: StyleSink + ?Sized>(
        &self,
        document: &str,
        start: usize,
        end: usize,
        entering: ClassifierState,
        sink: &mut S,
    ) -> Result<ClassifierState, HighlightError> {
        let slice = match check_range(document, start, end) {
            Ok(slice) => slice,
            Err(e) => {
                log_error!(e.error_code(), &e.to_string(),
                    range = TextRange { start, end },
                    "document_len" => document.len()
                );
                return Err(e);
            }
        };

        let highlight = self.highlight_from(slice, entering);

        sink.begin_styling(start);
        for span in &highlight.spans {
            sink.set_styling(span.byte_len, span.style);
        }

        if self.log_metrics {
            log_debug!("Restyled range",
                "start" => start,
                "end" => end,
                "tokens" => highlight.token_count,
                "spans" => highlight.spans.len(),
                "ending_state" => format!("{:?}", highlight.ending_state)
            );
        }

        Ok(highlight.ending_state)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::python()
    }
}

/// Slice `document[start..end)`, rejecting bad bounds and split characters
pub(crate) fn check_range(document: &str, start: usize, end: usize) -> Result<&str, HighlightError> {
    if start > end || end > document.len() {
        return Err(HighlightError::RangeOutOfBounds {
            start,
            end,
            len: document.len(),
        });
    }

    for offset in [start, end] {
        if !document.is_char_boundary(offset) {
            return Err(HighlightError::NotCharBoundary { offset });
        }
    }

    Ok(&document[start..end])
}

/// Per-call working state
struct Pass<'c, 'a> {
    classifier: &'c Classifier,
    cursor: TokenCursor<'a>,
    state: ClassifierState,
    spans: Vec<StyleSpan>,
}

impl<'c, 'a> Pass<'c, 'a> {
    fn emit(&mut self, byte_len: usize, style: StyleId) {
        self.spans.push(StyleSpan::new(byte_len, style));
    }

    fn run(&mut self) {
        while let Some(token) = self.cursor.next() {
            if self.state.is_in_string() {
                self.emit(token.byte_len(), StyleId::String);
                // Any quote closes the string, whichever one opened it
                if token.is_quote() {
                    self.state = ClassifierState::Normal;
                }
                continue;
            }

            self.classify(token);
        }
    }

    fn classify(&mut self, token: Token<'a>) {
        let profile = &self.classifier.profile;

        if token.is("class") {
            self.class_declaration(token);
        } else if token.is("def") {
            self.function_declaration(token);
        } else if profile.is_keyword(token.lexeme) {
            self.emit(token.byte_len(), StyleId::Keyword);
        } else if token.is_member_dot() && self.cursor.peek(0).is_identifier() {
            self.member_access(token);
        } else if token.is_numeric() || profile.is_self_word(token.lexeme) {
            self.emit(token.byte_len(), StyleId::Constants);
        } else if token.is_bracket() {
            self.emit(token.byte_len(), StyleId::Brackets);
        } else if token.is_quote() {
            self.emit(token.byte_len(), StyleId::String);
            self.state = ClassifierState::InString;
        } else if profile.is_builtin(token.lexeme) || token.is_operator() {
            self.emit(token.byte_len(), StyleId::Types);
        } else {
            self.emit(token.byte_len(), StyleId::Default);
        }
    }

    /// `class Name:` / `class Name(`
    fn class_declaration(&mut self, keyword: Token<'a>) {
        let style = self.classifier.declarations.class_keyword;
        let (name, after_name) = self.cursor.skip_space_peek(0);
        let (delimiter, _) = self.cursor.skip_space_peek(after_name);

        self.emit(keyword.byte_len(), style);
        if name.is_identifier() && (delimiter.is(":") || delimiter.is("(")) {
            self.declared_name(after_name, StyleId::Classes);
        }
    }

    /// `def name`
    fn function_declaration(&mut self, keyword: Token<'a>) {
        let declarations = self.classifier.declarations;
        let (name, after_name) = self.cursor.skip_space_peek(0);

        if name.is_identifier() {
            self.emit(keyword.byte_len(), declarations.def_keyword);
            self.declared_name(after_name, StyleId::FunctionDef);
        } else {
            self.emit(keyword.byte_len(), declarations.def_keyword_fallback);
        }
    }

    /// Consume the whitespace and name tokens up to `after_name` as one span
    fn declared_name(&mut self, after_name: usize, style: StyleId) {
        let byte_len = self.cursor.peek_byte_len(after_name);
        self.cursor.next_skip(after_name);
        self.emit(byte_len, style);
    }

    /// `.member`, painted as a call when `(` follows directly
    fn member_access(&mut self, dot: Token<'a>) {
        self.emit(dot.byte_len(), StyleId::Default);

        if let Some(member) = self.cursor.next() {
            let style = if self.cursor.peek(0).is("(") {
                StyleId::Functions
            } else {
                StyleId::Default
            };
            self.emit(member.byte_len(), style);
        }
    }
}
