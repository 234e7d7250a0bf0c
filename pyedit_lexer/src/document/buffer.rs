//! Open documents and their restyling state

use crate::config::compile_time::document::{BINARY_SNIFF_LENGTH, MAX_DOCUMENT_SIZE};
use crate::config::compile_time::highlight::MAX_CHECKPOINTS_PER_DOCUMENT;
use crate::config::constants::PYTHON_EXTENSIONS;
use crate::highlight::classifier::check_range;
use crate::highlight::{Classifier, ClassifierState, HighlightError, StyleId, StyleSink};
use crate::logging::codes;
use crate::logging::Code;
use crate::utils::TextRange;
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{} looks like a binary file", path.display())]
    Binary { path: PathBuf },

    #[error("File too large: {size} bytes (max: {MAX_DOCUMENT_SIZE})")]
    TooLarge { size: u64 },

    #[error("Invalid UTF-8 encoding in file: {}", path.display())]
    InvalidEncoding { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Too many open documents (max: {max})")]
    TooManyDocuments { max: usize },

    #[error(transparent)]
    Range(#[from] HighlightError),
}

impl DocumentError {
    pub fn error_code(&self) -> Code {
        match self {
            DocumentError::NotFound { .. } => codes::document::DOCUMENT_NOT_FOUND,
            DocumentError::Binary { .. } => codes::document::BINARY_DOCUMENT,
            DocumentError::TooLarge { .. } => codes::document::DOCUMENT_TOO_LARGE,
            DocumentError::InvalidEncoding { .. } => codes::document::INVALID_ENCODING,
            DocumentError::Io { .. } => codes::document::IO_ERROR,
            DocumentError::TooManyDocuments { .. } => codes::document::TOO_MANY_DOCUMENTS,
            DocumentError::Range(e) => e.error_code(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// Language a document is highlighted as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    /// No classifier attached; everything paints as DEFAULT
    PlainText,
}

impl Language {
    pub fn from_path(path: &Path) -> Self {
        let is_python = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| PYTHON_EXTENSIONS.contains(&ext))
            .unwrap_or(false);

        if is_python {
            Language::Python
        } else {
            Language::PlainText
        }
    }
}

/// NUL byte within the sniffed prefix
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_LENGTH).any(|&b| b == 0)
}

/// In-memory document text plus the state needed to restyle it
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
    language: Language,
    /// Classifier state at the end of previously styled ranges, keyed by offset
    checkpoints: BTreeMap<usize, ClassifierState>,
    carry_string_state: bool,
}

impl Document {
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            language: Language::from_path(&path),
            path,
            text: text.into(),
            checkpoints: BTreeMap::new(),
            carry_string_state: false,
        }
    }

    /// Read a document from disk, refusing binary and oversized files
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let result = Self::read(path);

        match &result {
            Ok(document) => {
                log_success!(codes::success::DOCUMENT_OPENED, "Document opened",
                    "path" => path.display(),
                    "bytes" => document.text.len(),
                    "language" => format!("{:?}", document.language)
                );
            }
            Err(e) => {
                log_error!(e.error_code(), &e.to_string(), "path" => path.display());
            }
        }

        result
    }

    fn read(path: &Path) -> Result<Self, DocumentError> {
        let io_error = |source: std::io::Error| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DocumentError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DocumentError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        };

        let size = fs::metadata(path).map_err(io_error)?.len();
        if size > MAX_DOCUMENT_SIZE {
            return Err(DocumentError::TooLarge { size });
        }

        let bytes = fs::read(path).map_err(io_error)?;
        if is_binary(&bytes) {
            return Err(DocumentError::Binary {
                path: path.to_path_buf(),
            });
        }

        let text = String::from_utf8(bytes).map_err(|_| DocumentError::InvalidEncoding {
            path: path.to_path_buf(),
        })?;

        Ok(Self::from_text(path, text))
    }

    /// Thread the string state from one restyle call into the next
    pub fn with_string_state_carry(mut self, enabled: bool) -> Self {
        self.carry_string_state = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_python(&self) -> bool {
        self.language == Language::Python
    }

    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// Point the document at a new path; the language follows the new extension
    pub fn set_path(&mut self, path: PathBuf) {
        let language = Language::from_path(&path);
        if language != self.language {
            self.checkpoints.clear();
        }
        self.language = language;
        self.path = path;
    }

    /// Restyle `[start, end)` of this document into `sink`.
    ///
    /// Plain-text documents get one DEFAULT span. With string-state carrying
    /// on, a range that starts where an earlier one ended picks up that
    /// range's ending state instead of starting from `Normal`.
    pub fn restyle<S: StyleSink + ?Sized>(
        &mut self,
        classifier: &Classifier,
        start: usize,
        end: usize,
        sink: &mut S,
    ) -> Result<ClassifierState, DocumentError> {
        if self.language == Language::PlainText {
            check_range(&self.text, start, end)?;
            sink.begin_styling(start);
            if start < end {
                sink.set_styling(end - start, StyleId::Default);
            }
            return Ok(ClassifierState::Normal);
        }

        if !self.carry_string_state {
            return Ok(classifier.style_range(&self.text, start, end, sink)?);
        }

        // Only a range whose entering state is known may leave a checkpoint
        let known = if start == 0 {
            Some(ClassifierState::Normal)
        } else {
            self.checkpoints.get(&start).copied()
        };
        let entering = known.unwrap_or_default();

        let ending = classifier.style_range_from(&self.text, start, end, entering, sink)?;

        if known.is_some() && end > 0 {
            self.checkpoints.insert(end, ending);
            while self.checkpoints.len() > MAX_CHECKPOINTS_PER_DOCUMENT {
                self.checkpoints.pop_first();
            }
        }

        Ok(ending)
    }

    /// Replace `range` with `replacement`, dropping checkpoints the edit invalidates
    pub fn replace_range(&mut self, range: TextRange, replacement: &str) -> Result<(), DocumentError> {
        if !range.is_valid_for(&self.text) {
            let error = if range.end > self.text.len() || range.start > range.end {
                HighlightError::RangeOutOfBounds {
                    start: range.start,
                    end: range.end,
                    len: self.text.len(),
                }
            } else {
                let offset = if self.text.is_char_boundary(range.start) {
                    range.end
                } else {
                    range.start
                };
                HighlightError::NotCharBoundary { offset }
            };
            return Err(error.into());
        }

        self.text.replace_range(range.start..range.end, replacement);

        // State at or before the edit start is unaffected
        let dropped = self.checkpoints.split_off(&(range.start + 1));
        if !dropped.is_empty() {
            log_debug!("Invalidated highlight checkpoints",
                "path" => self.path.display(),
                "count" => dropped.len()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{SpanRecorder, StyleSpan};
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_language_detection() {
        assert_eq!(Language::from_path(Path::new("a/b.py")), Language::Python);
        assert_eq!(Language::from_path(Path::new("gui.pyw")), Language::Python);
        assert_eq!(Language::from_path(Path::new("README.md")), Language::PlainText);
        assert_eq!(Language::from_path(Path::new("Makefile")), Language::PlainText);
        assert_eq!(Language::from_path(Path::new("x.PY")), Language::PlainText);
    }

    #[test]
    fn test_binary_sniffing() {
        assert!(!is_binary(b"print('hi')\n"));
        assert!(is_binary(b"ab\0cd"));

        let mut late_nul = vec![b'a'; BINARY_SNIFF_LENGTH];
        late_nul.push(0);
        assert!(!is_binary(&late_nul));
    }

    #[test]
    fn test_open_text_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.py");
        fs::write(&path, "import os\n").unwrap();

        let document = Document::open(&path).unwrap();
        assert_eq!(document.text(), "import os\n");
        assert!(document.is_python());
        assert_eq!(document.path(), path.as_path());
    }

    #[test]
    fn test_open_refuses_binary_and_missing() {
        let dir = tempdir().unwrap();
        let binary = dir.path().join("blob.py");
        fs::write(&binary, [0x7f, b'E', b'L', b'F', 0, 1]).unwrap();
        assert_matches!(Document::open(&binary), Err(DocumentError::Binary { .. }));

        let missing = dir.path().join("missing.py");
        let err = Document::open(&missing).unwrap_err();
        assert_matches!(err, DocumentError::NotFound { .. });
        assert_eq!(err.error_code(), codes::document::DOCUMENT_NOT_FOUND);
    }

    #[test]
    fn test_open_refuses_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.py");
        fs::write(&path, [b'x', b'=', 0xe9]).unwrap();
        assert_matches!(
            Document::open(&path),
            Err(DocumentError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_plain_text_restyle_is_single_default_span() {
        let mut document = Document::from_text("notes.txt", "def f(): pass");
        let mut recorder = SpanRecorder::new();
        document
            .restyle(&Classifier::python(), 0, 13, &mut recorder)
            .unwrap();
        assert_eq!(recorder.spans, vec![StyleSpan::new(13, StyleId::Default)]);

        assert_matches!(
            document.restyle(&Classifier::python(), 0, 99, &mut recorder),
            Err(DocumentError::Range(HighlightError::RangeOutOfBounds { .. }))
        );
    }

    #[test]
    fn test_plain_text_restyle_rejects_split_characters() {
        let mut document = Document::from_text("notes.txt", "caf\u{e9}");
        let mut recorder = SpanRecorder::new();
        assert_matches!(
            document.restyle(&Classifier::python(), 0, 4, &mut recorder),
            Err(DocumentError::Range(HighlightError::NotCharBoundary { offset: 4 }))
        );
        assert!(recorder.start.is_none());
    }

    #[test]
    fn test_unknown_entering_state_keeps_existing_checkpoint() {
        let text = "s = 'a if b'";
        let mut document = Document::from_text("s.py", text).with_string_state_carry(true);
        let classifier = Classifier::python();
        let mut sink = SpanRecorder::new();

        assert_eq!(
            document.restyle(&classifier, 0, 7, &mut sink).unwrap(),
            ClassifierState::InString
        );
        // Nothing is known about offset 6, so the checkpoint at 7 must survive
        document.restyle(&classifier, 6, 7, &mut sink).unwrap();
        assert_eq!(document.checkpoint_count(), 1);

        let mut resumed = SpanRecorder::new();
        document.restyle(&classifier, 7, 9, &mut resumed).unwrap();
        assert_eq!(resumed.spans, vec![StyleSpan::new(2, StyleId::String)]);
    }

    #[test]
    fn test_restyle_without_carry_resets_state() {
        let text = "s = 'a if b'";
        let mut document = Document::from_text("s.py", text);
        let classifier = Classifier::python();

        let mut first = SpanRecorder::new();
        let state = document.restyle(&classifier, 0, 7, &mut first).unwrap();
        assert_eq!(state, ClassifierState::InString);

        let mut second = SpanRecorder::new();
        document.restyle(&classifier, 7, 9, &mut second).unwrap();
        assert_eq!(second.spans, vec![StyleSpan::new(2, StyleId::Keyword)]);
        assert_eq!(document.checkpoint_count(), 0);
    }

    #[test]
    fn test_restyle_with_carry_continues_string() {
        let text = "s = 'a if b'";
        let mut document = Document::from_text("s.py", text).with_string_state_carry(true);
        let classifier = Classifier::python();

        let mut first = SpanRecorder::new();
        document.restyle(&classifier, 0, 7, &mut first).unwrap();
        assert_eq!(document.checkpoint_count(), 1);

        let mut second = SpanRecorder::new();
        document.restyle(&classifier, 7, 9, &mut second).unwrap();
        assert_eq!(second.spans, vec![StyleSpan::new(2, StyleId::String)]);

        // A range starting somewhere without a checkpoint starts from Normal
        let mut third = SpanRecorder::new();
        document.restyle(&classifier, 8, 9, &mut third).unwrap();
        assert_eq!(third.spans, vec![StyleSpan::new(1, StyleId::Default)]);
    }

    #[test]
    fn test_edit_invalidates_later_checkpoints() {
        let mut document =
            Document::from_text("s.py", "x = 'a'\ny = 2\n").with_string_state_carry(true);
        let classifier = Classifier::python();
        let mut sink = SpanRecorder::new();

        document.restyle(&classifier, 0, 5, &mut sink).unwrap();
        document.restyle(&classifier, 5, 8, &mut sink).unwrap();
        document.restyle(&classifier, 8, 14, &mut sink).unwrap();
        assert_eq!(document.checkpoint_count(), 3);

        document.replace_range(TextRange::new(5, 6), "bb").unwrap();
        assert_eq!(document.text(), "x = 'bb'\ny = 2\n");
        assert_eq!(document.checkpoint_count(), 1);

        assert_matches!(
            document.replace_range(TextRange::new(0, 99), ""),
            Err(DocumentError::Range(HighlightError::RangeOutOfBounds { .. }))
        );
    }

    #[test]
    fn test_replace_range_rejects_split_characters() {
        let mut document = Document::from_text("u.py", "é");
        assert_matches!(
            document.replace_range(TextRange::new(1, 2), "e"),
            Err(DocumentError::Range(HighlightError::NotCharBoundary { offset: 1 }))
        );
    }

    #[test]
    fn test_rename_changes_language() {
        let mut document = Document::from_text("script", "print(1)").with_string_state_carry(true);
        assert!(!document.is_python());
        document.set_path(PathBuf::from("script.py"));
        assert!(document.is_python());
        assert_eq!(document.path(), Path::new("script.py"));
    }
}
