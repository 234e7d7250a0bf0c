//! Consolidated event codes and classification system
//!
//! Single source of truth for every code the highlighter logs, together with
//! its behavioural metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Theme loading codes. Whole-file failures are errors, rule-level problems are warnings.
pub mod theme {
    use super::Code;

    pub const THEME_NOT_FOUND: Code = Code::new("E010");
    pub const THEME_READ_ERROR: Code = Code::new("E011");
    pub const THEME_PARSE_ERROR: Code = Code::new("E012");
    pub const MISSING_SYNTAX_SECTION: Code = Code::new("E013");
    pub const THEME_TOO_LARGE: Code = Code::new("E014");

    pub const UNKNOWN_STYLE_NAME: Code = Code::new("W015");
    pub const MALFORMED_RULE: Code = Code::new("W016");
    pub const INVALID_COLOR: Code = Code::new("W017");
    pub const INVALID_FONT: Code = Code::new("W018");
    pub const UNKNOWN_FONT_WEIGHT: Code = Code::new("W019");
    pub const TOO_MANY_RULES: Code = Code::new("W020");
}

/// Highlight request codes
pub mod highlight {
    use super::Code;

    pub const RANGE_OUT_OF_BOUNDS: Code = Code::new("E030");
    pub const RANGE_NOT_CHAR_BOUNDARY: Code = Code::new("E031");
}

/// Document layer codes
pub mod document {
    use super::Code;

    pub const DOCUMENT_NOT_FOUND: Code = Code::new("E040");
    pub const BINARY_DOCUMENT: Code = Code::new("E041");
    pub const DOCUMENT_TOO_LARGE: Code = Code::new("E042");
    pub const INVALID_ENCODING: Code = Code::new("E043");
    pub const IO_ERROR: Code = Code::new("E044");
    pub const TOO_MANY_DOCUMENTS: Code = Code::new("E045");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const THEME_LOADED: Code = Code::new("I010");
    pub const HIGHLIGHT_COMPLETE: Code = Code::new("I030");

    pub const DOCUMENT_OPENED: Code = Code::new("I040");
    pub const DOCUMENT_RENAMED: Code = Code::new("I041");
    pub const DOCUMENT_CLOSED: Code = Code::new("I042");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal error",
                "File a bug report with the failing input",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Highlighter initialization failure",
                "Check configuration and environment variables",
            ),
            // Theme - file level
            ErrorMetadata::new(
                "E010",
                "Theme",
                Severity::Medium,
                true,
                false,
                "Theme file not found",
                "Check the theme path; default styles remain in effect",
            ),
            ErrorMetadata::new(
                "E011",
                "Theme",
                Severity::Medium,
                true,
                false,
                "Theme file could not be read",
                "Check file permissions; default styles remain in effect",
            ),
            ErrorMetadata::new(
                "E012",
                "Theme",
                Severity::Medium,
                true,
                false,
                "Theme file is not valid JSON",
                "Fix the JSON syntax of the theme file",
            ),
            ErrorMetadata::new(
                "E013",
                "Theme",
                Severity::Medium,
                true,
                false,
                "Theme file has no theme.syntax rule list",
                "Add a \"syntax\" list under the \"theme\" object",
            ),
            ErrorMetadata::new(
                "E014",
                "Theme",
                Severity::Medium,
                true,
                false,
                "Theme file exceeds maximum size",
                "Reduce the theme file size",
            ),
            // Theme - rule level
            ErrorMetadata::new(
                "W015",
                "Theme",
                Severity::Low,
                true,
                false,
                "Theme rule names an unknown style",
                "Use one of the eleven style names",
            ),
            ErrorMetadata::new(
                "W016",
                "Theme",
                Severity::Low,
                true,
                false,
                "Theme rule is not a single-key object",
                "Write each rule as {\"<style>\": {...}}",
            ),
            ErrorMetadata::new(
                "W017",
                "Theme",
                Severity::Low,
                true,
                false,
                "Theme colour is not a hex colour",
                "Use #rgb, #rrggbb or #aarrggbb",
            ),
            ErrorMetadata::new(
                "W018",
                "Theme",
                Severity::Low,
                true,
                false,
                "Theme font entry is malformed",
                "Provide family, font-size, font-weight and italic with correct types",
            ),
            ErrorMetadata::new(
                "W019",
                "Theme",
                Severity::Low,
                true,
                false,
                "Unknown font weight, normal weight used",
                "Use one of thin..black",
            ),
            ErrorMetadata::new(
                "W020",
                "Theme",
                Severity::Low,
                true,
                false,
                "Theme has more rules than allowed, extra rules ignored",
                "Remove duplicate rules",
            ),
            // Highlight
            ErrorMetadata::new(
                "E030",
                "Highlight",
                Severity::High,
                true,
                false,
                "Restyle range lies outside the document",
                "Clamp the requested range to the document length",
            ),
            ErrorMetadata::new(
                "E031",
                "Highlight",
                Severity::High,
                true,
                false,
                "Restyle range splits a UTF-8 character",
                "Align range boundaries to character boundaries",
            ),
            // Document
            ErrorMetadata::new(
                "E040",
                "Document",
                Severity::Medium,
                true,
                false,
                "Document path does not exist",
                "Check the path",
            ),
            ErrorMetadata::new(
                "E041",
                "Document",
                Severity::Low,
                true,
                false,
                "Document looks binary and cannot be opened",
                "Open a text file instead",
            ),
            ErrorMetadata::new(
                "E042",
                "Document",
                Severity::Medium,
                true,
                false,
                "Document exceeds maximum size",
                "Open a smaller file",
            ),
            ErrorMetadata::new(
                "E043",
                "Document",
                Severity::Medium,
                true,
                false,
                "Document is not valid UTF-8",
                "Convert the file to UTF-8",
            ),
            ErrorMetadata::new(
                "E044",
                "Document",
                Severity::Medium,
                true,
                false,
                "I/O error reading document",
                "Check file permissions and disk state",
            ),
            ErrorMetadata::new(
                "E045",
                "Document",
                Severity::Medium,
                true,
                false,
                "Too many open documents",
                "Close some documents first",
            ),
        ];

        entries.into_iter().map(|m| (m.code, m)).collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
