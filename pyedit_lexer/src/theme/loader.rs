//! Theme feed loading
//!
//! A theme is JSON of the form
//!
//! ```json
//! {"theme": {"syntax": [
//!     {"keyword": {"color": "#c678dd", "bg-color": "#282c34",
//!                  "font": {"family": "Consolas", "font-size": 14,
//!                           "font-weight": "bold", "italic": false}}}
//! ]}}
//! ```
//!
//! Only whole-file problems fail the load. A bad rule or attribute is skipped
//! with a warning and every other rule still applies.

use super::color::Color;
use super::font::{Font, FontWeight};
use super::table::{StyleTable, ThemeRule};
use crate::config::compile_time::theme::{MAX_THEME_FILE_SIZE, MAX_THEME_RULES};
use crate::config::runtime::ThemePreferences;
use crate::highlight::StyleId;
use crate::logging::codes;
use crate::logging::Code;
use crate::{log_error, log_success, log_warning};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Theme loading errors that reject the whole file
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Theme file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot read theme file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Theme too large: {size} bytes (max {MAX_THEME_FILE_SIZE})")]
    TooLarge { size: u64 },

    #[error("Theme is not valid JSON: {message} at line {line}, column {column}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Theme has no 'theme.syntax' list")]
    MissingSyntaxSection,
}

impl ThemeError {
    pub fn error_code(&self) -> Code {
        match self {
            ThemeError::NotFound { .. } => codes::theme::THEME_NOT_FOUND,
            ThemeError::Read { .. } => codes::theme::THEME_READ_ERROR,
            ThemeError::TooLarge { .. } => codes::theme::THEME_TOO_LARGE,
            ThemeError::Parse { .. } => codes::theme::THEME_PARSE_ERROR,
            ThemeError::MissingSyntaxSection => codes::theme::MISSING_SYNTAX_SECTION,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(error: serde_json::Error) -> Self {
        ThemeError::Parse {
            message: error.to_string(),
            line: error.line(),
            column: error.column(),
        }
    }
}

/// A skipped rule or attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeWarning {
    pub code: Code,
    /// Style key the warning refers to, when one could be read
    pub style: Option<String>,
    pub message: String,
}

impl std::fmt::Display for ThemeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.style {
            Some(style) => write!(f, "{} [{}] {}", self.code, style, self.message),
            None => write!(f, "{} {}", self.code, self.message),
        }
    }
}

/// Outcome of a successful load
#[derive(Debug, Clone)]
pub struct ThemeLoadReport {
    /// Base table with every accepted rule applied
    pub table: StyleTable,
    /// Accepted rules in feed order
    pub rules: Vec<ThemeRule>,
    pub warnings: Vec<ThemeWarning>,
}

impl ThemeLoadReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Loads theme feeds on top of a base style table
#[derive(Debug, Clone)]
pub struct ThemeLoader {
    base: StyleTable,
    log_warnings: bool,
}

impl ThemeLoader {
    pub fn new() -> Self {
        Self {
            base: StyleTable::default(),
            log_warnings: true,
        }
    }

    pub fn from_preferences(preferences: &ThemePreferences) -> Self {
        Self {
            base: StyleTable::default(),
            log_warnings: preferences.log_rule_warnings,
        }
    }

    /// Table the rules are applied on top of
    pub fn with_base(mut self, base: StyleTable) -> Self {
        self.base = base;
        self
    }

    pub fn with_warning_logging(mut self, enabled: bool) -> Self {
        self.log_warnings = enabled;
        self
    }

    pub fn load_file(&self, path: &Path) -> Result<ThemeLoadReport, ThemeError> {
        let result = self.read_file(path).and_then(|json| self.parse(&json));

        match &result {
            Ok(report) => {
                log_success!(codes::success::THEME_LOADED, "Theme loaded",
                    "path" => path.display(),
                    "rules" => report.rules.len(),
                    "warnings" => report.warnings.len()
                );
            }
            Err(e) => {
                log_error!(e.error_code(), &e.to_string(), "path" => path.display());
            }
        }

        result
    }

    fn read_file(&self, path: &Path) -> Result<String, ThemeError> {
        let metadata = fs::metadata(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ThemeError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ThemeError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        if metadata.len() > MAX_THEME_FILE_SIZE {
            return Err(ThemeError::TooLarge {
                size: metadata.len(),
            });
        }

        fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(&self, json: &str) -> Result<ThemeLoadReport, ThemeError> {
        if json.len() as u64 > MAX_THEME_FILE_SIZE {
            return Err(ThemeError::TooLarge {
                size: json.len() as u64,
            });
        }

        let document: Value = serde_json::from_str(json)?;
        let syntax = document
            .get("theme")
            .and_then(|theme| theme.get("syntax"))
            .and_then(Value::as_array)
            .ok_or(ThemeError::MissingSyntaxSection)?;

        let mut pass = RulePass {
            defaults: self.base.defaults().font.clone(),
            rules: Vec::new(),
            warnings: Vec::new(),
        };

        for (index, entry) in syntax.iter().enumerate() {
            if !pass.read_entry(index, entry) {
                pass.warn(
                    codes::theme::TOO_MANY_RULES,
                    None,
                    format!(
                        "Ignoring rules from entry #{} on, past the limit of {}",
                        index, MAX_THEME_RULES
                    ),
                );
                break;
            }
        }

        if self.log_warnings {
            for warning in &pass.warnings {
                match &warning.style {
                    Some(style) => {
                        log_warning!(code = warning.code, &warning.message, "style" => style)
                    }
                    None => log_warning!(code = warning.code, &warning.message),
                }
            }
        }

        let mut table = self.base.clone();
        for rule in &pass.rules {
            table.apply(rule);
        }

        Ok(ThemeLoadReport {
            table,
            rules: pass.rules,
            warnings: pass.warnings,
        })
    }
}

impl Default for ThemeLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Working state while reading the rule list
struct RulePass {
    defaults: Font,
    rules: Vec<ThemeRule>,
    warnings: Vec<ThemeWarning>,
}

impl RulePass {
    fn warn(&mut self, code: Code, style: Option<&str>, message: String) {
        self.warnings.push(ThemeWarning {
            code,
            style: style.map(str::to_string),
            message,
        });
    }

    /// Returns false once a rule would exceed `MAX_THEME_RULES`
    fn read_entry(&mut self, index: usize, entry: &Value) -> bool {
        let Some(object) = entry.as_object().filter(|o| !o.is_empty()) else {
            self.warn(
                codes::theme::MALFORMED_RULE,
                None,
                format!("Rule #{} is not a non-empty object", index),
            );
            return true;
        };

        // Each key of an entry is read as its own rule
        for (name, body) in object {
            let Some(style) = StyleId::from_name(name) else {
                self.warn(
                    codes::theme::UNKNOWN_STYLE_NAME,
                    Some(name.as_str()),
                    format!("{} is not a valid style name", name),
                );
                continue;
            };

            let Some(attributes) = body.as_object() else {
                self.warn(
                    codes::theme::MALFORMED_RULE,
                    Some(name.as_str()),
                    "Rule body must be an object".to_string(),
                );
                continue;
            };

            let rule = self.read_rule(style, name, attributes);
            if rule.is_empty() {
                continue;
            }
            if self.rules.len() >= MAX_THEME_RULES {
                return false;
            }
            self.rules.push(rule);
        }

        true
    }

    fn read_rule(&mut self, style: StyleId, name: &str, attributes: &Map<String, Value>) -> ThemeRule {
        let mut rule = ThemeRule::new(style);

        // Unrecognised attribute keys are ignored
        for (key, value) in attributes {
            match key.as_str() {
                "color" => rule.color = self.read_color(name, key, value),
                "bg-color" => rule.bg_color = self.read_color(name, key, value),
                "font" => rule.font = self.read_font(name, value),
                _ => {}
            }
        }

        rule
    }

    fn read_color(&mut self, name: &str, key: &str, value: &Value) -> Option<Color> {
        let parsed = match value.as_str() {
            Some(text) => Color::parse(text).map_err(|e| e.to_string()),
            None => Err(format!("{} must be a hex string", key)),
        };

        match parsed {
            Ok(color) => Some(color),
            Err(message) => {
                self.warn(codes::theme::INVALID_COLOR, Some(name), message);
                None
            }
        }
    }

    fn read_font(&mut self, name: &str, value: &Value) -> Option<Font> {
        let Some(object) = value.as_object() else {
            self.warn(
                codes::theme::INVALID_FONT,
                Some(name),
                "font must be an object".to_string(),
            );
            return None;
        };

        let family = match object.get("family") {
            None => self.defaults.family.clone(),
            Some(Value::String(family)) if !family.is_empty() => family.clone(),
            Some(_) => {
                self.warn(
                    codes::theme::INVALID_FONT,
                    Some(name),
                    "font family must be a non-empty string".to_string(),
                );
                return None;
            }
        };

        let size = match object.get("font-size") {
            None => self.defaults.size,
            Some(value) => match value.as_u64().filter(|s| *s > 0).and_then(|s| u32::try_from(s).ok()) {
                Some(size) => size,
                None => {
                    self.warn(
                        codes::theme::INVALID_FONT,
                        Some(name),
                        format!("font-size {} must be a positive integer", value),
                    );
                    return None;
                }
            },
        };

        let weight = match object.get("font-weight") {
            None => FontWeight::Normal,
            Some(value) => {
                let weight = value.as_str().and_then(FontWeight::from_name);
                if weight.is_none() {
                    self.warn(
                        codes::theme::UNKNOWN_FONT_WEIGHT,
                        Some(name),
                        format!("Unknown font-weight {}, using normal", value),
                    );
                }
                weight.unwrap_or_default()
            }
        };

        let italic = match object.get("italic") {
            None => false,
            Some(Value::Bool(italic)) => *italic,
            Some(other) => {
                self.warn(
                    codes::theme::INVALID_FONT,
                    Some(name),
                    format!("italic {} must be a boolean", other),
                );
                return None;
            }
        };

        Some(Font::new(family, size).with_weight(weight).with_italic(italic))
    }
}

/// Parse a theme onto the plain default table
pub fn parse_theme(json: &str) -> Result<ThemeLoadReport, ThemeError> {
    ThemeLoader::new().parse(json)
}

/// Load a theme file onto the plain default table
pub fn load_theme_file(path: impl AsRef<Path>) -> Result<ThemeLoadReport, ThemeError> {
    ThemeLoader::new().load_file(path.as_ref())
}
