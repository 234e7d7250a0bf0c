//! Style identifiers, styled spans and classifier state
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of highlighting categories.
///
/// The discriminants are the numeric style ids editor components use, and
/// they index [`crate::theme::StyleTable`] directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleId {
    Default = 0,
    Keyword = 1,
    Types = 2,
    String = 3,
    #[serde(rename = "keyargs")]
    KeyArgs = 4,
    Brackets = 5,
    Comments = 6,
    Constants = 7,
    Functions = 8,
    Classes = 9,
    FunctionDef = 10,
}

impl StyleId {
    pub const COUNT: usize = 11;

    pub const ALL: [StyleId; StyleId::COUNT] = [
        StyleId::Default,
        StyleId::Keyword,
        StyleId::Types,
        StyleId::String,
        StyleId::KeyArgs,
        StyleId::Brackets,
        StyleId::Comments,
        StyleId::Constants,
        StyleId::Functions,
        StyleId::Classes,
        StyleId::FunctionDef,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Theme key for this style
    pub const fn name(self) -> &'static str {
        match self {
            StyleId::Default => "default",
            StyleId::Keyword => "keyword",
            StyleId::Types => "types",
            StyleId::String => "string",
            StyleId::KeyArgs => "keyargs",
            StyleId::Brackets => "brackets",
            StyleId::Comments => "comments",
            StyleId::Constants => "constants",
            StyleId::Functions => "functions",
            StyleId::Classes => "classes",
            StyleId::FunctionDef => "function_def",
        }
    }

    /// Exact, case-sensitive lookup of a theme key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|style| style.name() == name)
    }

    /// Upper-case label shown by editor style dialogs
    pub const fn description(self) -> &'static str {
        match self {
            StyleId::Default => "DEFAULT",
            StyleId::Keyword => "KEYWORD",
            StyleId::Types => "TYPES",
            StyleId::String => "STRING",
            StyleId::KeyArgs => "KEYARGS",
            StyleId::Brackets => "BRACKETS",
            StyleId::Comments => "COMMENTS",
            StyleId::Constants => "CONSTANTS",
            StyleId::Functions => "FUNCTIONS",
            StyleId::Classes => "CLASSES",
            StyleId::FunctionDef => "FUNCTION_DEF",
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A run of `byte_len` bytes painted with one style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpan {
    pub byte_len: usize,
    pub style: StyleId,
}

impl StyleSpan {
    pub const fn new(byte_len: usize, style: StyleId) -> Self {
        Self { byte_len, style }
    }
}

/// State carried between tokens while classifying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClassifierState {
    #[default]
    Normal,
    /// Inside a string literal that has not been closed yet
    InString,
}

impl ClassifierState {
    pub fn is_in_string(self) -> bool {
        self == ClassifierState::InString
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(StyleId::Default.index(), 0);
        assert_eq!(StyleId::Keyword.index(), 1);
        assert_eq!(StyleId::String.index(), 3);
        assert_eq!(StyleId::FunctionDef.index(), 10);

        for (i, style) in StyleId::ALL.iter().enumerate() {
            assert_eq!(style.index(), i);
            assert_eq!(StyleId::from_index(i), Some(*style));
        }
        assert_eq!(StyleId::from_index(StyleId::COUNT), None);
    }

    #[test]
    fn test_name_lookup_is_exact() {
        for style in StyleId::ALL {
            assert_eq!(StyleId::from_name(style.name()), Some(style));
        }
        assert_eq!(StyleId::from_name("function_def"), Some(StyleId::FunctionDef));
        assert_eq!(StyleId::from_name("Keyword"), None);
        assert_eq!(StyleId::from_name("KEYWORD"), None);
        assert_eq!(StyleId::from_name(""), None);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(StyleId::FunctionDef.description(), "FUNCTION_DEF");
        assert_eq!(StyleId::KeyArgs.to_string(), "KEYARGS");
    }

    #[test]
    fn test_state_defaults_to_normal() {
        assert_eq!(ClassifierState::default(), ClassifierState::Normal);
        assert!(ClassifierState::InString.is_in_string());
    }
}
