//! Raw lexical token
//!
//! Tokens carry no language semantics. They are borrowed slices of the text
//! being highlighted, and their length is always measured in UTF-8 bytes
//! because editor components address text by byte offset.

use std::fmt;

/// Bracket characters styled as BRACKETS
pub const BRACKETS: [&str; 6] = ["(", ")", "{", "}", "[", "]"];

/// Arithmetic and comparison characters styled as TYPES
pub const OPERATORS: [&str; 8] = ["+", "-", "*", "/", "%", "=", "<", ">"];

/// Unicode whitespace plus the ASCII information separators `\x1c`..=`\x1f`,
/// which Python string methods also count as space
pub(crate) fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// A raw token borrowed from the input slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub lexeme: &'a str,
}

impl<'a> Token<'a> {
    /// Sentinel returned for out-of-range lookahead.
    ///
    /// Its lexeme is empty, so every identifier, whitespace and character
    /// comparison against it fails.
    pub const EMPTY: Token<'static> = Token { lexeme: "" };

    pub fn new(lexeme: &'a str) -> Self {
        Self { lexeme }
    }

    /// Length of the lexeme in UTF-8 bytes
    pub fn byte_len(&self) -> usize {
        self.lexeme.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }

    /// Pure whitespace run (never true for the empty sentinel)
    pub fn is_whitespace(&self) -> bool {
        !self.lexeme.is_empty() && self.lexeme.chars().all(is_space)
    }

    /// Identifier in the Python sense: a letter or underscore followed by
    /// letters, digits or underscores
    pub fn is_identifier(&self) -> bool {
        let mut chars = self.lexeme.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|c| c.is_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    /// Every character is numeric (`123`, `٣`), as opposed to a float or hex literal
    pub fn is_numeric(&self) -> bool {
        !self.lexeme.is_empty() && self.lexeme.chars().all(char::is_numeric)
    }

    pub fn is_quote(&self) -> bool {
        self.lexeme == "'" || self.lexeme == "\""
    }

    pub fn is_bracket(&self) -> bool {
        BRACKETS.contains(&self.lexeme)
    }

    pub fn is_operator(&self) -> bool {
        OPERATORS.contains(&self.lexeme)
    }

    /// Single `.` once surrounding whitespace is stripped
    pub fn is_member_dot(&self) -> bool {
        self.lexeme.trim() == "."
    }

    /// Whether this token is exactly `text`
    pub fn is(&self, text: &str) -> bool {
        self.lexeme == text
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len_is_utf8() {
        assert_eq!(Token::new("abc").byte_len(), 3);
        assert_eq!(Token::new("héllo").byte_len(), 6);
        assert_eq!(Token::new("日本").byte_len(), 6);
        assert_eq!(Token::EMPTY.byte_len(), 0);
    }

    #[test]
    fn test_empty_sentinel_fails_every_predicate() {
        let empty = Token::EMPTY;
        assert!(empty.is_empty());
        assert!(!empty.is_whitespace());
        assert!(!empty.is_identifier());
        assert!(!empty.is_numeric());
        assert!(!empty.is_quote());
        assert!(!empty.is_bracket());
        assert!(!empty.is_operator());
        assert!(!empty.is_member_dot());
        assert!(!empty.is(":"));
        assert!(!empty.is("("));
    }

    #[test]
    fn test_identifier() {
        assert!(Token::new("Foo").is_identifier());
        assert!(Token::new("_private").is_identifier());
        assert!(Token::new("snake_case2").is_identifier());
        assert!(Token::new("été").is_identifier());
        assert!(!Token::new("2fast").is_identifier());
        assert!(!Token::new("(").is_identifier());
        assert!(!Token::new(" ").is_identifier());
    }

    #[test]
    fn test_numeric() {
        assert!(Token::new("42").is_numeric());
        assert!(!Token::new("4x").is_numeric());
        assert!(!Token::new("x").is_numeric());
    }

    #[test]
    fn test_character_classes() {
        for bracket in BRACKETS {
            assert!(Token::new(bracket).is_bracket());
        }
        assert!(!Token::new("<").is_bracket());

        for op in OPERATORS {
            assert!(Token::new(op).is_operator());
        }
        assert!(!Token::new("/*").is_operator());
        assert!(!Token::new("!").is_operator());

        assert!(Token::new("'").is_quote());
        assert!(Token::new("\"").is_quote());
        assert!(!Token::new("`").is_quote());

        assert!(Token::new(" \t\n").is_whitespace());
        assert!(!Token::new(" a").is_whitespace());
        assert!(Token::new(".").is_member_dot());
    }
}
