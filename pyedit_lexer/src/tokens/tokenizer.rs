//! Tokenizer: splits a text slice into raw tokens with no gaps or overlaps

use super::token::{is_space, Token};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lazy tokenizer over a text slice.
///
/// Token boundaries, in priority order:
/// 1. the block-comment delimiters `*/` and `/*` as single tokens
/// 2. maximal runs of whitespace
/// 3. maximal runs of word characters (letters, digits, underscore)
/// 4. any single other character
///
/// A clone continues from the same position. Build a new tokenizer over the
/// same text to re-run from the beginning.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    /// Byte offset of the next token within the slice
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.text.len()
    }

    /// Byte length of the token starting at the front of `rest`
    fn token_len(rest: &str) -> usize {
        if rest.starts_with("*/") || rest.starts_with("/*") {
            return 2;
        }

        let first = match rest.chars().next() {
            Some(c) => c,
            None => return 0,
        };

        let run = |pred: fn(char) -> bool| {
            rest.char_indices()
                .find(|&(_, c)| !pred(c))
                .map(|(i, _)| i)
                .unwrap_or(rest.len())
        };

        if is_space(first) {
            run(is_space)
        } else if is_word_char(first) {
            run(is_word_char)
        } else {
            first.len_utf8()
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.position..];
        let len = Self::token_len(rest);
        if len == 0 {
            return None;
        }

        self.position += len;
        Some(Token::new(&rest[..len]))
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Tokenize a whole slice eagerly
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Tokenizer::new(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(text: &str) -> Vec<&str> {
        tokenize(text).into_iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(Tokenizer::new("").is_finished());
    }

    #[test]
    fn test_words_whitespace_and_punctuation() {
        assert_eq!(
            lexemes("def foo(x):\n    return x+1"),
            vec![
                "def", " ", "foo", "(", "x", ")", ":", "\n    ", "return", " ", "x", "+", "1"
            ]
        );
    }

    #[test]
    fn test_comment_delimiters_stay_intact() {
        assert_eq!(lexemes("a/*b*/c"), vec!["a", "/*", "b", "*/", "c"]);
        assert_eq!(lexemes("**/"), vec!["*", "*/"]);
        assert_eq!(lexemes("//"), vec!["/", "/"]);
    }

    #[test]
    fn test_other_characters_are_single_tokens() {
        assert_eq!(lexemes("==\"'"), vec!["=", "=", "\"", "'"]);
        assert_eq!(lexemes("a→b"), vec!["a", "→", "b"]);
    }

    #[test]
    fn test_unicode_word_runs() {
        assert_eq!(lexemes("naïve_été 日本"), vec!["naïve_été", " ", "日本"]);
        let tokens = tokenize("日本");
        assert_eq!(tokens[0].byte_len(), 6);
    }

    #[test]
    fn test_information_separators_are_whitespace() {
        assert_eq!(lexemes("a\x1c\x1f b"), vec!["a", "\x1c\x1f ", "b"]);
        assert!(tokenize("\x1d")[0].is_whitespace());
    }

    #[test]
    fn test_tokens_cover_input_exactly() {
        let samples = [
            "",
            " ",
            "class Foo(Bar):\n\tpass\n",
            "x = 'héllo wörld' # ok",
            "/* ** */ */ /*",
            "\u{00a0}\u{3000}mixed\r\n",
            "🦀🦀 rust",
        ];

        for sample in samples {
            let joined: String = lexemes(sample).concat();
            assert_eq!(joined, sample);
            let total: usize = tokenize(sample).iter().map(|t| t.byte_len()).sum();
            assert_eq!(total, sample.len());
        }
    }

    #[test]
    fn test_rerunnable() {
        let text = "print(len(x))";
        let first: Vec<_> = Tokenizer::new(text).collect();
        let second: Vec<_> = Tokenizer::new(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_position_tracks_consumed_bytes() {
        let mut tokenizer = Tokenizer::new("ab  é");
        tokenizer.next();
        assert_eq!(tokenizer.position(), 2);
        tokenizer.next();
        assert_eq!(tokenizer.position(), 4);
        tokenizer.next();
        assert!(tokenizer.is_finished());
        assert_eq!(tokenizer.next(), None);
    }
}
