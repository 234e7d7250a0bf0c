//! Pull-based token cursor with bounded lookahead

use super::token::Token;
use super::tokenizer::Tokenizer;
use std::collections::VecDeque;

/// Mutable queue view over a tokenizer.
///
/// Tokens are pulled from the tokenizer only when consumed or peeked, so the
/// lookahead buffer never holds more than the furthest peek offset.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    source: Tokenizer<'a>,
    lookahead: VecDeque<Token<'a>>,
    consumed: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::from_tokenizer(Tokenizer::new(text))
    }

    pub fn from_tokenizer(source: Tokenizer<'a>) -> Self {
        Self {
            source,
            lookahead: VecDeque::new(),
            consumed: 0,
        }
    }

    /// Make sure `count` tokens are buffered, if the input has that many
    fn fill(&mut self, count: usize) {
        while self.lookahead.len() < count {
            match self.source.next() {
                Some(token) => self.lookahead.push_back(token),
                None => break,
            }
        }
    }

    /// Remove and return the front token; `None` once exhausted
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Token<'a>> {
        self.fill(1);
        let token = self.lookahead.pop_front()?;
        self.consumed += 1;
        Some(token)
    }

    /// Discard `skip - 1` tokens, then remove and return the next one.
    ///
    /// Used right after a lookahead to jump past the inspected tokens in one
    /// step. `skip` of 0 or 1 behaves like [`next`](Self::next).
    pub fn next_skip(&mut self, skip: usize) -> Option<Token<'a>> {
        for _ in 1..skip {
            self.next()?;
        }
        self.next()
    }

    /// Token at offset `n` without consuming it, or [`Token::EMPTY`] past the end
    pub fn peek(&mut self, n: usize) -> Token<'a> {
        self.fill(n + 1);
        self.lookahead.get(n).copied().unwrap_or(Token::EMPTY)
    }

    /// First non-whitespace token at or after offset `from`, together with the
    /// offset immediately after it.
    ///
    /// Past the end this yields the empty sentinel, which stops the scan.
    pub fn skip_space_peek(&mut self, from: usize) -> (Token<'a>, usize) {
        let mut offset = from;
        loop {
            let token = self.peek(offset);
            offset += 1;
            if !token.is_whitespace() {
                return (token, offset);
            }
        }
    }

    /// Total byte length of the `count` tokens at the front, without consuming
    pub fn peek_byte_len(&mut self, count: usize) -> usize {
        self.fill(count);
        self.lookahead.iter().take(count).map(Token::byte_len).sum()
    }

    pub fn is_exhausted(&mut self) -> bool {
        self.fill(1);
        self.lookahead.is_empty()
    }

    /// Number of tokens consumed so far
    pub fn consumed_tokens(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_until_exhausted() {
        let mut cursor = TokenCursor::new("a b");
        assert_eq!(cursor.next(), Some(Token::new("a")));
        assert_eq!(cursor.next(), Some(Token::new(" ")));
        assert_eq!(cursor.next(), Some(Token::new("b")));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.consumed_tokens(), 3);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut cursor = TokenCursor::new("x.y");
        assert_eq!(cursor.peek(0), Token::new("x"));
        assert_eq!(cursor.peek(2), Token::new("y"));
        assert_eq!(cursor.peek(0), Token::new("x"));
        assert_eq!(cursor.consumed_tokens(), 0);
        assert_eq!(cursor.next(), Some(Token::new("x")));
    }

    #[test]
    fn test_peek_out_of_range_is_empty_sentinel() {
        let mut cursor = TokenCursor::new("a");
        assert_eq!(cursor.peek(1), Token::EMPTY);
        assert_eq!(cursor.peek(100), Token::EMPTY);

        let mut empty = TokenCursor::new("");
        assert_eq!(empty.peek(0), Token::EMPTY);
        assert_eq!(empty.next(), None);
    }

    #[test]
    fn test_next_skip() {
        let mut cursor = TokenCursor::new("class  Foo:");
        cursor.next();
        // "  " then "Foo"
        assert_eq!(cursor.next_skip(2), Some(Token::new("Foo")));
        assert_eq!(cursor.next(), Some(Token::new(":")));

        let mut cursor = TokenCursor::new("a b");
        assert_eq!(cursor.next_skip(0), Some(Token::new("a")));
        assert_eq!(cursor.next_skip(1), Some(Token::new(" ")));
        assert_eq!(cursor.next_skip(5), None);
    }

    #[test]
    fn test_skip_space_peek() {
        let mut cursor = TokenCursor::new(" \n Foo  (");
        let (name, after_name) = cursor.skip_space_peek(0);
        assert_eq!(name, Token::new("Foo"));
        assert_eq!(after_name, 2);

        let (delimiter, after_delimiter) = cursor.skip_space_peek(after_name);
        assert_eq!(delimiter, Token::new("("));
        assert_eq!(after_delimiter, 4);

        let (past_end, _) = cursor.skip_space_peek(after_delimiter);
        assert_eq!(past_end, Token::EMPTY);

        // Nothing was consumed
        assert_eq!(cursor.consumed_tokens(), 0);
        assert_eq!(cursor.peek_byte_len(after_name), " \n Foo".len());
    }

    #[test]
    fn test_skip_space_peek_on_trailing_whitespace() {
        let mut cursor = TokenCursor::new("   ");
        assert_eq!(cursor.skip_space_peek(0), (Token::EMPTY, 2));
    }
}
