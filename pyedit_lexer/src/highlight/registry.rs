//! Keyword and builtin registries
//!
//! Word sets are configuration handed to the classifier once at construction.
//! Nothing here inspects the running environment.

use std::collections::HashSet;

/// Python 3 reserved words
pub fn python_keywords() -> &'static [&'static str] {
    &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
    ]
}

/// Python builtin functions implemented natively by the interpreter.
///
/// Builtin classes such as `int` or `list` are not part of this set.
pub fn python_builtins() -> &'static [&'static str] {
    &[
        "__build_class__",
        "__import__",
        "abs",
        "aiter",
        "all",
        "anext",
        "any",
        "ascii",
        "bin",
        "breakpoint",
        "callable",
        "chr",
        "compile",
        "delattr",
        "dir",
        "divmod",
        "eval",
        "exec",
        "format",
        "getattr",
        "globals",
        "hasattr",
        "hash",
        "hex",
        "id",
        "input",
        "isinstance",
        "issubclass",
        "iter",
        "len",
        "locals",
        "max",
        "min",
        "next",
        "oct",
        "open",
        "ord",
        "pow",
        "print",
        "repr",
        "round",
        "setattr",
        "sorted",
        "sum",
        "vars",
    ]
}

/// Immutable set of words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
}

impl WordSet {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in sorted order
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl<S: Into<String>> FromIterator<S> for WordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Language-specific word tables consumed by the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    pub name: String,
    pub keywords: WordSet,
    pub builtins: WordSet,
    /// Word styled as a constant, like a numeric literal
    pub self_word: String,
}

impl LanguageProfile {
    pub fn new(name: impl Into<String>, keywords: WordSet, builtins: WordSet) -> Self {
        Self {
            name: name.into(),
            keywords,
            builtins,
            self_word: "self".to_string(),
        }
    }

    pub fn python() -> Self {
        Self::new(
            "python",
            python_keywords().iter().copied().collect(),
            python_builtins().iter().copied().collect(),
        )
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(word)
    }

    pub fn is_self_word(&self, word: &str) -> bool {
        self.self_word == word
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::python()
    }
}
