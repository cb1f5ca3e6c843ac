//! Word/punctuation tokenization for counting.
//!
//! A token is either a maximal run of word characters (Unicode letters,
//! decimal digits, combining marks and connector punctuation such as `_`) or
//! a single non-whitespace character outside such a run. Whitespace separates
//! tokens and is never emitted.
//!
//! Word characters follow the `regex` crate's Unicode `\w`. Other numerals
//! (superscripts, vulgar fractions) are not word characters and stand alone,
//! while a combining accent stays attached to the letter before it:
//! `"x² e\u{301}"` gives `["x", "²", "e\u{301}"]`.
//!
//! ```
//! let result = pdftok::tokenize("Hello, world!");
//! assert_eq!(result.tokens(), ["Hello", ",", "world", "!"]);
//! assert_eq!(result.count(), 4);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

/// Word run, or any single non-whitespace character.
const TOKEN_PATTERN: &str = r"\b\w+\b|\S";

/// Splits text into word and punctuation tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Create a tokenizer.
    pub fn new() -> Self {
        Self {
            pattern: token_regex().clone(),
        }
    }

    /// Tokenize `text` after trimming surrounding whitespace.
    pub fn tokenize(&self, text: &str) -> TokenizationResult {
        let tokens = self
            .pattern
            .find_iter(text.trim())
            .map(|m| m.as_str().to_string())
            .collect();
        TokenizationResult { tokens }
    }

    /// Tokenize a JSON value; anything but a string yields no tokens.
    pub fn tokenize_value(&self, value: &Value) -> TokenizationResult {
        match value {
            Value::String(text) => self.tokenize(text),
            _ => TokenizationResult::default(),
        }
    }

    /// Tokenize optional text; `None` yields no tokens.
    pub fn tokenize_opt(&self, text: Option<&str>) -> TokenizationResult {
        text.map(|t| self.tokenize(t)).unwrap_or_default()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Tokens in order of appearance.
///
/// The count is always the number of tokens held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizationResult {
    tokens: Vec<String>,
}

impl TokenizationResult {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    /// Split into `(tokens, count)`.
    pub fn into_parts(self) -> (Vec<String>, usize) {
        let count = self.tokens.len();
        (self.tokens, count)
    }
}

impl Serialize for TokenizationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TokenizationResult", 2)?;
        state.serialize_field("tokens", &self.tokens)?;
        state.serialize_field("count", &self.count())?;
        state.end()
    }
}
