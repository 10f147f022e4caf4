//! Splitting raw text into tokens.
//!
//! What counts as a token is entirely the caller's decision; a [`crate::TokenTable`] will count
//! whatever strings it's given.  This is just the simple policy most callers want: words are runs
//! of word characters, and everything else separates them.

use crate::error::InvalidInputSnafu;
use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;

/// Separates words in the default splitter
const DEFAULT_SEPARATOR: &str = r"[^\w]+";

static DEFAULT_SEPARATOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_SEPARATOR).expect("BUG: invalid default separator regex"));

/// Split text into words using the default separator (any run of non-word characters).
///
/// Empty strings are never yielded, so leading or trailing punctuation doesn't produce an empty
/// token.  The words borrow from `text`.
pub fn split_words(text: &str) -> Words<'static, '_> {
    Words {
        pieces: DEFAULT_SEPARATOR_REGEX.split(text),
    }
}

/// Splits text into words with a custom separator regex.
#[derive(Clone, Debug)]
pub struct WordSplitter {
    separator: Regex,
}

impl WordSplitter {
    /// Make a splitter that treats every match of `separator` as the boundary between two words.
    pub fn new(separator: &str) -> Result<Self> {
        let separator = Regex::new(separator).map_err(|e| {
            InvalidInputSnafu {
                reason: format!("invalid separator regex: {e}"),
            }
            .build()
        })?;

        Ok(Self { separator })
    }

    pub fn split<'r, 'h>(&'r self, text: &'h str) -> Words<'r, 'h> {
        Words {
            pieces: self.separator.split(text),
        }
    }
}

impl Default for WordSplitter {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR_REGEX.clone(),
        }
    }
}

/// Iterator over the non-empty words in some text.
///
/// See [`split_words`] and [`WordSplitter::split`]
pub struct Words<'r, 'h> {
    pieces: regex::Split<'r, 'h>,
}

impl<'r, 'h> Iterator for Words<'r, 'h> {
    type Item = &'h str;

    fn next(&mut self) -> Option<Self::Item> {
        self.pieces.by_ref().find(|piece| !piece.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenBinError;
    use assert_matches::assert_matches;

    #[test]
    fn split_words_works() {
        fn words(text: &str) -> Vec<&str> {
            split_words(text).collect()
        }

        assert!(words("").is_empty());
        assert!(words(" ,.;").is_empty());
        assert_eq!(vec!["foo"], words("foo"));
        assert_eq!(vec!["foo", "bar", "baz"], words("foo bar  baz"));
        assert_eq!(
            vec!["var", "TokenBin", "require", "lib", "TokenBin"],
            words("var TokenBin = require('../lib/TokenBin');")
        );
        assert_eq!(vec!["snake_case", "42"], words("  snake_case(42)\n"));
    }

    #[test]
    fn custom_separator() {
        let splitter = WordSplitter::new(r"\s*,\s*").unwrap();

        assert_eq!(
            vec!["a b", "c", "d"],
            splitter.split("a b , c,,d,").collect::<Vec<_>>()
        );
    }

    #[test]
    fn default_splitter_matches_split_words() {
        let text = "one, two; three";

        assert_eq!(
            split_words(text).collect::<Vec<_>>(),
            WordSplitter::default().split(text).collect::<Vec<_>>()
        );
    }

    #[test]
    fn invalid_separator_is_rejected() {
        assert_matches!(
            WordSplitter::new("(unclosed"),
            Err(TokenBinError::InvalidInput { .. })
        );
    }
}
