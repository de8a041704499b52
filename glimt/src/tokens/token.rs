//! The token value produced by tokenization.
use crate::tokens::TokenCategory;
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// One categorized span of input.
///
/// Tokens borrow their text from the input they were produced from;
/// concatenating the `text` of every token of a tokenization, in order,
/// reproduces the input exactly. Tokens are never mutated after emission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Token<'a> {
    /// Category from the shared taxonomy
    pub category: TokenCategory,
    /// The exact substring matched
    pub text: &'a str,
    /// Where in the input the text came from
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Create a new token
    pub fn new(category: TokenCategory, text: &'a str, span: Span) -> Self {
        debug_assert_eq!(span.len(), text.len(), "span must cover the token text");
        Self {
            category,
            text,
            span,
        }
    }

    /// Byte length of the token text
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Tokens are never empty; kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}", self.category, self.text, self.span)
    }
}
