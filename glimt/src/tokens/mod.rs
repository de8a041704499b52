//! Token model for the highlighting pipeline.
//!
//! Tokenization turns raw source text into a flat sequence of
//! [`Token`]s: immutable `(category, text)` pairs covering every byte of
//! the input, whitespace and comments included. The categories come from
//! a single closed taxonomy ([`TokenCategory`]) shared by all grammars,
//! so a theme written once styles every supported language.
//!
//! # Overview
//!
//! - **[`TokenCategory`]** - The fixed category taxonomy with its
//!   sub-kinds ([`CommentKind`], [`NumberKind`], [`StringKind`],
//!   [`OperatorKind`])
//! - **[`Token`]** - One categorized span, borrowing its text from the
//!   input
//!
//! Tokens carry [`Span`]s with byte offsets and line/column positions so
//! diagnostics (the unterminated-comment warning, the token dump) can
//! point back into the source without re-scanning it.
//!
//! # Invariant
//!
//! For any input, concatenating the `text` of every emitted token in
//! order reproduces the input exactly: no gaps, no overlaps. The
//! tokenizer in [`crate::lexical`] upholds this even for input that
//! matches no rule (see [`TokenCategory::Error`]).

pub mod category;
pub mod token;

// Re-export key types for convenience
pub use category::{CommentKind, NumberKind, OperatorKind, StringKind, TokenCategory};
pub use token::Token;

// Re-export span types from utils
pub use crate::utils::{Position, Span};
