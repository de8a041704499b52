//! Shared primitives used across the tokenizer, renderer, and CLI.

pub mod span;

pub use span::{Position, SourceMap, Span};
