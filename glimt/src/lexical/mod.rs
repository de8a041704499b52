//! Lexical analysis: turning source text into a category-tagged token
//! stream using a compiled grammar's rule tables.

pub mod analyzer;

use crate::config::runtime::LexicalPreferences;
use crate::grammar::rules::CompiledGrammar;

pub use analyzer::{LexicalMetrics, Tokens};

/// Tokenize `source` with the given grammar and default preferences
pub fn tokenize<'a>(grammar: &'a CompiledGrammar, source: &'a str) -> Tokens<'a> {
    Tokens::new(grammar, source)
}

/// Tokenize with custom runtime preferences
pub fn tokenize_with_preferences<'a>(
    grammar: &'a CompiledGrammar,
    source: &'a str,
    preferences: LexicalPreferences,
) -> Tokens<'a> {
    Tokens::with_preferences(grammar, source, preferences)
}
