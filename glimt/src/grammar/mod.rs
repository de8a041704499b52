//! Language grammars and the rule machinery that drives tokenization.

pub mod gleam;
pub mod odin;
pub mod registry;
pub mod rules;

// Re-export the registry surface
pub use registry::{registry, Language, LanguageInfo, Registry};

// Re-export rule machinery
pub use rules::{CompiledGrammar, Emit, Grammar, GrammarError, Mode, ModeChange, Rule};
