//! Rule table machinery shared by all language grammars.
//!
//! A grammar is an ordered list of modes, each an ordered list of rules.
//! Rule order is load-bearing: the tokenizer tries rules top to bottom and
//! the first match wins, so a rule shadows everything below it for the
//! input it accepts. Patterns are compiled once, anchored at the match
//! position, and reused for every file.

use crate::logging::codes;
use crate::tokens::TokenCategory;
use regex::Regex;
use std::collections::HashMap;

/// What a matched rule emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    /// The whole match becomes one token of this category
    Single(TokenCategory),
    /// Each capture group becomes its own token, in group order.
    /// Groups must partition the match so no byte is dropped.
    Groups(Vec<TokenCategory>),
}

/// Mode stack transition applied after a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Stay in the current mode
    None,
    /// Enter the named mode
    Push(&'static str),
    /// Leave the current mode. At the root this is a no-op.
    Pop,
    /// Replace the current mode with the named one. Stack depth is
    /// unchanged.
    Switch(&'static str),
}

/// A single tokenization rule: pattern, emission, mode transition.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub emit: Emit,
    pub mode_change: ModeChange,
}

impl Rule {
    /// Rule emitting the whole match as one token
    pub fn token(pattern: impl Into<String>, category: TokenCategory) -> Self {
        Self {
            pattern: pattern.into(),
            emit: Emit::Single(category),
            mode_change: ModeChange::None,
        }
    }

    /// Rule emitting one token per capture group
    pub fn groups(pattern: impl Into<String>, categories: Vec<TokenCategory>) -> Self {
        Self {
            pattern: pattern.into(),
            emit: Emit::Groups(categories),
            mode_change: ModeChange::None,
        }
    }

    /// Rule emitting one token, then entering `mode`
    pub fn push(pattern: impl Into<String>, category: TokenCategory, mode: &'static str) -> Self {
        Self {
            pattern: pattern.into(),
            emit: Emit::Single(category),
            mode_change: ModeChange::Push(mode),
        }
    }

    /// Rule emitting one token, then leaving the current mode
    pub fn pop(pattern: impl Into<String>, category: TokenCategory) -> Self {
        Self {
            pattern: pattern.into(),
            emit: Emit::Single(category),
            mode_change: ModeChange::Pop,
        }
    }

    /// Rule emitting one token, then replacing the current mode with `mode`
    pub fn switch(pattern: impl Into<String>, category: TokenCategory, mode: &'static str) -> Self {
        Self {
            pattern: pattern.into(),
            emit: Emit::Single(category),
            mode_change: ModeChange::Switch(mode),
        }
    }
}

/// A named, ordered rule list
#[derive(Debug, Clone)]
pub struct Mode {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

/// An uncompiled grammar definition. `modes[0]` is the root mode.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub name: &'static str,
    pub modes: Vec<Mode>,
}

/// Errors raised while compiling a grammar definition.
///
/// Grammars ship inside the crate, so any of these indicates a bug in a
/// grammar table rather than a user mistake.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("invalid pattern in grammar '{grammar}' mode '{mode}' rule {index}: {source}")]
    InvalidPattern {
        grammar: &'static str,
        mode: &'static str,
        index: usize,
        source: regex::Error,
    },

    #[error("grammar '{grammar}' mode '{mode}' rule {index} targets unknown mode '{target}'")]
    UnknownMode {
        grammar: &'static str,
        mode: &'static str,
        index: usize,
        target: &'static str,
    },

    #[error(
        "grammar '{grammar}' mode '{mode}' rule {index} declares {declared} group \
         categories but the pattern has {actual} capture groups"
    )]
    GroupCountMismatch {
        grammar: &'static str,
        mode: &'static str,
        index: usize,
        declared: usize,
        actual: usize,
    },

    #[error("grammar '{grammar}' has no modes")]
    EmptyGrammar { grammar: &'static str },
}

impl GrammarError {
    pub fn error_code(&self) -> codes::Code {
        codes::system::INTERNAL_ERROR
    }
}

/// A rule with its pattern compiled and anchored.
#[derive(Debug)]
pub struct CompiledRule {
    /// Original pattern text, kept for diagnostics and order inspection
    pub pattern: String,
    regex: Regex,
    pub emit: Emit,
    pub mode_change: ModeChange,
}

/// One token's worth of text produced by a rule match.
pub type Piece<'t> = (TokenCategory, &'t str);

/// The outcome of applying one rule at the current position.
#[derive(Debug)]
pub struct RuleMatch<'t> {
    /// Bytes consumed from the input
    pub len: usize,
    /// Emitted (category, text) pairs in source order
    pub pieces: Vec<Piece<'t>>,
    pub mode_change: ModeChange,
}

impl CompiledRule {
    /// Try this rule at the start of `rest`. Empty matches are rejected so
    /// the tokenizer always advances.
    pub fn apply<'t>(&self, rest: &'t str) -> Option<RuleMatch<'t>> {
        match &self.emit {
            Emit::Single(category) => {
                let m = self.regex.find(rest)?;
                if m.end() == 0 {
                    return None;
                }
                Some(RuleMatch {
                    len: m.end(),
                    pieces: vec![(*category, m.as_str())],
                    mode_change: self.mode_change,
                })
            }
            Emit::Groups(categories) => {
                let caps = self.regex.captures(rest)?;
                let whole = caps.get(0)?;
                if whole.end() == 0 {
                    return None;
                }

                let mut pieces = Vec::with_capacity(categories.len());
                for (i, category) in categories.iter().enumerate() {
                    if let Some(group) = caps.get(i + 1) {
                        pieces.push((*category, group.as_str()));
                    }
                }

                debug_assert_eq!(
                    pieces.iter().map(|(_, text)| text.len()).sum::<usize>(),
                    whole.end(),
                    "capture groups must partition the match"
                );

                Some(RuleMatch {
                    len: whole.end(),
                    pieces,
                    mode_change: self.mode_change,
                })
            }
        }
    }
}

/// A compiled mode: the analyzer walks `rules` in order at each position.
#[derive(Debug)]
pub struct CompiledMode {
    pub name: &'static str,
    pub rules: Vec<CompiledRule>,
}

/// A fully compiled grammar, ready for tokenization.
#[derive(Debug)]
pub struct CompiledGrammar {
    pub name: &'static str,
    modes: Vec<CompiledMode>,
    mode_index: HashMap<&'static str, usize>,
}

impl Grammar {
    /// Compile every pattern and validate mode references and group counts.
    pub fn compile(self) -> Result<CompiledGrammar, GrammarError> {
        if self.modes.is_empty() {
            return Err(GrammarError::EmptyGrammar { grammar: self.name });
        }

        let mode_index: HashMap<&'static str, usize> = self
            .modes
            .iter()
            .enumerate()
            .map(|(i, mode)| (mode.name, i))
            .collect();

        let mut modes = Vec::with_capacity(self.modes.len());
        for mode in self.modes {
            let mut rules = Vec::with_capacity(mode.rules.len());
            for (index, rule) in mode.rules.into_iter().enumerate() {
                if let ModeChange::Push(target) | ModeChange::Switch(target) = rule.mode_change {
                    if !mode_index.contains_key(target) {
                        return Err(GrammarError::UnknownMode {
                            grammar: self.name,
                            mode: mode.name,
                            index,
                            target,
                        });
                    }
                }

                // Anchor at the match position; (?:) keeps group numbering
                let anchored = format!(r"\A(?:{})", rule.pattern);
                let regex =
                    Regex::new(&anchored).map_err(|source| GrammarError::InvalidPattern {
                        grammar: self.name,
                        mode: mode.name,
                        index,
                        source,
                    })?;

                if let Emit::Groups(categories) = &rule.emit {
                    let actual = regex.captures_len() - 1;
                    if actual != categories.len() {
                        return Err(GrammarError::GroupCountMismatch {
                            grammar: self.name,
                            mode: mode.name,
                            index,
                            declared: categories.len(),
                            actual,
                        });
                    }
                }

                rules.push(CompiledRule {
                    pattern: rule.pattern,
                    regex,
                    emit: rule.emit,
                    mode_change: rule.mode_change,
                });
            }
            modes.push(CompiledMode {
                name: mode.name,
                rules,
            });
        }

        Ok(CompiledGrammar {
            name: self.name,
            modes,
            mode_index,
        })
    }
}

impl CompiledGrammar {
    /// Index of the root mode
    pub fn root(&self) -> usize {
        0
    }

    pub fn mode(&self, index: usize) -> &CompiledMode {
        &self.modes[index]
    }

    pub fn mode_named(&self, name: &str) -> Option<usize> {
        self.mode_index.get(name).copied()
    }

    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }
}

/// Build `\b(?:word|word|...)\b` from a word list.
pub fn word_pattern(words: &[&str]) -> String {
    let mut pattern = String::from(r"\b(?:");
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            pattern.push('|');
        }
        pattern.push_str(&regex::escape(word));
    }
    pattern.push_str(r")\b");
    pattern
}
