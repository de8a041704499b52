//! Language registry with lookup by name, alias, or file path.

use super::rules::{CompiledGrammar, GrammarError};
use super::{gleam, odin};
use std::path::Path;
use std::sync::OnceLock;

/// Descriptive metadata for a registered language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// File extensions without the leading dot
    pub extensions: &'static [&'static str],
    /// Carried as metadata only, never consulted for lookup
    pub mime_types: &'static [&'static str],
}

/// A registered language: metadata plus its compiled grammar.
pub struct Language {
    pub info: LanguageInfo,
    pub grammar: CompiledGrammar,
}

/// All registered languages. Lookup is case-insensitive.
pub struct Registry {
    languages: Vec<Language>,
}

impl Registry {
    fn build() -> Result<Self, GrammarError> {
        Ok(Self {
            languages: vec![
                Language {
                    info: LanguageInfo {
                        name: gleam::NAME,
                        aliases: gleam::ALIASES,
                        extensions: gleam::EXTENSIONS,
                        mime_types: gleam::MIME_TYPES,
                    },
                    grammar: gleam::grammar().compile()?,
                },
                Language {
                    info: LanguageInfo {
                        name: odin::NAME,
                        aliases: odin::ALIASES,
                        extensions: odin::EXTENSIONS,
                        mime_types: odin::MIME_TYPES,
                    },
                    grammar: odin::grammar().compile()?,
                },
            ],
        })
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Look up by language name or alias
    pub fn find_by_name(&self, name: &str) -> Option<&Language> {
        let needle = name.to_lowercase();
        self.languages.iter().find(|lang| {
            lang.info.name == needle || lang.info.aliases.iter().any(|a| *a == needle)
        })
    }

    /// Look up by file extension
    pub fn find_by_path(&self, path: &Path) -> Option<&Language> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.languages
            .iter()
            .find(|lang| lang.info.extensions.iter().any(|e| *e == ext))
    }
}

/// Global registry, compiled once on first use.
///
/// Grammars are defined in this crate, so compilation failure is a bug in
/// a grammar table and aborts with the offending rule in the message.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| match Registry::build() {
        Ok(registry) => registry,
        Err(err) => panic!("built-in grammar failed to compile: {}", err),
    })
}
