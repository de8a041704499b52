use crate::config::runtime::RenderPreferences;
use std::path::PathBuf;

/// How the pipeline picks a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSelection {
    /// A built-in theme by name
    Named(String),
    /// A TOML theme file
    File(PathBuf),
}

/// Per-invocation pipeline settings.
///
/// Defaults come from render preferences, so the environment can steer
/// theme and color without any flags.
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// Language name override; `None` selects by file extension
    pub language: Option<String>,
    pub theme: ThemeSelection,
    /// Also produce the token dump as JSON
    pub emit_tokens: bool,
    pub use_color: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        let prefs = RenderPreferences::default();
        Self {
            language: None,
            theme: ThemeSelection::Named(prefs.default_theme),
            emit_tokens: false,
            use_color: prefs.enable_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_by_extension() {
        let options = HighlightOptions::default();
        assert!(options.language.is_none());
        assert!(!options.emit_tokens);
        assert!(matches!(options.theme, ThemeSelection::Named(_)));
    }
}
