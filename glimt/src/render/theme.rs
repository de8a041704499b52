//! Color themes.
//!
//! A theme maps token categories to terminal styles. Two themes ship
//! built in ("github" and "mono"); additional themes load from TOML
//! files. Colors are 256-color palette indices so output works in any
//! xterm-compatible terminal without truecolor negotiation.

use crate::config::compile_time::rendering;
use crate::logging::codes;
use crate::tokens::TokenCategory;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Rendering style for one token group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Style {
    /// 256-color palette index for the foreground
    pub fg: Option<u8>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub const fn none() -> Self {
        Self {
            fg: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    pub const fn fg(color: u8) -> Self {
        Self {
            fg: Some(color),
            bold: false,
            italic: false,
            underline: false,
        }
    }

    pub const fn fg_bold(color: u8) -> Self {
        Self {
            fg: Some(color),
            bold: true,
            italic: false,
            underline: false,
        }
    }

    const fn bold() -> Self {
        Self {
            fg: None,
            bold: true,
            italic: false,
            underline: false,
        }
    }

    const fn italic() -> Self {
        Self {
            fg: None,
            bold: false,
            italic: true,
            underline: false,
        }
    }

    /// True when rendering this style changes nothing
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && !self.bold && !self.italic && !self.underline
    }
}

/// Styles per token group. Token kinds collapse onto their group: every
/// number kind shares `number`, both string kinds share `string`, and so
/// on. Groups a theme file omits render unstyled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleSet {
    pub keyword: Style,
    #[serde(rename = "type")]
    pub type_name: Style,
    pub constant: Style,
    pub function: Style,
    pub namespace: Style,
    pub identifier: Style,
    pub number: Style,
    pub string: Style,
    pub escape: Style,
    pub comment: Style,
    pub attribute: Style,
    pub operator: Style,
    pub punctuation: Style,
    pub error: Style,
}

/// A named set of token styles.
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub styles: StyleSet,
}

impl Theme {
    /// Style applied to tokens of this category
    pub fn style_for(&self, category: TokenCategory) -> Style {
        match category {
            TokenCategory::Whitespace => Style::none(),
            TokenCategory::Comment(_) => self.styles.comment,
            TokenCategory::Keyword => self.styles.keyword,
            TokenCategory::Type => self.styles.type_name,
            TokenCategory::Constant => self.styles.constant,
            TokenCategory::Function => self.styles.function,
            TokenCategory::Namespace => self.styles.namespace,
            TokenCategory::Identifier => self.styles.identifier,
            TokenCategory::Number(_) => self.styles.number,
            TokenCategory::StringLiteral(_) => self.styles.string,
            TokenCategory::Escape => self.styles.escape,
            TokenCategory::Attribute => self.styles.attribute,
            TokenCategory::Operator(_) => self.styles.operator,
            TokenCategory::Punctuation => self.styles.punctuation,
            TokenCategory::Error => self.styles.error,
        }
    }
}

/// Errors raised while resolving or loading a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("unknown theme '{name}'")]
    UnknownTheme { name: String },

    #[error("cannot read theme file '{path}': {source}")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("theme file '{path}' is {size} bytes, over the {limit} byte limit")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("theme file '{path}' is not a valid theme: {source}")]
    InvalidThemeFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ThemeError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            ThemeError::UnknownTheme { .. } => codes::render::UNKNOWN_THEME,
            ThemeError::FileUnreadable { .. } | ThemeError::FileTooLarge { .. } => {
                codes::render::THEME_FILE_UNREADABLE
            }
            ThemeError::InvalidThemeFile { .. } => codes::render::INVALID_THEME_FILE,
        }
    }
}

/// Names of the built-in themes
pub fn builtin_names() -> &'static [&'static str] {
    &["github", "mono"]
}

/// Look up a built-in theme by name
pub fn builtin(name: &str) -> Option<Theme> {
    match name.to_lowercase().as_str() {
        "github" => Some(github()),
        "mono" => Some(mono()),
        _ => None,
    }
}

/// Resolve a theme name, erroring on unknown names
pub fn load(name: &str) -> Result<Theme, ThemeError> {
    builtin(name).ok_or_else(|| ThemeError::UnknownTheme {
        name: name.to_string(),
    })
}

/// Load a theme from a TOML file
pub fn load_file(path: &Path) -> Result<Theme, ThemeError> {
    let metadata = std::fs::metadata(path).map_err(|source| ThemeError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let limit = rendering::MAX_THEME_FILE_SIZE;
    if metadata.len() > limit {
        return Err(ThemeError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }

    let text = std::fs::read_to_string(path).map_err(|source| ThemeError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&text).map_err(|source| ThemeError::InvalidThemeFile {
        path: path.to_path_buf(),
        source,
    })
}

/// GitHub-flavored light palette
pub fn github() -> Theme {
    Theme {
        name: "github".to_string(),
        styles: StyleSet {
            keyword: Style::fg(167),
            type_name: Style::fg(29),
            constant: Style::fg(26),
            function: Style::fg(97),
            namespace: Style::fg(26),
            identifier: Style::none(),
            number: Style::fg(26),
            string: Style::fg(24),
            escape: Style::fg(30),
            comment: Style::fg(245),
            attribute: Style::fg(94),
            operator: Style::fg(167),
            punctuation: Style::none(),
            error: Style::fg_bold(196),
        },
    }
}

/// Monochrome theme for terminals without reliable color
pub fn mono() -> Theme {
    Theme {
        name: "mono".to_string(),
        styles: StyleSet {
            keyword: Style::bold(),
            type_name: Style::bold(),
            constant: Style::bold(),
            function: Style::none(),
            namespace: Style::none(),
            identifier: Style::none(),
            number: Style::none(),
            string: Style::italic(),
            escape: Style::bold(),
            comment: Style::italic(),
            attribute: Style::bold(),
            operator: Style::none(),
            punctuation: Style::none(),
            error: Style {
                fg: None,
                bold: false,
                italic: false,
                underline: true,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{NumberKind, StringKind};
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn builtins_resolve_case_insensitively() {
        assert_eq!(builtin("github").unwrap().name, "github");
        assert_eq!(builtin("GitHub").unwrap().name, "github");
        assert_eq!(builtin("mono").unwrap().name, "mono");
        assert!(builtin("dracula").is_none());
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let err = load("dracula").unwrap_err();
        assert_matches!(err, ThemeError::UnknownTheme { .. });
        assert_eq!(err.error_code().as_str(), "E040");
    }

    #[test]
    fn number_kinds_share_one_style() {
        let theme = github();
        let hex = theme.style_for(TokenCategory::Number(NumberKind::Hex));
        let int = theme.style_for(TokenCategory::Number(NumberKind::Integer));
        assert_eq!(hex, int);

        let double = theme.style_for(TokenCategory::StringLiteral(StringKind::Double));
        let single = theme.style_for(TokenCategory::StringLiteral(StringKind::Single));
        assert_eq!(double, single);
    }

    #[test]
    fn whitespace_is_always_plain() {
        assert!(github().style_for(TokenCategory::Whitespace).is_plain());
        assert!(mono().style_for(TokenCategory::Whitespace).is_plain());
    }

    #[test]
    fn loads_theme_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocean.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
name = "ocean"

[styles]
keyword = {{ fg = 33, bold = true }}
string = {{ fg = 30 }}
"#
        )
        .unwrap();

        let theme = load_file(&path).unwrap();
        assert_eq!(theme.name, "ocean");
        assert_eq!(theme.styles.keyword.fg, Some(33));
        assert!(theme.styles.keyword.bold);
        // Unspecified groups default to plain
        assert!(theme.styles.operator.is_plain());
    }

    #[test]
    fn rejects_invalid_theme_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "keyword = [not toml").unwrap();

        let err = load_file(&path).unwrap_err();
        assert_matches!(err, ThemeError::InvalidThemeFile { .. });
        assert_eq!(err.error_code().as_str(), "E042");
    }

    #[test]
    fn missing_theme_file_is_unreadable() {
        let err = load_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert_matches!(err, ThemeError::FileUnreadable { .. });
        assert_eq!(err.error_code().as_str(), "E041");
    }
}
