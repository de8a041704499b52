//! ANSI terminal rendering of token streams.
//!
//! The renderer walks tokens in order and wraps each styled token in
//! open/reset escape sequences. Plain tokens (whitespace, anything the
//! theme leaves unstyled) pass through untouched, so the rendered output
//! with color disabled is byte-identical to the input.

use crate::render::theme::{Style, Theme};
use crate::tokens::Token;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const UNDERLINE: &str = "\x1b[4m";

/// Renders tokens to a string with ANSI escapes.
pub struct AnsiRenderer {
    theme: Theme,
    use_color: bool,
}

impl AnsiRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            use_color: true,
        }
    }

    pub fn with_color(theme: Theme, use_color: bool) -> Self {
        Self { theme, use_color }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render a token sequence to one output string
    pub fn render<'a, I>(&self, tokens: I) -> String
    where
        I: IntoIterator<Item = Token<'a>>,
    {
        let mut output = String::new();
        for token in tokens {
            self.render_token(&token, &mut output);
        }
        output
    }

    fn render_token(&self, token: &Token<'_>, output: &mut String) {
        let style = self.theme.style_for(token.category);
        if !self.use_color || style.is_plain() {
            output.push_str(token.text);
            return;
        }
        push_style(&style, output);
        output.push_str(token.text);
        output.push_str(RESET);
    }
}

fn push_style(style: &Style, output: &mut String) {
    if style.bold {
        output.push_str(BOLD);
    }
    if style.italic {
        output.push_str(ITALIC);
    }
    if style.underline {
        output.push_str(UNDERLINE);
    }
    if let Some(color) = style.fg {
        output.push_str(&format!("\x1b[38;5;{}m", color));
    }
}
