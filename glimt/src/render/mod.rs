//! Terminal rendering: themes and the ANSI escape writer.

pub mod ansi;
pub mod theme;

pub use ansi::AnsiRenderer;
pub use theme::{Style, StyleSet, Theme, ThemeError};
