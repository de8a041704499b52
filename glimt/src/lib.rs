// Internal modules
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use pipeline::{highlight_file, HighlightOptions, PipelineError, PipelineOutput, ThemeSelection};
pub use tokens::{Token, TokenCategory};
