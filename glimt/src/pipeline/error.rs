use crate::file_processor::FileProcessorError;
use crate::logging::codes;
use crate::render::ThemeError;

/// Errors that stop the highlighting pipeline.
///
/// Tokenization is absent on purpose: it always succeeds and reports
/// problems as warnings on the output instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("file loading failed: {0}")]
    File(#[from] FileProcessorError),

    #[error("theme selection failed: {0}")]
    Theme(#[from] ThemeError),

    #[error("unknown language '{name}'")]
    UnknownLanguage { name: String },

    #[error("cannot infer a language for '{path}': unrecognized extension")]
    UnknownExtension { path: String },

    #[error("token dump failed: {0}")]
    TokenDump(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            PipelineError::File(err) => err.error_code(),
            PipelineError::Theme(err) => err.error_code(),
            PipelineError::UnknownLanguage { .. } => codes::grammar::UNKNOWN_LANGUAGE,
            PipelineError::UnknownExtension { .. } => codes::grammar::UNKNOWN_EXTENSION,
            PipelineError::TokenDump(_) => codes::system::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let err = PipelineError::from(FileProcessorError::FileNotFound {
            path: "x.gleam".to_string(),
        });
        assert_eq!(err.error_code().as_str(), "E005");

        let err = PipelineError::from(ThemeError::UnknownTheme {
            name: "dracula".to_string(),
        });
        assert_eq!(err.error_code().as_str(), "E040");
    }

    #[test]
    fn selection_errors_have_their_own_codes() {
        let err = PipelineError::UnknownLanguage {
            name: "zig".to_string(),
        };
        assert_eq!(err.error_code().as_str(), "E020");

        let err = PipelineError::UnknownExtension {
            path: "notes.txt".to_string(),
        };
        assert_eq!(err.error_code().as_str(), "E021");
    }
}
