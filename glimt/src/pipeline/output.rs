use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::utils::Span;
use std::time::Duration;

/// Everything the pipeline produced for one file.
///
/// Warnings ride along instead of failing the run: an unterminated
/// block comment or unmatched input still yields rendered output, and
/// the caller decides how loudly to surface them.
#[derive(Debug)]
pub struct PipelineOutput {
    /// ANSI-rendered source, ready for stdout
    pub rendered: String,
    /// JSON token dump, when requested
    pub tokens_json: Option<String>,
    /// Name of the grammar that tokenized the input
    pub language: String,
    /// Name of the theme that styled the output
    pub theme: String,
    pub metrics: LexicalMetrics,
    pub file_metadata: FileMetadata,
    /// Opener of a block comment still unclosed at end of input
    pub unterminated_comment: Option<Span>,
    /// First span no rule matched, with the total unmatched byte count
    pub first_unmatched: Option<Span>,
    pub unmatched_bytes: usize,
    /// Source text, kept so callers can print caret diagnostics
    pub source: String,
    pub duration: Duration,
}

impl PipelineOutput {
    pub fn token_count(&self) -> usize {
        self.metrics.total_tokens
    }

    pub fn has_warnings(&self) -> bool {
        self.unterminated_comment.is_some() || self.first_unmatched.is_some()
    }

    pub fn log_success(&self, file_path: &str) {
        let tokens_str = self.token_count().to_string();
        let warnings_str = self.has_warnings().to_string();
        crate::log_performance!(
            crate::logging::codes::success::HIGHLIGHT_COMPLETE,
            "Highlighting pipeline completed",
            duration = self.duration,
            "file" => file_path,
            "language" => self.language.as_str(),
            "theme" => self.theme.as_str(),
            "tokens" => tokens_str.as_str(),
            "has_warnings" => warnings_str.as_str()
        );
    }
}
