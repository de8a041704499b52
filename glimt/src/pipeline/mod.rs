//! The highlighting pipeline: load a file, select a grammar, tokenize,
//! render.
//!
//! Only loading, selection, and theme resolution can fail. Tokenization
//! always succeeds; its problems (unterminated block comment, input no
//! rule matched) are carried on the output as warnings with source
//! spans, and the caller decides how to surface them.

mod error;
mod options;
mod output;

pub use error::PipelineError;
pub use options::{HighlightOptions, ThemeSelection};
pub use output::PipelineOutput;

use crate::config::runtime::LexicalPreferences;
use crate::grammar::{registry, Language};
use crate::lexical::Tokens;
use crate::logging::{self, codes};
use crate::render::{theme, AnsiRenderer, Theme};
use crate::tokens::Token;
use crate::{log_error, log_info, log_success, log_warning};
use std::path::Path;
use std::time::Instant;

/// Highlight one file according to the options
pub fn highlight_file(
    file_path: &Path,
    options: &HighlightOptions,
) -> Result<PipelineOutput, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(file_path, || {
        let shown = file_path.display().to_string();
        log_info!("Starting highlighting pipeline", "file" => shown.as_str());

        let loaded = crate::file_processor::load_file(file_path)?;
        let language = select_language(file_path, options.language.as_deref())?;
        let renderer = AnsiRenderer::with_color(resolve_theme(&options.theme)?, options.use_color);
        let theme_name = renderer.theme().name.clone();

        // Tokens borrow the source, so everything derived from them is
        // finished inside this block before the source moves into the
        // output.
        let (rendered, tokens_json, metrics, unterminated_comment, first_unmatched, unmatched_bytes) = {
            let mut stream = Tokens::with_preferences(
                &language.grammar,
                &loaded.source,
                LexicalPreferences::default(),
            );
            let tokens: Vec<Token<'_>> = stream.by_ref().collect();

            report_tokenization(&stream, &shown);

            let tokens_json = if options.emit_tokens {
                Some(serde_json::to_string_pretty(&tokens)?)
            } else {
                None
            };

            let rendered = renderer.render(tokens.iter().copied());
            log_success!(
                codes::success::RENDER_COMPLETE,
                "Rendering complete",
                "theme" => theme_name.as_str(),
                "bytes" => rendered.len()
            );

            (
                rendered,
                tokens_json,
                stream.metrics().clone(),
                stream.unterminated_comment(),
                stream.first_unmatched(),
                stream.unmatched_bytes(),
            )
        };

        let output = PipelineOutput {
            rendered,
            tokens_json,
            language: language.info.name.to_string(),
            theme: theme_name,
            metrics,
            file_metadata: loaded.metadata,
            unterminated_comment,
            first_unmatched,
            unmatched_bytes,
            source: loaded.source,
            duration: start_time.elapsed(),
        };

        output.log_success(&shown);

        Ok(output)
    })
}

fn select_language(
    path: &Path,
    requested: Option<&str>,
) -> Result<&'static Language, PipelineError> {
    let languages = registry();
    match requested {
        Some(name) => languages.find_by_name(name).ok_or_else(|| {
            let error = PipelineError::UnknownLanguage {
                name: name.to_string(),
            };
            log_error!(error.error_code(), "No grammar registered under the requested name",
                "language" => name);
            error
        }),
        None => languages.find_by_path(path).ok_or_else(|| {
            let shown = path.display().to_string();
            let error = PipelineError::UnknownExtension {
                path: shown.clone(),
            };
            log_error!(error.error_code(), "No grammar registered for the file extension",
                "path" => shown.as_str());
            error
        }),
    }
}

fn resolve_theme(selection: &ThemeSelection) -> Result<Theme, PipelineError> {
    match selection {
        ThemeSelection::Named(name) => theme::load(name).map_err(|err| {
            log_error!(err.error_code(), "Theme selection failed", "theme" => name.as_str());
            PipelineError::from(err)
        }),
        ThemeSelection::File(path) => theme::load_file(path).map_err(|err| {
            let shown = path.display().to_string();
            log_error!(err.error_code(), "Theme file loading failed",
                "theme_file" => shown.as_str());
            PipelineError::from(err)
        }),
    }
}

fn report_tokenization(stream: &Tokens<'_>, shown: &str) {
    if let Some(span) = stream.unterminated_comment() {
        log_warning!(
            codes::lexical::UNTERMINATED_BLOCK_COMMENT,
            "Block comment still open at end of input",
            span = span
        );
    }

    if let Some(span) = stream.first_unmatched() {
        let bytes_str = stream.unmatched_bytes().to_string();
        log_warning!(
            codes::lexical::UNMATCHED_INPUT,
            "Input matched no rule and was emitted as fallback tokens",
            span = span,
            "unmatched_bytes" => bytes_str.as_str()
        );
    }

    let tokens_str = stream.metrics().total_tokens.to_string();
    let depth_str = stream.metrics().max_mode_depth.to_string();
    log_success!(
        codes::success::TOKENIZATION_COMPLETE,
        "Tokenization complete",
        "file" => shown,
        "tokens" => tokens_str.as_str(),
        "max_mode_depth" => depth_str.as_str()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn plain_options() -> HighlightOptions {
        HighlightOptions {
            language: None,
            theme: ThemeSelection::Named("github".to_string()),
            emit_tokens: false,
            use_color: false,
        }
    }

    #[test]
    fn highlights_a_gleam_file_by_extension() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("hello.gleam");
        let source = "pub fn main() {\n  io.println(\"hi\")\n}\n";
        fs::write(&file_path, source).unwrap();

        let output = highlight_file(&file_path, &plain_options()).unwrap();
        assert_eq!(output.language, "gleam");
        assert_eq!(output.theme, "github");
        // Color off: rendered output is the source, byte for byte
        assert_eq!(output.rendered, source);
        assert!(output.token_count() > 0);
        assert!(!output.has_warnings());
        assert!(output.tokens_json.is_none());
    }

    #[test]
    fn explicit_language_overrides_the_extension() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("snippet.txt");
        fs::write(&file_path, "count := 0\n").unwrap();

        let options = HighlightOptions {
            language: Some("odin".to_string()),
            ..plain_options()
        };
        let output = highlight_file(&file_path, &options).unwrap();
        assert_eq!(output.language, "odin");
    }

    #[test]
    fn unknown_extension_without_override_fails() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        fs::write(&file_path, "hello\n").unwrap();

        let err = highlight_file(&file_path, &plain_options()).unwrap_err();
        assert_matches!(err, PipelineError::UnknownExtension { .. });
        assert_eq!(err.error_code().as_str(), "E021");
    }

    #[test]
    fn unknown_language_name_fails() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("main.gleam");
        fs::write(&file_path, "let x = 1\n").unwrap();

        let options = HighlightOptions {
            language: Some("zig".to_string()),
            ..plain_options()
        };
        let err = highlight_file(&file_path, &options).unwrap_err();
        assert_matches!(err, PipelineError::UnknownLanguage { .. });
        assert_eq!(err.error_code().as_str(), "E020");
    }

    #[test]
    fn missing_file_surfaces_the_loader_error() {
        let err = highlight_file(Path::new("no/such.gleam"), &plain_options()).unwrap_err();
        assert_matches!(err, PipelineError::File(_));
        assert_eq!(err.error_code().as_str(), "E005");
    }

    #[test]
    fn empty_file_highlights_to_empty_output() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.odin");
        fs::write(&file_path, "").unwrap();

        let output = highlight_file(&file_path, &plain_options()).unwrap();
        assert_eq!(output.rendered, "");
        assert_eq!(output.token_count(), 0);
    }

    #[test]
    fn token_dump_is_json_when_requested() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("main.gleam");
        fs::write(&file_path, "let x = 42\n").unwrap();

        let options = HighlightOptions {
            emit_tokens: true,
            ..plain_options()
        };
        let output = highlight_file(&file_path, &options).unwrap();
        let dump = output.tokens_json.as_ref().expect("token dump requested");
        let parsed: serde_json::Value = serde_json::from_str(&dump).expect("dump is valid JSON");
        let entries = parsed.as_array().expect("dump is a JSON array");
        assert_eq!(entries.len(), output.token_count());
        assert_eq!(entries[0]["category"], "keyword");
        assert_eq!(entries[0]["text"], "let");
    }

    #[test]
    fn unterminated_comment_is_a_warning_not_an_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("open.gleam");
        fs::write(&file_path, "let x = 1 /* never closed").unwrap();

        let output = highlight_file(&file_path, &plain_options()).unwrap();
        let span = output.unterminated_comment.expect("opener span recorded");
        assert_eq!(span.start.offset, 10);
        assert!(output.has_warnings());
    }

    #[test]
    fn theme_file_drives_the_rendering() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("main.gleam");
        fs::write(&file_path, "let x = 1\n").unwrap();

        let theme_path = dir.path().join("loud.toml");
        fs::write(
            &theme_path,
            "name = \"loud\"\n\n[styles]\nkeyword = { fg = 201 }\n",
        )
        .unwrap();

        let options = HighlightOptions {
            theme: ThemeSelection::File(theme_path),
            use_color: true,
            ..plain_options()
        };
        let output = highlight_file(&file_path, &options).unwrap();
        assert_eq!(output.theme, "loud");
        assert!(output.rendered.contains("\x1b[38;5;201mlet\x1b[0m"));
    }
}
