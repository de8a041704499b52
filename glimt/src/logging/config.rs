//! Runtime configuration access for the logging subsystem.
//!
//! Preferences are installed once at startup and read from a process-wide
//! `OnceLock`. Before initialization every accessor falls back to the
//! environment-derived defaults, so early log calls still behave sensibly.

use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime logging preferences. Callable once per process.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Logging preferences already initialized".to_string())
}

/// Get the active preferences, falling back to defaults when uninitialized.
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Minimum level that should reach the installed logger.
pub fn get_min_log_level() -> LogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

/// Whether events should be emitted as JSON lines instead of plain text.
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Whether diagnostics should include a source excerpt with caret underline.
pub fn show_source_context() -> bool {
    get_runtime_preferences().show_source_context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_work_before_explicit_init() {
        // First access falls back to defaults; must not panic
        let _ = get_min_log_level();
        let _ = use_structured_logging();
        let _ = show_source_context();
    }

    #[test]
    fn default_level_filters_info_but_not_errors() {
        let min = get_min_log_level();
        assert!(LogLevel::Error <= min);
    }
}
