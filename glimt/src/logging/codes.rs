//! Consolidated error codes and classification system
//!
//! Single source of truth for all error, warning, and success codes and
//! their metadata. Every error type in the crate maps into this registry
//! through its `error_code()` method.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning, and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const NOT_A_FILE: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E008");
    pub const INVALID_ENCODING: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E010");
}

/// Grammar selection error codes
pub mod grammar {
    use super::Code;

    pub const UNKNOWN_LANGUAGE: Code = Code::new("E020");
    pub const UNKNOWN_EXTENSION: Code = Code::new("E021");
}

/// Tokenization warning codes (tokenization itself never fails)
pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_BLOCK_COMMENT: Code = Code::new("W030");
    pub const UNMATCHED_INPUT: Code = Code::new("W031");
}

/// Rendering and theme error codes
pub mod render {
    use super::Code;

    pub const UNKNOWN_THEME: Code = Code::new("E040");
    pub const THEME_FILE_UNREADABLE: Code = Code::new("E041");
    pub const INVALID_THEME_FILE: Code = Code::new("E042");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing success codes
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    // Tokenization success codes
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    // Rendering success codes
    pub const RENDER_COMPLETE: Code = Code::new("I030");
    pub const HIGHLIGHT_COMPLETE: Code = Code::new("I031");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the command that triggered it",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check environment configuration",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Path exists but is not a regular file",
                "Pass a source file, not a directory or device",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Reduce file size or raise the processing limit",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid UTF-8 encoding in file",
                "Convert file to UTF-8 before highlighting",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error while reading file",
                "Check storage health and retry",
            ),
        );

        // Grammar selection errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "No grammar registered under the requested name",
                "Use a registered language name or alias",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Grammar",
                Severity::Medium,
                false,
                true,
                "No grammar registered for the file extension",
                "Select the language explicitly with --language",
            ),
        );

        // Tokenization warnings
        registry.insert(
            "W030",
            ErrorMetadata::new(
                "W030",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Block comment still open at end of input",
                "Close the comment with */",
            ),
        );
        registry.insert(
            "W031",
            ErrorMetadata::new(
                "W031",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Input matched no rule and was emitted as a fallback token",
                "Check the source for stray characters",
            ),
        );

        // Rendering and theme errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Render",
                Severity::Medium,
                false,
                true,
                "No built-in theme with the requested name",
                "Use a built-in theme name or --theme-file",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Render",
                Severity::Medium,
                false,
                true,
                "Theme file could not be read",
                "Check the theme file path and permissions",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Render",
                Severity::Medium,
                false,
                true,
                "Theme file is not valid theme TOML",
                "Fix the theme file syntax",
            ),
        );

        // Success codes
        registry.insert(
            "I001",
            ErrorMetadata::new(
                "I001",
                "General",
                Severity::Low,
                true,
                false,
                "Operation completed successfully",
                "None",
            ),
        );
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "None",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File read and validated",
                "Continue to tokenization",
            ),
        );
        registry.insert(
            "I020",
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Tokenization completed with full input coverage",
                "Continue to rendering",
            ),
        );
        registry.insert(
            "I030",
            ErrorMetadata::new(
                "I030",
                "Render",
                Severity::Low,
                true,
                false,
                "Token sequence rendered",
                "None",
            ),
        );
        registry.insert(
            "I031",
            ErrorMetadata::new(
                "I031",
                "Render",
                Severity::Low,
                true,
                false,
                "Highlighting pipeline completed",
                "None",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_constant_has_registry_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::NOT_A_FILE,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            grammar::UNKNOWN_LANGUAGE,
            grammar::UNKNOWN_EXTENSION,
            lexical::UNTERMINATED_BLOCK_COMMENT,
            lexical::UNMATCHED_INPUT,
            render::UNKNOWN_THEME,
            render::THEME_FILE_UNREADABLE,
            render::INVALID_THEME_FILE,
            success::OPERATION_COMPLETED_SUCCESSFULLY,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::FILE_PROCESSING_SUCCESS,
            success::TOKENIZATION_COMPLETE,
            success::RENDER_COMPLETE,
            success::HIGHLIGHT_COMPLETE,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn warnings_are_recoverable_and_never_halt() {
        assert!(is_recoverable("W030"));
        assert!(!requires_halt("W030"));
        assert!(is_recoverable("W031"));
        assert!(!requires_halt("W031"));
    }

    #[test]
    fn file_errors_halt_the_pipeline() {
        assert!(requires_halt("E005"));
        assert!(!is_recoverable("E005"));
        assert_eq!(get_category("E005"), "FileProcessing");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
    }

    #[test]
    fn unknown_codes_get_conservative_defaults() {
        assert_eq!(get_severity("EZZZ"), Severity::Medium);
        assert!(is_recoverable("EZZZ"));
        assert!(!requires_halt("EZZZ"));
        assert_eq!(get_description("EZZZ"), "Unknown error");
    }
}
