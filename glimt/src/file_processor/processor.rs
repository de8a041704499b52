//! Source file loading and validation.
//!
//! Loading is staged: path checks, metadata collection, size check,
//! then content reading. Every failure maps onto a registry code, and
//! the size limit is enforced before any bytes are read. An empty file
//! is valid input and loads as an empty source string.

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// Errors raised while loading a source file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("not a regular file: {path}")]
    NotAFile { path: String },

    #[error("file too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("file is not valid UTF-8: {path}")]
    InvalidEncoding { path: String },

    #[error("i/o error reading {path}: {message}")]
    Io { path: String, message: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::NotAFile { .. } => codes::file_processing::NOT_A_FILE,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::Io { .. } => codes::file_processing::IO_ERROR,
        }
    }

    /// Whether this error stops the pipeline, per the code registry
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

/// Metadata collected while loading a file.
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    /// Size in bytes, from the filesystem
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    /// Line count of the decoded source
    pub line_count: usize,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// A loaded source file with its metadata.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Decoded UTF-8 contents
    pub source: String,
    pub metadata: FileMetadata,
    pub load_duration: Duration,
}

impl LoadedFile {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Load a source file, validating it along the way
pub fn load_file(file_path: &Path) -> Result<LoadedFile, FileProcessorError> {
    let start_time = Instant::now();
    let shown = file_path.display().to_string();

    log_debug!("Loading source file", "file" => shown.as_str());

    validate_path(file_path, &shown)?;
    let mut metadata = collect_metadata(file_path, &shown)?;
    check_size(&metadata, &shown)?;
    let source = read_source(file_path, &shown)?;

    metadata.line_count = source.lines().count();
    let load_duration = start_time.elapsed();

    let loaded = LoadedFile {
        source,
        metadata,
        load_duration,
    };

    if loaded.is_empty() {
        log_debug!("File is empty", "file" => shown.as_str());
    }

    let size_str = loaded.metadata.size.to_string();
    let human_size = loaded.metadata.human_readable_size();
    let lines_str = loaded.metadata.line_count.to_string();
    let chars_str = loaded.char_count().to_string();
    let duration_str = format!("{:.2}", loaded.load_duration.as_secs_f64() * 1000.0);
    let is_large_str = loaded.metadata.is_large_file().to_string();
    log_success!(
        codes::success::FILE_PROCESSING_SUCCESS,
        "File loaded",
        "file" => shown.as_str(),
        "size_bytes" => size_str.as_str(),
        "size_human" => human_size.as_str(),
        "lines" => lines_str.as_str(),
        "chars" => chars_str.as_str(),
        "duration_ms" => duration_str.as_str(),
        "is_large_file" => is_large_str.as_str()
    );

    Ok(loaded)
}

fn validate_path(path: &Path, shown: &str) -> Result<(), FileProcessorError> {
    if !path.exists() {
        let error = FileProcessorError::FileNotFound {
            path: shown.to_string(),
        };
        log_error!(error.error_code(), "File not found", "path" => shown);
        return Err(error);
    }

    if !path.is_file() {
        let error = FileProcessorError::NotAFile {
            path: shown.to_string(),
        };
        log_error!(error.error_code(), "Path is not a regular file", "path" => shown);
        return Err(error);
    }

    Ok(())
}

fn collect_metadata(path: &Path, shown: &str) -> Result<FileMetadata, FileProcessorError> {
    let metadata = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: shown.to_string(),
                },
                _ => FileProcessorError::Io {
                    path: shown.to_string(),
                    message: e.to_string(),
                },
            };
            let io_error_str = e.to_string();
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => shown,
                "io_error" => io_error_str.as_str());
            return Err(error);
        }
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    let file_metadata = FileMetadata {
        path: path.to_path_buf(),
        size: metadata.len(),
        extension,
        line_count: 0,
        modified: metadata.modified().ok(),
    };

    let size_str = file_metadata.size.to_string();
    let ext_str = file_metadata.extension.as_deref().unwrap_or("none");
    let is_large_str = file_metadata.is_large_file().to_string();
    log_debug!("File metadata collected",
        "size_bytes" => size_str.as_str(),
        "extension" => ext_str,
        "is_large_file" => is_large_str.as_str());

    Ok(file_metadata)
}

fn check_size(metadata: &FileMetadata, shown: &str) -> Result<(), FileProcessorError> {
    if metadata.size > MAX_FILE_SIZE {
        let error = FileProcessorError::FileTooLarge {
            size: metadata.size,
            limit: MAX_FILE_SIZE,
        };
        let size_str = metadata.size.to_string();
        let human_size = metadata.human_readable_size();
        let limit_str = MAX_FILE_SIZE.to_string();
        log_error!(error.error_code(), "File exceeds the maximum size limit",
            "file" => shown,
            "size_bytes" => size_str.as_str(),
            "size_human" => human_size.as_str(),
            "limit_bytes" => limit_str.as_str());
        return Err(error);
    }

    Ok(())
}

fn read_source(path: &Path, shown: &str) -> Result<String, FileProcessorError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) => {
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: shown.to_string(),
                },
                std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                    path: shown.to_string(),
                },
                _ => FileProcessorError::Io {
                    path: shown.to_string(),
                    message: e.to_string(),
                },
            };
            let io_error_str = e.to_string();
            log_error!(error.error_code(), "Failed to read file contents",
                "file" => shown,
                "io_error" => io_error_str.as_str());
            Err(error)
        }
    }
}
