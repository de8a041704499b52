//! Source file loading with size limits and registry-coded errors.

mod processor;

pub use processor::{load_file, FileMetadata, FileProcessorError, LoadedFile};
