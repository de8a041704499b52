pub mod compile_time {
    pub mod file_processing {
        /// Maximum file size accepted for highlighting (10MB)
        /// Files above this are rejected before any content is read
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a file "large" (1MB)
        /// Large files are flagged in metadata and processing logs
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;
    }

    pub mod lexical {
        /// Column width of a tab stop for position reporting
        pub const TAB_WIDTH: u32 = 4;
    }

    pub mod rendering {
        /// Theme used when neither flag nor environment selects one
        pub const DEFAULT_THEME: &str = "github";

        /// Maximum size accepted for an external theme file (64KB)
        pub const MAX_THEME_FILE_SIZE: u64 = 64 * 1024;
    }

    pub mod logging {
        /// Maximum events retained by the in-memory logger
        /// Oldest events are dropped once the buffer is full
        pub const MAX_MEMORY_EVENTS: usize = 10_000;
    }
}
