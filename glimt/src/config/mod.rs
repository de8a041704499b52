//! Configuration module for glimt
//!
//! Compile-time limits live in [`constants`]; user-facing preferences with
//! environment variable overrides live in [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::RuntimeConfig;
