//! Shared pieces for the domseek crates.
//!
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`DomseekError`] and [`Result`]: error type for whole-run orchestration
//!
//! The search and capture libraries keep their own narrow error enums; this
//! type is what the binary reports per job.

pub mod observability;

/// Errors raised while running a configured search job.
#[derive(thiserror::Error, Debug)]
pub enum DomseekError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTML for a job could not be obtained.
    #[error("Source error: {0}")]
    Source(String),

    /// The search itself rejected its input.
    #[error("Search error: {0}")]
    Search(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient alias for results that use [`DomseekError`].
pub type Result<T> = std::result::Result<T, DomseekError>;
