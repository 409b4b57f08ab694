use thiserror::Error;

/// Failures surfaced by the search facade.
///
/// Both variants are contract violations by the caller; traversal itself
/// never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Neither a parsed document nor raw HTML was supplied.
    #[error("searcher requires a parsed document or HTML source")]
    Construction,

    /// The query was missing, not an object, or had no usable terms.
    #[error("invalid search query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
