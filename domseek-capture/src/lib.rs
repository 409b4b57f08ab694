//! Captured HTTP responses, reduced to what a page search needs.
//!
//! - [`CapturedResponse`]: the view of a response the parser reads
//! - [`parse_response`]: status/header triage into a [`ParsedResponse`]
//! - [`PageFetcher`]: reqwest-backed client producing [`RawResponse`]s
//!
//! Only HTML and JSON bodies are kept. Failed responses (status above 300)
//! keep status and headers; other content types are marked `ignore`.
//!
//! ```rust
//! # async fn demo() -> Result<(), domseek_capture::CaptureError> {
//! use domseek_capture::{PageFetcher, parse_response};
//!
//! let fetcher = PageFetcher::new(Default::default())?;
//! let raw = fetcher.fetch("https://example.com/").await?;
//! let parsed = parse_response(&raw).await;
//! if let Some(html) = parsed.html() {
//!     println!("{} bytes of html", html.len());
//! }
//! # Ok(()) }
//! ```

mod fetch;
mod parse;
mod response;

pub use fetch::{FetchOptions, PageFetcher};
pub use parse::{JsonBody, ParsedResponse, ResponseBody, parse_response};
pub use response::{CapturedResponse, RawResponse};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("body read failed: {0}")]
    Body(String),
}
