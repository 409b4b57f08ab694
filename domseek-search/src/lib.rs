//! Text-to-selector search over parsed HTML.
//!
//! Given a document and a set of labelled search terms, [`DomSearcher`]
//! finds every element whose text contains any term and returns a short CSS
//! selector for it, in document order.
//!
//! - [`dom`]: node view over `scraper` documents
//! - [`normalize`]: term/text canonicalisation
//! - [`matcher`]: prunes the tree to matching branches
//! - [`selector`]: id-anchored child-combinator selectors
//! - [`collect`]: walks the pruned tree into [`FoundPath`] records

pub mod collect;
pub mod dom;
mod error;
pub mod matcher;
pub mod normalize;
pub mod query;
mod searcher;
pub mod selector;

pub use collect::FoundPath;
pub use error::{Result, SearchError};
pub use normalize::{NormalizeOptions, Normalizer, TextNormalizer};
pub use query::SearchQuery;
pub use searcher::{DomSearcher, DomSearcherBuilder};
