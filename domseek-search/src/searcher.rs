use scraper::Html;
use serde_json::Value;

use crate::collect::{collect_matches, FoundPath};
use crate::dom::{parse, search_root};
use crate::error::{Result, SearchError};
use crate::matcher::search_element;
use crate::normalize::{Normalizer, TextNormalizer};
use crate::query::SearchQuery;

/// Holds a parsed document and answers text queries against it.
///
/// ```
/// use domseek_search::DomSearcher;
/// use serde_json::json;
///
/// let searcher = DomSearcher::from_html("<body><div><p>Hello world</p><p>Goodbye</p></div></body>");
/// let found = searcher.find(&json!({ "a": "hello" })).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].selector, "div > p");
/// assert_eq!(found[0].text, "Hello world");
/// ```
pub struct DomSearcher {
    document: Html,
    normalizer: Box<dyn Normalizer>,
}

impl DomSearcher {
    pub fn builder() -> DomSearcherBuilder {
        DomSearcherBuilder::default()
    }

    pub fn from_html(html: &str) -> Self {
        Self::from_document(parse(html))
    }

    pub fn from_document(document: Html) -> Self {
        Self {
            document,
            normalizer: Box::new(TextNormalizer::default()),
        }
    }

    /// Swap in a new document. Selectors from earlier calls refer to the
    /// old one.
    pub fn set_html(&mut self, html: &str) {
        self.document = parse(html);
    }

    /// Validate an untyped query and search for it.
    pub fn find(&self, query: &Value) -> Result<Vec<FoundPath>> {
        let query = SearchQuery::from_value(query)?;
        Ok(self.find_query(&query))
    }

    /// Search with an already validated query. No match is an empty list.
    pub fn find_query(&self, query: &SearchQuery) -> Vec<FoundPath> {
        let terms = query.normalize(self.normalizer.as_ref());
        tracing::debug!(terms = terms.as_slice().len(), "search.find.start");

        let descriptors: Vec<_> = search_root(&self.document)
            .iter()
            .map(|el| search_element(el, &terms, self.normalizer.as_ref()))
            .collect();
        let found = collect_matches(&descriptors);

        tracing::debug!(
            roots = descriptors.len(),
            matches = found.len(),
            "search.find.done"
        );
        found
    }
}

/// Collects the document source and options for a [`DomSearcher`].
#[derive(Default)]
pub struct DomSearcherBuilder {
    document: Option<Html>,
    html: Option<String>,
    normalizer: Option<Box<dyn Normalizer>>,
}

impl DomSearcherBuilder {
    /// Use an already parsed document. Takes precedence over [`Self::html`].
    pub fn document(mut self, document: Html) -> Self {
        self.document = Some(document);
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn normalizer(mut self, normalizer: impl Normalizer + 'static) -> Self {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    pub fn build(self) -> Result<DomSearcher> {
        let document = match (self.document, self.html) {
            (Some(doc), _) => doc,
            (None, Some(html)) => parse(&html),
            (None, None) => return Err(SearchError::Construction),
        };
        Ok(DomSearcher {
            document,
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Box::new(TextNormalizer::default())),
        })
    }
}
