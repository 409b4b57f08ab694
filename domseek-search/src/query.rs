//! Search queries: labelled raw terms and their normalized form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SearchError};
use crate::normalize::Normalizer;

/// Label -> raw search string. Labels are only carried along; matching
/// uses the values with OR semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery {
    terms: BTreeMap<String, String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, label: impl Into<String>, term: impl Into<String>) -> Self {
        self.terms.insert(label.into(), term.into());
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, term: impl Into<String>) {
        self.terms.insert(label.into(), term.into());
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.terms.values().map(String::as_str)
    }

    /// Validate an untyped query.
    ///
    /// Only non-empty JSON objects are accepted. String members are taken verbatim,
    /// numbers and booleans by their JSON text; `null`, arrays and nested
    /// objects are rejected.
    ///
    /// ```
    /// use domseek_search::SearchQuery;
    /// use serde_json::json;
    ///
    /// let q = SearchQuery::from_value(&json!({ "title": "Hello", "year": 2024 })).unwrap();
    /// assert_eq!(q.len(), 2);
    /// assert!(SearchQuery::from_value(&json!("Hello")).is_err());
    /// assert!(SearchQuery::from_value(&json!(["Hello"])).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = match value {
            Value::Object(map) => map,
            Value::Null => return Err(SearchError::InvalidQuery("query is missing".into())),
            Value::Array(_) => {
                return Err(SearchError::InvalidQuery(
                    "expected an object of labelled terms, got an array".into(),
                ));
            }
            other => {
                return Err(SearchError::InvalidQuery(format!(
                    "expected an object of labelled terms, got {other}"
                )));
            }
        };
        if object.is_empty() {
            return Err(SearchError::InvalidQuery("query has no terms".into()));
        }

        let mut query = Self::new();
        for (label, term) in object {
            let term = match term {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(SearchError::InvalidQuery(format!(
                        "term `{label}` must be a string"
                    )));
                }
            };
            query.insert(label.clone(), term);
        }
        Ok(query)
    }

    /// Normalize every term. A term that normalizes to `""` is kept and
    /// matches any text.
    pub fn normalize<N: Normalizer + ?Sized>(&self, normalizer: &N) -> NormalizedTerms {
        NormalizedTerms {
            terms: self.values().map(|t| normalizer.normalize(t)).collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SearchQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Normalized terms, matched with OR semantics. No terms match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTerms {
    terms: Vec<String>,
}

impl NormalizedTerms {
    /// True when any term occurs in `normalized_text`.
    pub fn matches(&self, normalized_text: &str) -> bool {
        self.terms.iter().any(|t| normalized_text.contains(t.as_str()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }
}
