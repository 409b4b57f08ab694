//! Text canonicalisation shared by query terms and candidate text.

use serde::{Deserialize, Serialize};

/// Deterministic, idempotent string canonicaliser.
///
/// Implementations must satisfy `normalize(normalize(x)) == normalize(x)`;
/// the matcher applies the same instance to terms and element text.
pub trait Normalizer {
    fn normalize(&self, input: &str) -> String;
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String,
{
    fn normalize(&self, input: &str) -> String {
        self(input)
    }
}

/// Switches for [`TextNormalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Lower-case with Unicode case mapping.
    pub case_insensitive: bool,
    /// Collapse whitespace runs to one space and trim the ends.
    pub collapse_whitespace: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            collapse_whitespace: true,
        }
    }
}

/// Default normalizer: lower-casing plus whitespace folding.
///
/// ```
/// use domseek_search::normalize::{Normalizer, TextNormalizer};
///
/// let n = TextNormalizer::default();
/// assert_eq!(n.normalize("  Hello\n\tWORLD "), "hello world");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    options: NormalizeOptions,
}

impl TextNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }
}

impl Normalizer for TextNormalizer {
    fn normalize(&self, input: &str) -> String {
        let folded = if self.options.collapse_whitespace {
            input.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            input.to_string()
        };
        if self.options.case_insensitive {
            folded.to_lowercase()
        } else {
            folded
        }
    }
}
