//! Read-only view over a parsed HTML tree.
//!
//! The matcher only needs four things from a node: its tag name, attribute
//! lookup, its element children and its aggregate text. [`DomNode`] captures
//! that surface so the walk stays independent of the parser; the
//! `scraper` implementation below is what the searcher uses in practice.

use scraper::{ElementRef, Html};

/// Minimal node interface consumed by the tree matcher.
pub trait DomNode: Sized {
    /// Lower-case tag name, e.g. `div`.
    fn tag_name(&self) -> &str;

    /// Raw attribute value, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Element children in document order (text and comment nodes skipped).
    fn element_children(&self) -> Vec<Self>;

    /// Concatenated text of every descendant text node.
    fn text(&self) -> String;

    /// `id` attribute, with an empty value treated as absent.
    fn id(&self) -> Option<&str> {
        self.attr("id").filter(|v| !v.is_empty())
    }

    /// `class` attribute, with an empty value treated as absent.
    fn class(&self) -> Option<&str> {
        self.attr("class").filter(|v| !v.trim().is_empty())
    }
}

impl DomNode for ElementRef<'_> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn element_children(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }
}

/// Parse a full HTML document.
pub fn parse(html: &str) -> Html {
    Html::parse_document(html)
}

/// Elements the search starts from: the children of the first `<body>`,
/// or the top-level elements of the document when there is no body.
pub fn search_root(document: &Html) -> Vec<ElementRef<'_>> {
    let body = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body");

    match body {
        Some(body) => body.element_children(),
        None => document.tree.root().children().filter_map(ElementRef::wrap).collect(),
    }
}
