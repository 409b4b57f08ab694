//! Prunes a document subtree down to the branches containing matches.

use crate::dom::DomNode;
use crate::normalize::Normalizer;
use crate::query::NormalizedTerms;

/// Identity of an element as it appears in a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementStep {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
}

impl ElementStep {
    fn of<N: DomNode>(node: &N) -> Self {
        Self {
            tag: node.tag_name().to_string(),
            id: node.id().map(str::to_string),
            class: node.class().map(str::to_string),
        }
    }
}

/// What the matcher decided for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Neither the element nor its descendants contain a term.
    Miss,
    /// The element is reported whole, with its raw (unnormalized) text.
    Leaf(String),
    /// At least one child matched; holds every child result, misses included.
    Branch(Vec<ElementDescriptor>),
}

/// One node of the pruned result tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    pub step: ElementStep,
    pub outcome: MatchOutcome,
}

impl ElementDescriptor {
    /// True for leaves and branches.
    pub fn is_match(&self) -> bool {
        !matches!(self.outcome, MatchOutcome::Miss)
    }
}

/// Classify `node` against `terms`.
///
/// Text containment is checked top-down on aggregate text. A matching
/// childless element is a leaf. A matching element with children descends;
/// if no child matches on its own, the element itself becomes the leaf.
pub fn search_element<N, Z>(node: &N, terms: &NormalizedTerms, normalizer: &Z) -> ElementDescriptor
where
    N: DomNode,
    Z: Normalizer + ?Sized,
{
    let step = ElementStep::of(node);
    let text = node.text();

    if !terms.matches(&normalizer.normalize(&text)) {
        return ElementDescriptor {
            step,
            outcome: MatchOutcome::Miss,
        };
    }

    let children: Vec<ElementDescriptor> = node
        .element_children()
        .iter()
        .map(|child| search_element(child, terms, normalizer))
        .collect();

    let outcome = if children.iter().any(ElementDescriptor::is_match) {
        MatchOutcome::Branch(children)
    } else {
        MatchOutcome::Leaf(text)
    };
    ElementDescriptor { step, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, search_root};
    use crate::normalize::TextNormalizer;
    use crate::query::SearchQuery;

    fn run(html: &str, term: &str) -> Vec<ElementDescriptor> {
        let doc = parse(html);
        let n = TextNormalizer::default();
        let terms = SearchQuery::new().with("t", term).normalize(&n);
        search_root(&doc)
            .iter()
            .map(|el| search_element(el, &terms, &n))
            .collect()
    }

    fn leaf(tag: &str, text: &str) -> ElementDescriptor {
        ElementDescriptor {
            step: ElementStep {
                tag: tag.into(),
                id: None,
                class: None,
            },
            outcome: MatchOutcome::Leaf(text.into()),
        }
    }

    #[test]
    fn miss_keeps_identity_only() {
        let got = run(r#"<body><div id="a" class="b c">nothing</div></body>"#, "zzz");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].step.id.as_deref(), Some("a"));
        assert_eq!(got[0].step.class.as_deref(), Some("b c"));
        assert_eq!(got[0].outcome, MatchOutcome::Miss);
    }

    #[test]
    fn childless_match_is_leaf_with_raw_text() {
        let got = run("<body><p>Hello   World</p></body>", "hello world");
        assert_eq!(got, vec![leaf("p", "Hello   World")]);
    }

    #[test]
    fn branch_keeps_unfiltered_children() {
        let got = run("<body><div><p>Hello</p><p>Bye</p></div></body>", "hello");
        match &got[0].outcome {
            MatchOutcome::Branch(children) => {
                assert_eq!(children.len(), 2);
                assert_eq!(children[0], leaf("p", "Hello"));
                assert_eq!(children[1].outcome, MatchOutcome::Miss);
            }
            other => panic!("expected branch, got {other:?}"),
        }
    }

    #[test]
    fn term_spanning_children_falls_back_to_parent() {
        let got = run("<body><div><b>foo</b><i>bar</i></div></body>", "foobar");
        assert_eq!(got, vec![leaf("div", "foobar")]);
    }

    #[test]
    fn direct_text_beside_child_does_not_descend_when_child_misses() {
        let got = run("<body><div>Price <span>10</span></div></body>", "price");
        assert_eq!(got, vec![leaf("div", "Price 10")]);
    }
}
