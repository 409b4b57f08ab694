//! Walks the pruned tree and emits one selector per matched leaf.

use serde::{Deserialize, Serialize};

use crate::matcher::{ElementDescriptor, ElementStep, MatchOutcome};
use crate::selector::{create_selector, PathStep};

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundPath {
    pub selector: String,
    pub text: String,
}

fn path_step(step: &ElementStep, nth_child: usize) -> PathStep {
    PathStep {
        tag: step.tag.clone(),
        id: step.id.clone(),
        class: step.class.clone(),
        nth_child,
    }
}

/// Collect hits below `descriptor`, which sits at filtered index
/// `nth_child` under `current_path`. Misses yield nothing.
pub fn find_paths(
    current_path: &[PathStep],
    nth_child: usize,
    descriptor: &ElementDescriptor,
) -> Vec<FoundPath> {
    match &descriptor.outcome {
        MatchOutcome::Miss => Vec::new(),
        MatchOutcome::Leaf(text) => vec![FoundPath {
            selector: create_selector(current_path, &path_step(&descriptor.step, nth_child)),
            text: text.clone(),
        }],
        MatchOutcome::Branch(children) => {
            let mut path = current_path.to_vec();
            path.push(path_step(&descriptor.step, nth_child));
            collect_level(&path, children)
        }
    }
}

/// Entry point for the top-level results: drops misses, indexes the
/// survivors and concatenates their hits in document order.
pub fn collect_matches(descriptors: &[ElementDescriptor]) -> Vec<FoundPath> {
    collect_level(&[], descriptors)
}

fn collect_level(path: &[PathStep], siblings: &[ElementDescriptor]) -> Vec<FoundPath> {
    siblings
        .iter()
        .filter(|d| d.is_match())
        .enumerate()
        .flat_map(|(index, child)| find_paths(path, index, child))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, id: Option<&str>, outcome: MatchOutcome) -> ElementDescriptor {
        ElementDescriptor {
            step: ElementStep {
                tag: tag.into(),
                id: id.map(Into::into),
                class: None,
            },
            outcome,
        }
    }

    fn leaf(tag: &str, text: &str) -> ElementDescriptor {
        el(tag, None, MatchOutcome::Leaf(text.into()))
    }

    fn miss(tag: &str) -> ElementDescriptor {
        el(tag, None, MatchOutcome::Miss)
    }

    #[test]
    fn indices_are_dense_among_matches() {
        let tree = vec![el(
            "ul",
            None,
            MatchOutcome::Branch(vec![miss("li"), leaf("li", "a"), miss("li"), leaf("li", "b")]),
        )];
        let got = collect_matches(&tree);
        assert_eq!(
            got,
            vec![
                FoundPath {
                    selector: "ul > li".into(),
                    text: "a".into()
                },
                FoundPath {
                    selector: "ul > li:nth-child(2)".into(),
                    text: "b".into()
                },
            ]
        );
    }

    #[test]
    fn top_level_misses_do_not_shift_indices() {
        let tree = vec![miss("header"), leaf("p", "x"), miss("footer"), leaf("p", "y")];
        let selectors: Vec<_> = collect_matches(&tree).into_iter().map(|f| f.selector).collect();
        assert_eq!(selectors, vec!["p", "p:nth-child(2)"]);
    }

    #[test]
    fn nested_branches_keep_depth_first_order() {
        let tree = vec![el(
            "main",
            Some("app"),
            MatchOutcome::Branch(vec![
                el("section", None, MatchOutcome::Branch(vec![leaf("h1", "one"), leaf("p", "two")])),
                leaf("aside", "three"),
            ]),
        )];
        let got = collect_matches(&tree);
        let pairs: Vec<_> = got.iter().map(|f| (f.selector.as_str(), f.text.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("#app > section > h1", "one"),
                ("#app > section > p:nth-child(2)", "two"),
                ("#app > aside:nth-child(2)", "three"),
            ]
        );
    }

    #[test]
    fn miss_descriptor_yields_nothing() {
        assert!(find_paths(&[], 0, &miss("div")).is_empty());
    }
}
