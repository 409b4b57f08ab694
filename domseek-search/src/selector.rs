//! Turns an ancestor chain into a short CSS selector.

use std::fmt::Write as _;

/// One element of an ancestor chain.
///
/// `nth_child` is the 0-based index among the *matching* siblings at that
/// level, not the raw DOM position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub tag: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub nth_child: usize,
}

impl PathStep {
    fn render(&self) -> String {
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            return format!("#{id}");
        }
        let mut out = self.tag.clone();
        if let Some(class) = self.class.as_deref() {
            for token in class.split_whitespace() {
                out.push('.');
                out.push_str(token);
            }
        }
        if self.nth_child > 0 {
            let _ = write!(out, ":nth-child({})", self.nth_child + 1);
        }
        out
    }

    fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// Render `ancestors + [leaf]` as a child-combinator selector, anchored at
/// the deepest step carrying an id.
///
/// ```
/// use domseek_search::selector::{create_selector, PathStep};
///
/// let step = |tag: &str, id: Option<&str>, nth| PathStep {
///     tag: tag.into(),
///     id: id.map(Into::into),
///     class: None,
///     nth_child: nth,
/// };
/// let sel = create_selector(
///     &[step("main", None, 0), step("section", Some("news"), 1)],
///     &step("p", None, 2),
/// );
/// assert_eq!(sel, "#news > p:nth-child(3)");
/// ```
pub fn create_selector(ancestors: &[PathStep], leaf: &PathStep) -> String {
    let chain: Vec<&PathStep> = ancestors.iter().chain(std::iter::once(leaf)).collect();
    let anchor = chain.iter().rposition(|step| step.has_id()).unwrap_or(0);

    chain[anchor..]
        .iter()
        .map(|step| step.render())
        .collect::<Vec<_>>()
        .join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(tag: &str, id: Option<&str>, class: Option<&str>, nth_child: usize) -> PathStep {
        PathStep {
            tag: tag.into(),
            id: id.map(Into::into),
            class: class.map(Into::into),
            nth_child,
        }
    }

    #[test]
    fn plain_chain_joins_with_child_combinator() {
        let sel = create_selector(&[step("div", None, None, 0)], &step("p", None, None, 0));
        assert_eq!(sel, "div > p");
    }

    #[test]
    fn id_replaces_tag_class_and_index() {
        let sel = create_selector(&[], &step("a", Some("go"), Some("btn"), 4));
        assert_eq!(sel, "#go");
    }

    #[test]
    fn deepest_id_wins() {
        let sel = create_selector(
            &[
                step("div", Some("outer"), None, 0),
                step("ul", Some("inner"), None, 0),
                step("li", None, None, 0),
            ],
            &step("span", None, None, 1),
        );
        assert_eq!(sel, "#inner > li > span:nth-child(2)");
    }

    #[test]
    fn classes_are_dot_joined_and_whitespace_tolerant() {
        let sel = create_selector(&[], &step("p", None, Some(" lead  big "), 0));
        assert_eq!(sel, "p.lead.big");
    }

    #[test]
    fn index_zero_is_suppressed_and_positive_index_is_one_based() {
        assert_eq!(create_selector(&[], &step("li", None, None, 0)), "li");
        assert_eq!(create_selector(&[], &step("li", None, None, 1)), "li:nth-child(2)");
        assert_eq!(
            create_selector(&[], &step("li", None, Some("x"), 9)),
            "li.x:nth-child(10)"
        );
    }

    #[test]
    fn empty_id_does_not_anchor() {
        let sel = create_selector(&[step("div", Some(""), None, 0)], &step("p", None, None, 0));
        assert_eq!(sel, "div > p");
    }
}
