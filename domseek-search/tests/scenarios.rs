use domseek_search::{DomSearcher, FoundPath, SearchError, SearchQuery};
use scraper::{Html, Selector};
use serde_json::json;

fn found(selector: &str, text: &str) -> FoundPath {
    FoundPath {
        selector: selector.into(),
        text: text.into(),
    }
}

const GREETINGS: &str = "<body><div><p>Hello world</p><p>Goodbye</p></div></body>";

#[test]
fn single_paragraph_match() {
    let searcher = DomSearcher::from_html(GREETINGS);
    let got = searcher.find(&json!({ "a": "hello" })).unwrap();
    assert_eq!(got, vec![found("div > p", "Hello world")]);
}

#[test]
fn second_matching_sibling_gets_nth_child() {
    let searcher = DomSearcher::from_html(GREETINGS);
    let got = searcher.find(&json!({ "a": "o" })).unwrap();
    assert_eq!(
        got,
        vec![
            found("div > p", "Hello world"),
            found("div > p:nth-child(2)", "Goodbye"),
        ]
    );
}

#[test]
fn id_anchors_the_selector() {
    let searcher = DomSearcher::from_html(r#"<body><div id="x"><span>Target</span></div></body>"#);
    let got = searcher.find(&json!({ "a": "target" })).unwrap();
    assert_eq!(got, vec![found("#x > span", "Target")]);
}

#[test]
fn id_deep_in_the_tree_drops_everything_above() {
    let html = r#"<body><main class="page"><section><article id="post"><h2 class="title big">Rust news</h2></article></section></main></body>"#;
    let got = DomSearcher::from_html(html).find(&json!({ "a": "rust" })).unwrap();
    assert_eq!(got, vec![found("#post > h2.title.big", "Rust news")]);
}

#[test]
fn no_match_is_an_empty_list() {
    let searcher = DomSearcher::from_html(GREETINGS);
    assert!(searcher.find(&json!({ "a": "absent", "b": "missing" })).unwrap().is_empty());
}

#[test]
fn non_object_queries_are_rejected() {
    let searcher = DomSearcher::from_html(GREETINGS);
    for q in [json!(null), json!("text"), json!(["hello"])] {
        assert!(matches!(searcher.find(&q), Err(SearchError::InvalidQuery(_))));
    }
}

#[test]
fn matching_ignores_case_and_whitespace() {
    let searcher = DomSearcher::from_html("<body><p>Hello\n     World</p></body>");
    let got = searcher.find(&json!({ "a": "  HELLO world " })).unwrap();
    assert_eq!(got, vec![found("p", "Hello\n     World")]);
}

#[test]
fn any_term_matches() {
    let html = "<body><ul><li>apple</li><li>pear</li><li>plum</li></ul></body>";
    let query = SearchQuery::new().with("first", "apple").with("second", "plum");
    let got = DomSearcher::from_html(html).find_query(&query);
    assert_eq!(
        got,
        vec![found("ul > li", "apple"), found("ul > li:nth-child(2)", "plum")]
    );
}

#[test]
fn find_is_idempotent() {
    let searcher = DomSearcher::from_html(GREETINGS);
    let q = json!({ "a": "o" });
    assert_eq!(searcher.find(&q).unwrap(), searcher.find(&q).unwrap());
}

#[test]
fn missing_body_tag_is_implied_by_the_parser() {
    let searcher = DomSearcher::from_html("<p>loose text</p><p>more text</p>");
    let got = searcher.find(&json!({ "a": "text" })).unwrap();
    assert_eq!(
        got,
        vec![found("p", "loose text"), found("p:nth-child(2)", "more text")]
    );
}

#[test]
fn fragment_without_body_searches_from_the_root() {
    let fragment = Html::parse_fragment("<p>loose text</p><p>more text</p>");
    let searcher = DomSearcher::from_document(fragment);
    let got = searcher.find(&json!({ "a": "text" })).unwrap();
    assert_eq!(
        got,
        vec![
            found("html > p", "loose text"),
            found("html > p:nth-child(2)", "more text"),
        ]
    );
}

#[test]
fn selectors_resolve_to_their_elements_in_order() {
    let html = r#"<body>
        <nav><a>Home</a><a>News</a></nav>
        <div class="list"><span>news one</span><span>news two</span></div>
        <footer id="foot"><small>old news</small></footer>
    </body>"#;
    let doc = Html::parse_document(html);
    let got = DomSearcher::from_html(html).find(&json!({ "q": "news" })).unwrap();
    assert_eq!(got.len(), 4);

    for hit in &got {
        let selector = Selector::parse(&hit.selector).unwrap();
        let texts: Vec<String> = doc.select(&selector).map(|e| e.text().collect()).collect();
        assert!(
            texts.contains(&hit.text),
            "{} did not resolve to {:?}",
            hit.selector,
            hit.text
        );
    }

    let texts: Vec<_> = got.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(texts, vec!["News", "news one", "news two", "old news"]);
    assert_eq!(got[3].selector, "#foot > small");
}

#[test]
fn parent_reported_when_no_child_matches_alone() {
    let html = "<body><div><b>foo</b><i>bar</i></div></body>";
    let got = DomSearcher::from_html(html).find(&json!({ "a": "foobar" })).unwrap();
    assert_eq!(got, vec![found("div", "foobar")]);
}
