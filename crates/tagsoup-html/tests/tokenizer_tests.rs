//! Tests for the tokenizer and the element classifier.

use std::io::Cursor;

use tagsoup_html::element::{attributes_to_map, split_attribute};
use tagsoup_html::{Element, RawToken, Tokenizer, classify};

/// Helper to tokenize a string into lossy text tokens
fn tokenize(html: &str) -> Vec<String> {
    Tokenizer::new(html.as_bytes())
        .map(|token| token.to_string())
        .collect()
}

/// Helper to classify a single literal token
fn classify_str(raw: &str) -> Element {
    classify(RawToken::new(raw.as_bytes().to_vec()))
}

fn attrs(list: &[&str]) -> Vec<Vec<u8>> {
    list.iter().map(|a| a.as_bytes().to_vec()).collect()
}

// ========== Tokenizer ==========

#[test]
fn test_tags_and_text() {
    assert_eq!(
        tokenize(r#"<div class="a">hi</div>"#),
        [r#"<div class="a">"#, "hi", "</div>"]
    );
}

#[test]
fn test_whitespace_is_collapsed_and_text_trimmed() {
    assert_eq!(tokenize("<p>\n  a\t\tb \r\n</p>"), ["<p>", "a b", "</p>"]);
}

#[test]
fn test_whitespace_only_text_is_dropped() {
    assert_eq!(
        tokenize("<ul>\n\t<li>x</li>\n</ul>"),
        ["<ul>", "<li>", "x", "</li>", "</ul>"]
    );
}

#[test]
fn test_trailing_text_is_not_emitted() {
    assert_eq!(tokenize("<p>a</p>tail"), ["<p>", "a", "</p>"]);
}

#[test]
fn test_unterminated_tag_is_not_emitted() {
    assert_eq!(tokenize("<p>a<b"), ["<p>", "a"]);
}

#[test]
fn test_lone_closing_bracket_is_its_own_token() {
    let tokens = tokenize("<p>a > b</p>");
    assert_eq!(tokens, ["<p>", ">", "a  b", "</p>"]);
    assert_eq!(classify_str(">"), Element::Content(b">".to_vec()));
}

#[test]
fn test_from_reader() {
    let tokenizer = Tokenizer::from_reader(Cursor::new(b"<a>x</a>".to_vec())).unwrap();
    let tokens: Vec<String> = tokenizer.map(|t| t.to_string()).collect();
    assert_eq!(tokens, ["<a>", "x", "</a>"]);
}

#[test]
fn test_into_tokens_matches_iteration() {
    let html = b"<div><br/>text</div>";
    assert_eq!(
        Tokenizer::new(html).into_tokens(),
        Tokenizer::new(html).collect::<Vec<_>>()
    );
}

// ========== Classifier ==========

#[test]
fn test_text_is_content() {
    assert_eq!(classify_str("hello"), Element::Content(b"hello".to_vec()));
}

#[test]
fn test_comment() {
    assert_eq!(
        classify_str("<!-- note -->"),
        Element::Comment(b"-- note --".to_vec())
    );
    assert_eq!(
        classify_str("<!DOCTYPE html>"),
        Element::Comment(b"DOCTYPE html".to_vec())
    );
}

#[test]
fn test_void_tags() {
    assert_eq!(
        classify_str("<br>"),
        Element::Void {
            name: b"br".to_vec(),
            attributes: Vec::new(),
        }
    );
    assert_eq!(
        classify_str(r#"<img src="a.png" />"#),
        Element::Void {
            name: b"img".to_vec(),
            attributes: attrs(&[r#"src="a.png""#]),
        }
    );
    assert!(matches!(classify_str("<META charset=utf-8>"), Element::Void { .. }));
}

#[test]
fn test_void_check_runs_before_end_check() {
    assert_eq!(
        classify_str("</br>"),
        Element::Void {
            name: b"br".to_vec(),
            attributes: Vec::new(),
        }
    );
}

#[test]
fn test_void_names_are_case_sensitive() {
    assert_eq!(classify_str("<Br>"), Element::start("Br"));
}

#[test]
fn test_end_tags() {
    assert_eq!(classify_str("</div>"), Element::end("div"));
    assert_eq!(classify_str("</div >"), Element::end("div"));
    assert_eq!(classify_str("</div class>"), Element::end("div"));
}

#[test]
fn test_start_tag_attributes() {
    assert_eq!(
        classify_str(r#"<div class="a b" id=x  hidden>"#),
        Element::Start {
            name: b"div".to_vec(),
            attributes: attrs(&[r#"class="a b""#, "id=x", "hidden"]),
        }
    );
}

#[test]
fn test_self_closing_start_tag_drops_slash() {
    assert_eq!(classify_str("<span/>"), Element::start("span"));
    assert_eq!(classify_str("<span />"), Element::start("span"));
    assert_eq!(
        classify_str(r#"<a href="/x/" />"#),
        Element::Start {
            name: b"a".to_vec(),
            attributes: attrs(&[r#"href="/x/""#]),
        }
    );
}

#[test]
fn test_nameless_tags_are_content() {
    assert_eq!(classify_str("<>"), Element::Content(b"<>".to_vec()));
    assert_eq!(classify_str("</>"), Element::Content(b"</>".to_vec()));
}

#[test]
fn test_element_accessors() {
    let element = classify_str(r#"<a href="/x">"#);
    assert_eq!(element.name(), Some(&b"a"[..]));
    assert_eq!(element.attributes(), attrs(&[r#"href="/x""#]).as_slice());
    assert_eq!(Element::Content(b"x".to_vec()).name(), None);
    assert!(Element::end("a").attributes().is_empty());
}

// ========== Attribute splitting ==========

#[test]
fn test_split_attribute() {
    assert_eq!(
        split_attribute(br#"href="/x?a=b""#),
        ("href".to_string(), "/x?a=b".to_string())
    );
    assert_eq!(
        split_attribute(b"data-id=7"),
        ("data-id".to_string(), "7".to_string())
    );
    assert_eq!(
        split_attribute(b"checked"),
        ("checked".to_string(), "true".to_string())
    );
}

#[test]
fn test_attribute_map_last_duplicate_wins() {
    let map = attributes_to_map(&attrs(&["id=a", "class=b", "id=c"]));
    assert_eq!(map.len(), 2);
    assert_eq!(map["id"], "c");
    assert_eq!(map["class"], "b");
}
