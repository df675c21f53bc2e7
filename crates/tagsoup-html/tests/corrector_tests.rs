//! Tests for tag-balance correction.

use std::collections::HashMap;

use tagsoup_html::{Element, Repair, RepairKind, TagCorrector, Tokenizer, classify, correct};

/// Helper to tokenize and classify a document
fn elements(html: &str) -> Vec<Element> {
    Tokenizer::new(html.as_bytes()).map(classify).collect()
}

/// Helper to correct a document and render the result
fn corrected(html: &str) -> (String, Vec<Repair>) {
    let (output, repairs) = TagCorrector::new(elements(html)).run_with_repairs();
    (render(&output), repairs)
}

fn render(elements: &[Element]) -> String {
    elements.iter().map(ToString::to_string).collect()
}

fn kinds(repairs: &[Repair]) -> Vec<(RepairKind, &str)> {
    repairs.iter().map(|r| (r.kind, r.name.as_str())).collect()
}

/// Replays the sequence against a stack and checks that every end tag
/// closes the innermost open start tag and nothing is left open.
fn assert_balanced(elements: &[Element]) {
    let mut counts: HashMap<&[u8], isize> = HashMap::new();
    let mut stack: Vec<&[u8]> = Vec::new();
    for element in elements {
        match element {
            Element::Start { name, .. } => {
                *counts.entry(name).or_default() += 1;
                stack.push(name);
            }
            Element::End { name } => {
                *counts.entry(name).or_default() -= 1;
                assert_eq!(stack.pop(), Some(name.as_slice()), "end tag out of order");
            }
            _ => {}
        }
    }
    assert!(stack.is_empty(), "unclosed: {stack:?}");
    assert!(counts.values().all(|&c| c == 0));
}

#[test]
fn test_well_formed_input_is_unchanged() {
    let html = "<div><p>a<b>b</b></p><br><span>c</span></div>";
    let (output, repairs) = corrected(html);
    assert_eq!(output, "<div><p>a<b>b</b></p><br /><span>c</span></div>");
    assert!(repairs.is_empty());
}

#[test]
fn test_missing_closer_is_implied() {
    let (output, repairs) = corrected("<div><p>a</p><span>b</div>");
    assert_eq!(output, "<div><p>a</p><span>b</span></div>");
    assert_eq!(
        repairs,
        [Repair {
            kind: RepairKind::ImpliedEndTag,
            name: "span".to_string(),
            position: 6,
        }]
    );
}

#[test]
fn test_implied_closers_are_innermost_first() {
    let (output, repairs) = corrected("<ul><li>one<li>two</ul>");
    assert_eq!(output, "<ul><li>one<li>two</li></li></ul>");
    assert_eq!(
        kinds(&repairs),
        [(RepairKind::ImpliedEndTag, "li"), (RepairKind::ImpliedEndTag, "li")]
    );
}

#[test]
fn test_stray_end_tag_is_dropped() {
    let (output, repairs) = corrected("<div>x</b>y</div>");
    assert_eq!(output, "<div>xy</div>");
    assert_eq!(kinds(&repairs), [(RepairKind::StrayEndTag, "b")]);
    assert_eq!(repairs[0].position, 2);
}

#[test]
fn test_end_tag_with_empty_stack_is_dropped() {
    let (output, repairs) = corrected("</p><div>a</div></div>");
    assert_eq!(output, "<div>a</div>");
    assert_eq!(
        kinds(&repairs),
        [(RepairKind::StrayEndTag, "p"), (RepairKind::StrayEndTag, "div")]
    );
}

#[test]
fn test_extra_end_tag_is_dropped() {
    let (output, repairs) = corrected("<p><div>a</p></p>");
    assert_eq!(output, "<p><div>a</div></p>");
    assert_eq!(
        kinds(&repairs),
        [(RepairKind::ExtraEndTag, "p"), (RepairKind::ImpliedEndTag, "div")]
    );
}

#[test]
fn test_late_closer_is_kept() {
    // </p> arrives while <span> is still open; </span> then has nothing to close.
    let (output, repairs) = corrected("<div><p>a<span>b</p>c</span></div>");
    assert_eq!(output, "<div><p>a<span>b</span></p>c</div>");
    assert_eq!(
        kinds(&repairs),
        [(RepairKind::ImpliedEndTag, "span"), (RepairKind::StrayEndTag, "span")]
    );
}

#[test]
fn test_center_is_transparent() {
    let (output, repairs) = corrected("<div><center><p>a</p></center></div>");
    assert_eq!(output, "<div><p>a</p></div>");
    assert_eq!(
        kinds(&repairs),
        [(RepairKind::TransparentTag, "center"), (RepairKind::TransparentTag, "center")]
    );
}

#[test]
fn test_nested_center_is_transparent() {
    let (output, repairs) =
        corrected("<div><center><center><p>x</p></center><span>y</span></center></div>");
    assert_eq!(output, "<div><p>x</p><span>y</span></div>");
    assert_eq!(repairs.len(), 4);
    assert!(repairs.iter().all(|r| r.kind == RepairKind::TransparentTag));
}

#[test]
fn test_unclosed_elements_are_closed_at_eof() {
    let (output, repairs) = corrected("<html><body><p>text<br>");
    assert_eq!(output, "<html><body><p>text<br /></p></body></html>");
    assert_eq!(
        kinds(&repairs),
        [
            (RepairKind::UnclosedAtEof, "p"),
            (RepairKind::UnclosedAtEof, "body"),
            (RepairKind::UnclosedAtEof, "html"),
        ]
    );
}

#[test]
fn test_comments_pass_through() {
    let output = correct(elements("<div><!-- c --></div>"));
    assert_eq!(
        output,
        [
            Element::start("div"),
            Element::Comment(b"-- c --".to_vec()),
            Element::end("div"),
        ]
    );
}

#[test]
fn test_output_is_always_balanced() {
    let documents = [
        "<div><p>a</p><span>b</div>",
        "<table><tr><td>1<td>2</tr><tr><td>3</table>",
        "<p><div>a</p></p></div></div>",
        "<b><i>x</b></i><u>y",
        "<div><center><span>a</div></center></span>",
        "</a></b><a><b><c></a></b></c>",
        "<ul><li>1<li>2<li>3</ul></ul></li>",
    ];
    for html in documents {
        assert_balanced(&correct(elements(html)));
    }
}

#[test]
fn test_correct_matches_run() {
    let html = "<b><i>x</b></i>";
    assert_eq!(correct(elements(html)), TagCorrector::new(elements(html)).run());
}

#[test]
fn test_repair_kind_display() {
    assert_eq!(RepairKind::StrayEndTag.to_string(), "dropped stray end tag");
    assert_eq!(RepairKind::ImpliedEndTag.to_string(), "inserted implied end tag");
}
