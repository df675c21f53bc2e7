//! Turning a tree back into text.

use std::fmt::Write;

use tagsoup_dom::NodeRef;

use crate::element::is_void_name;

/// Serialize `node` and its subtree as HTML.
///
/// Each element is written as its start tag (attributes sorted by key, every
/// value quoted), then its own content, then its children, then its end tag.
/// Void elements get no end tag. Text that was interleaved with child
/// elements in the source comes out ahead of them, since a node only stores
/// the concatenation.
///
/// Parsing the output again yields the same tree with no repairs.
#[must_use]
pub fn to_html(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    let mut pending = vec![Step::Open(node)];
    while let Some(step) = pending.pop() {
        match step {
            Step::Open(node) => {
                write_start_tag(&mut out, node);
                if is_void_name(node.name().as_bytes()) {
                    continue;
                }
                out.push_str(node.content());
                pending.push(Step::Close(node.name()));
                pending.extend(node.children().rev().map(Step::Open));
            }
            Step::Close(name) => {
                let _ = write!(out, "</{name}>");
            }
        }
    }
    out
}

enum Step<'a> {
    Open(NodeRef<'a>),
    Close(&'a str),
}

fn write_start_tag(out: &mut String, node: NodeRef<'_>) {
    let mut attributes: Vec<(&String, &String)> = node.attributes().iter().collect();
    attributes.sort_unstable();

    out.push('<');
    out.push_str(node.name());
    for (key, value) in attributes {
        let _ = write!(out, " {key}=\"{value}\"");
    }
    out.push('>');
}

/// Print a debug view of the subtree rooted at `node` to stdout.
pub fn print_tree(node: NodeRef<'_>, indent: usize) {
    let mut pending = vec![(node, indent)];
    while let Some((node, indent)) = pending.pop() {
        let prefix = "  ".repeat(indent);
        if node.attributes().is_empty() {
            println!("{prefix}<{}>", node.name());
        } else {
            let mut attrs: Vec<String> = node
                .attributes()
                .iter()
                .map(|(k, v)| format!("{k}=\"{v}\""))
                .collect();
            attrs.sort_unstable();
            println!("{prefix}<{} {}>", node.name(), attrs.join(" "));
        }
        if !node.content().is_empty() {
            let display = node.content().replace(' ', "\u{00B7}");
            println!("{prefix}  \"{display}\"");
        }
        pending.extend(node.children().rev().map(|child| (child, indent + 1)));
    }
}
