//! Recursive fragment parser over the logos token stream.
//!
//! Tolerant by design: unmatched closing tags are dropped with a warning,
//! unclosed elements are folded into their parent when the input ends, and
//! doctype declarations are skipped. No entity decoding happens here — the
//! serializer emits text verbatim, and the round trip depends on the parser
//! doing the same.

use tracing::{trace, warn};

use super::tokenizer::{tokenize, Token};
use super::{FragmentAttr, FragmentNode, FragmentParser};

/// Elements that never take children and need no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// The built-in [`FragmentParser`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl FragmentParser for HtmlParser {
    fn parse_fragment(&self, html: &str) -> FragmentNode {
        parse_fragment(html)
    }
}

/// Parse an HTML fragment into a `#document-fragment` literal tree.
pub fn parse_fragment(input: &str) -> FragmentNode {
    trace!(len = input.len(), "parsing fragment");

    // Stack of open nodes; index 0 is the fragment root and never pops.
    let mut stack: Vec<FragmentNode> = vec![FragmentNode::fragment()];

    for (token, text) in tokenize(input) {
        match token {
            Token::Text | Token::Stray => {
                current(&mut stack).child_nodes.push(FragmentNode::text(text));
            }
            Token::Comment => {
                let data = text["<!--".len()..text.len() - "-->".len()].to_string();
                current(&mut stack).child_nodes.push(FragmentNode::comment(data));
            }
            Token::Declaration => {
                trace!(declaration = %text, "skipping declaration");
            }
            Token::OpenTag => {
                let (name, attrs, self_closing) = parse_open_tag(&text);
                let mut node = FragmentNode::element(&name);
                node.attrs = attrs;

                if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                    current(&mut stack).child_nodes.push(node);
                } else {
                    stack.push(node);
                }
            }
            Token::CloseTag => {
                let name = close_tag_name(&text);
                match stack.iter().rposition(|node| node.node_name == name) {
                    // Index 0 is the root; a real match is always deeper.
                    Some(position) if position > 0 => {
                        // Fold any unclosed elements above the match first.
                        while stack.len() > position + 1 {
                            fold(&mut stack);
                        }
                        fold(&mut stack);
                    }
                    _ => warn!(tag = %name, "dropping unmatched closing tag"),
                }
            }
        }
    }

    // Input ended with elements still open.
    while stack.len() > 1 {
        fold(&mut stack);
    }

    stack.pop().expect("parser stack holds the fragment root")
}

fn current(stack: &mut [FragmentNode]) -> &mut FragmentNode {
    stack.last_mut().expect("parser stack holds the fragment root")
}

/// Pop the top open node and append it to its parent's children.
fn fold(stack: &mut Vec<FragmentNode>) {
    let node = stack.pop().expect("parser stack holds the fragment root");
    current(stack).child_nodes.push(node);
}

/// Split an `<tag ...>` slice into (lower-case name, attributes, self-closing).
fn parse_open_tag(raw: &str) -> (String, Vec<FragmentAttr>, bool) {
    let inner = raw
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(raw);
    let self_closing = inner.ends_with('/');
    let inner = inner.strip_suffix('/').unwrap_or(inner);

    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();
    let attrs = parse_attributes(&inner[name_end..]);

    (name, attrs, self_closing)
}

/// Extract the lower-case name from a `</tag>` slice.
fn close_tag_name(raw: &str) -> String {
    let inner = raw
        .strip_prefix("</")
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(raw);
    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(inner.len());
    inner[..name_end].to_ascii_lowercase()
}

/// Scan `name`, `name=value`, `name="value"`, `name='value'` pairs.
fn parse_attributes(input: &str) -> Vec<FragmentAttr> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < len {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len {
            break;
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' && bytes[i] != b'/' {
            i += 1;
        }
        let name = input[name_start..i].to_ascii_lowercase();
        if name.is_empty() {
            i += 1;
            continue;
        }

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = String::new();
        if i < len && bytes[i] == b'=' {
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < len && bytes[i] != quote {
                    i += 1;
                }
                value = input[value_start..i].to_string();
                if i < len {
                    i += 1;
                }
            } else {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                value = input[value_start..i].to_string();
            }
        }

        attrs.push(FragmentAttr { name, value });
    }

    attrs
}
