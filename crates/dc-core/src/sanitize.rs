//! Deny-list sanitization of pasted HTML.
//!
//! Removes every `<script>` element and every attribute whose name starts
//! with `on` (case-insensitive), and nothing else. URLs are not
//! canonicalized, `javascript:` hrefs pass through, and no tag is
//! restricted. Downstream behavior depends on exactly this deny-list;
//! do not strengthen it here.

use crate::emitter::emit_nodes;
use crate::parser::{HtmlNode, parse_fragment};

/// Sanitize a raw HTML string, returning the cleaned serialized markup.
/// Unparseable input yields an empty fragment, silently.
pub fn sanitize(raw: &str) -> String {
    emit_nodes(&sanitize_nodes(parse_fragment(raw)))
}

/// Sanitize an already-parsed fragment.
pub fn sanitize_nodes(nodes: Vec<HtmlNode>) -> Vec<HtmlNode> {
    nodes.into_iter().filter_map(scrub).collect()
}

fn scrub(node: HtmlNode) -> Option<HtmlNode> {
    match node {
        HtmlNode::Element { tag, .. } if tag == "script" => {
            log::debug!("sanitize: dropped <script> element");
            None
        }
        HtmlNode::Element {
            tag,
            attrs,
            children,
        } => Some(HtmlNode::Element {
            tag,
            attrs: attrs
                .into_iter()
                .filter(|attr| !is_event_handler(&attr.name))
                .collect(),
            children: sanitize_nodes(children),
        }),
        other => Some(other),
    }
}

/// Attribute names matching the case-insensitive prefix `on`.
fn is_event_handler(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].eq_ignore_ascii_case(&b'o') && bytes[1].eq_ignore_ascii_case(&b'n')
}
