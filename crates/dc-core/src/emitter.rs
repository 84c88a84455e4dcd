//! Emitter: model → markup.
//!
//! Projects parsed HTML fragments, items, and the whole canvas into their
//! serialized markup form. This is the only place style values take their
//! CSS string shape; the model stays strongly typed.

use crate::doc::Document;
use crate::geom::px;
use crate::model::{Background, Item, ItemKind};
use crate::parser::HtmlNode;
use std::fmt::Write;

/// Serialize a parsed fragment back to markup.
///
/// Text nodes are carried in markup form (entities undecoded), so emission
/// is verbatim, so parse → emit round-trips pasted HTML exactly.
pub fn emit_nodes(nodes: &[HtmlNode]) -> String {
    let mut out = String::with_capacity(256);
    for node in nodes {
        emit_node(&mut out, node);
    }
    out
}

fn emit_node(out: &mut String, node: &HtmlNode) {
    match node {
        HtmlNode::Text(text) => out.push_str(text),
        HtmlNode::Comment(body) => {
            let _ = write!(out, "<!--{body}-->");
        }
        HtmlNode::Element {
            tag,
            attrs,
            children,
        } => {
            let _ = write!(out, "<{tag}");
            for attr in attrs {
                if attr.value.is_empty() {
                    let _ = write!(out, " {}", attr.name);
                } else {
                    let _ = write!(out, " {}=\"{}\"", attr.name, escape_attr(&attr.value));
                }
            }
            out.push('>');
            if is_void(tag) {
                return;
            }
            for child in children {
                emit_node(out, child);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Serialize one item as its `div.item` markup: positioning styles, the
/// drag handle, and the kind-specific content.
pub fn emit_item(item: &Item) -> String {
    let mut out = String::with_capacity(256);
    let _ = write!(
        out,
        "<div class=\"item\" data-item=\"1\" data-kind=\"{}\" data-id=\"{}\" style=\"{}\">",
        item.kind.name(),
        item.id,
        item_style(item)
    );
    out.push_str("<div class=\"drag-handle\">⇕ mover</div>");
    out.push_str("<div class=\"content\">");
    match &item.kind {
        ItemKind::Rect | ItemKind::Circle => {}
        ItemKind::Text { content, font } => {
            let _ = write!(
                out,
                "<div class=\"text\" contenteditable=\"true\" style=\"color:{};font-family:{};font-size:{};font-weight:{}\">{}</div>",
                font.color.to_hex(),
                font.family,
                px(font.size),
                font.weight,
                escape_text(content)
            );
        }
        ItemKind::Image { src } => {
            let _ = write!(out, "<img src=\"{}\">", escape_attr(src));
        }
        ItemKind::Html { markup } => out.push_str(markup),
    }
    out.push_str("</div></div>");
    out
}

/// The item's inline style attribute value.
fn item_style(item: &Item) -> String {
    let mut style = String::with_capacity(128);
    let _ = write!(
        style,
        "left:{};top:{};width:{};height:{};z-index:{};opacity:{}",
        px(item.position.x),
        px(item.position.y),
        px(item.size.width()),
        px(item.size.height()),
        item.stack,
        item.opacity
    );
    match &item.background {
        Some(Background::Color(color)) => {
            let _ = write!(style, ";background-color:{}", color.to_hex());
        }
        Some(background @ Background::Image { .. }) => {
            let _ = write!(style, ";background:{}", background.to_css());
        }
        None => {}
    }
    if item.border.width > 0.0 {
        let _ = write!(
            style,
            ";border:{} solid {}",
            px(item.border.width),
            item.border.color.to_hex()
        );
    }
    if item.border.radius > 0.0 {
        let _ = write!(style, ";border-radius:{}", px(item.border.radius));
    }
    style
}

/// The live canvas markup: every item in insertion order.
pub fn canvas_markup(doc: &Document) -> String {
    let mut out = String::with_capacity(1024);
    for (i, item) in doc.items().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&emit_item(item));
    }
    out
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
