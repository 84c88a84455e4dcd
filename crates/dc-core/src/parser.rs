//! Lenient HTML fragment parser → `HtmlNode` tree.
//!
//! Built on `winnow` 0.7. This is not a conforming HTML parser; it covers
//! what a paste-in panel produces: elements with attributes, text,
//! comments, void and self-closing elements, raw `<script>`/`<style>`
//! content. Tag and attribute names are normalized to ASCII lowercase,
//! the way a DOM serializer emits them. Stray close tags are dropped,
//! unclosed elements auto-close at end of input, and input that cannot
//! be parsed at all degrades to plain text nodes, never an error.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use winnow::combinator::delimited;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// A single attribute. A bare attribute (`disabled`) carries an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

pub type AttrList = SmallVec<[Attr; 4]>;

/// A node in a parsed HTML fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HtmlNode {
    Element {
        tag: String,
        attrs: AttrList,
        children: Vec<HtmlNode>,
    },
    Text(String),
    Comment(String),
}

/// Elements that never take children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

impl HtmlNode {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Look up an attribute by (lowercase) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Visible text content, recursively.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Comment(_) => String::new(),
            Self::Element { children, .. } => {
                children.iter().map(HtmlNode::text_content).collect()
            }
        }
    }

    /// The node's declared box, from inline `style` pixel declarations or
    /// `width`/`height` attributes. Style wins, the way rendered CSS would.
    pub fn declared_size(&self) -> (Option<f32>, Option<f32>) {
        let Self::Element { .. } = self else {
            return (None, None);
        };

        let mut width = None;
        let mut height = None;
        if let Some(style) = self.attr("style") {
            for decl in style.split(';') {
                let Some((prop, value)) = decl.split_once(':') else {
                    continue;
                };
                let value = value.trim().trim_end_matches("px").trim();
                match prop.trim().to_ascii_lowercase().as_str() {
                    "width" => width = width.or_else(|| value.parse().ok()),
                    "height" => height = height.or_else(|| value.parse().ok()),
                    _ => {}
                }
            }
        }
        width = width.or_else(|| self.attr("width").and_then(|v| v.parse().ok()));
        height = height.or_else(|| self.attr("height").and_then(|v| v.parse().ok()));
        (width, height)
    }
}

/// An element still waiting for its close tag.
struct Frame {
    tag: String,
    attrs: AttrList,
    children: Vec<HtmlNode>,
}

/// Parse a raw HTML string into a list of top-level sibling nodes.
pub fn parse_fragment(input: &str) -> Vec<HtmlNode> {
    let mut rest = input;
    let mut stack: Vec<Frame> = Vec::new();
    let mut top: Vec<HtmlNode> = Vec::new();

    while !rest.is_empty() {
        if rest.starts_with("<!--") {
            let comment = consume_comment(&mut rest);
            push_node(&mut stack, &mut top, HtmlNode::Comment(comment));
        } else if rest.starts_with("</") {
            let checkpoint = rest;
            match parse_close_tag.parse_next(&mut rest) {
                Ok(tag) => close_element(&mut stack, &mut top, &tag),
                Err(_) => {
                    rest = checkpoint;
                    push_literal(&mut stack, &mut top, &mut rest);
                }
            }
        } else if starts_open_tag(rest) {
            let checkpoint = rest;
            match parse_open_tag.parse_next(&mut rest) {
                Ok((tag, attrs, self_closing)) => {
                    if !self_closing && RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                        let text = consume_raw_text(&mut rest, &tag);
                        let children = if text.is_empty() {
                            Vec::new()
                        } else {
                            vec![HtmlNode::Text(text)]
                        };
                        push_node(
                            &mut stack,
                            &mut top,
                            HtmlNode::Element {
                                tag,
                                attrs,
                                children,
                            },
                        );
                    } else if self_closing || VOID_ELEMENTS.contains(&tag.as_str()) {
                        push_node(
                            &mut stack,
                            &mut top,
                            HtmlNode::Element {
                                tag,
                                attrs,
                                children: Vec::new(),
                            },
                        );
                    } else {
                        stack.push(Frame {
                            tag,
                            attrs,
                            children: Vec::new(),
                        });
                    }
                }
                Err(_) => {
                    rest = checkpoint;
                    push_literal(&mut stack, &mut top, &mut rest);
                }
            }
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            // Markup declaration (`<!DOCTYPE ...>`) — skip to '>'.
            match rest.find('>') {
                Some(pos) => rest = &rest[pos + 1..],
                None => break,
            }
        } else if rest.starts_with('<') {
            // A '<' that opens nothing is plain text.
            push_literal(&mut stack, &mut top, &mut rest);
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            push_text(&mut stack, &mut top, &rest[..end]);
            rest = &rest[end..];
        }
    }

    // Auto-close anything left open.
    while let Some(frame) = stack.pop() {
        fold_frame(&mut stack, &mut top, frame);
    }

    top
}

fn starts_open_tag(s: &str) -> bool {
    s.starts_with('<')
        && s[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
}

fn push_node(stack: &mut Vec<Frame>, top: &mut Vec<HtmlNode>, node: HtmlNode) {
    match stack.last_mut() {
        Some(frame) => frame.children.push(node),
        None => top.push(node),
    }
}

/// Append text, merging with a preceding text node the way a DOM would.
fn push_text(stack: &mut Vec<Frame>, top: &mut Vec<HtmlNode>, text: &str) {
    let siblings = match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => top,
    };
    if let Some(HtmlNode::Text(prev)) = siblings.last_mut() {
        prev.push_str(text);
    } else {
        siblings.push(HtmlNode::Text(text.to_string()));
    }
}

/// Consume one literal character as text (unparseable `<`).
fn push_literal(stack: &mut Vec<Frame>, top: &mut Vec<HtmlNode>, rest: &mut &str) {
    push_text(stack, top, &rest[..1]);
    *rest = &rest[1..];
}

fn fold_frame(stack: &mut Vec<Frame>, top: &mut Vec<HtmlNode>, frame: Frame) {
    push_node(
        stack,
        top,
        HtmlNode::Element {
            tag: frame.tag,
            attrs: frame.attrs,
            children: frame.children,
        },
    );
}

/// Close the innermost matching open element; implicitly closes anything
/// opened after it. A close tag with no matching open element is dropped.
fn close_element(stack: &mut Vec<Frame>, top: &mut Vec<HtmlNode>, tag: &str) {
    if !stack.iter().any(|frame| frame.tag == tag) {
        return;
    }
    while let Some(frame) = stack.pop() {
        let matched = frame.tag == tag;
        fold_frame(stack, top, frame);
        if matched {
            break;
        }
    }
}

// ─── Token-level parsers ─────────────────────────────────────────────────

/// Consume optional whitespace (concrete error type avoids inference issues).
fn skip_space(input: &mut &str) {
    use winnow::ascii::multispace0;
    let _: Result<&str, winnow::error::ErrMode<ContextError>> = multispace0.parse_next(input);
}

fn parse_tag_name(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-')
        .map(str::to_ascii_lowercase)
        .parse_next(input)
}

/// `<tag attr="v" ...>` → (tag, attrs, self_closing).
fn parse_open_tag(input: &mut &str) -> ModalResult<(String, AttrList, bool)> {
    let _ = '<'.parse_next(input)?;
    let tag = parse_tag_name(input)?;

    let mut attrs = AttrList::new();
    loop {
        skip_space(input);
        if input.starts_with("/>") {
            *input = &input[2..];
            return Ok((tag, attrs, true));
        }
        if input.starts_with('>') {
            *input = &input[1..];
            return Ok((tag, attrs, false));
        }
        if input.is_empty() {
            // Tag truncated at end of input; treat as closed.
            return Ok((tag, attrs, false));
        }
        attrs.push(parse_attr(input)?);
    }
}

fn parse_attr(input: &mut &str) -> ModalResult<Attr> {
    let name: &str = take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
    })
    .parse_next(input)?;
    let name = name.to_ascii_lowercase();

    skip_space(input);
    let mut value = String::new();
    if input.starts_with('=') {
        *input = &input[1..];
        skip_space(input);
        if input.starts_with('"') {
            value = delimited('"', take_till(0.., '"'), '"')
                .parse_next(input)?
                .to_string();
        } else if input.starts_with('\'') {
            value = delimited('\'', take_till(0.., '\''), '\'')
                .parse_next(input)?
                .to_string();
        } else {
            let v: &str = take_till(0.., |c: char| c.is_whitespace() || c == '>' || c == '/')
                .parse_next(input)?;
            value = v.to_string();
        }
    }

    Ok(Attr { name, value })
}

/// `</tag>` → tag. A missing `>` at end of input is tolerated.
fn parse_close_tag(input: &mut &str) -> ModalResult<String> {
    let _ = "</".parse_next(input)?;
    let tag = parse_tag_name(input)?;
    skip_space(input);
    if input.starts_with('>') {
        *input = &input[1..];
    }
    Ok(tag)
}

/// `<!-- ... -->`, unterminated comments swallow the rest of the input.
fn consume_comment(input: &mut &str) -> String {
    *input = &input[4..];
    match input.find("-->") {
        Some(pos) => {
            let body = input[..pos].to_string();
            *input = &input[pos + 3..];
            body
        }
        None => {
            let body = input.to_string();
            *input = "";
            body
        }
    }
}

/// Raw text content up to (and through) the matching close tag.
fn consume_raw_text(input: &mut &str, tag: &str) -> String {
    // ASCII lowercasing preserves byte offsets.
    let lower = input.to_ascii_lowercase();
    let needle = format!("</{tag}");
    match lower.find(&needle) {
        Some(pos) => {
            let text = input[..pos].to_string();
            *input = &input[pos..];
            match input.find('>') {
                Some(end) => *input = &input[end + 1..],
                None => *input = "",
            }
            text
        }
        None => {
            let text = input.to_string();
            *input = "";
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element(node: &HtmlNode) -> (&str, &AttrList, &Vec<HtmlNode>) {
        match node {
            HtmlNode::Element {
                tag,
                attrs,
                children,
            } => (tag.as_str(), attrs, children),
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn parses_nested_elements_and_text() {
        let nodes = parse_fragment("<div><p>hola <b>mundo</b></p></div>");
        assert_eq!(nodes.len(), 1);
        let (tag, _, children) = element(&nodes[0]);
        assert_eq!(tag, "div");
        let (p, _, p_children) = element(&children[0]);
        assert_eq!(p, "p");
        assert_eq!(p_children[0], HtmlNode::Text("hola ".into()));
        assert_eq!(p_children[1].tag(), Some("b"));
    }

    #[test]
    fn parses_attribute_forms() {
        let nodes = parse_fragment(r#"<a href="x" title='y' data-n=3 disabled>go</a>"#);
        let (_, attrs, _) = element(&nodes[0]);
        let pairs: Vec<(&str, &str)> = attrs
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("href", "x"), ("title", "y"), ("data-n", "3"), ("disabled", "")]
        );
    }

    #[test]
    fn tag_and_attr_names_are_lowercased() {
        let nodes = parse_fragment(r#"<DIV ONCLICK="x">hi</DIV>"#);
        let (tag, attrs, _) = element(&nodes[0]);
        assert_eq!(tag, "div");
        assert_eq!(attrs[0].name, "onclick");
    }

    #[test]
    fn void_and_self_closing_elements_take_no_children() {
        let nodes = parse_fragment("<img src=\"a.png\"><br><span/>tail");
        assert_eq!(nodes[0].tag(), Some("img"));
        assert_eq!(nodes[1].tag(), Some("br"));
        assert_eq!(nodes[2].tag(), Some("span"));
        assert_eq!(nodes[3], HtmlNode::Text("tail".into()));
    }

    #[test]
    fn unclosed_elements_auto_close() {
        let nodes = parse_fragment("<div><p>abierto");
        let (_, _, children) = element(&nodes[0]);
        let (p, _, p_children) = element(&children[0]);
        assert_eq!(p, "p");
        assert_eq!(p_children[0], HtmlNode::Text("abierto".into()));
    }

    #[test]
    fn mismatched_close_folds_inner_elements() {
        // </b> is missing; </div> implicitly closes it.
        let nodes = parse_fragment("<div><b>x</div>after");
        assert_eq!(nodes.len(), 2);
        let (_, _, children) = element(&nodes[0]);
        assert_eq!(children[0].tag(), Some("b"));
        assert_eq!(nodes[1], HtmlNode::Text("after".into()));
    }

    #[test]
    fn stray_close_tags_are_dropped() {
        let nodes = parse_fragment("a</span>b");
        assert_eq!(nodes, vec![HtmlNode::Text("ab".into())]);
    }

    #[test]
    fn script_content_is_raw_text() {
        let nodes = parse_fragment("<script>if (a < b) { evil() }</script>");
        let (tag, _, children) = element(&nodes[0]);
        assert_eq!(tag, "script");
        assert_eq!(
            children[0],
            HtmlNode::Text("if (a < b) { evil() }".into())
        );
    }

    #[test]
    fn comments_and_doctype() {
        let nodes = parse_fragment("<!DOCTYPE html><!-- nota --><p>x</p>");
        assert_eq!(nodes[0], HtmlNode::Comment(" nota ".into()));
        assert_eq!(nodes[1].tag(), Some("p"));
    }

    #[test]
    fn junk_degrades_to_text_not_error() {
        let nodes = parse_fragment("1 < 2 y 3 > 2");
        assert_eq!(nodes, vec![HtmlNode::Text("1 < 2 y 3 > 2".into())]);
        assert_eq!(parse_fragment(""), Vec::<HtmlNode>::new());
    }

    #[test]
    fn declared_size_prefers_style_over_attributes() {
        let nodes = parse_fragment(r#"<div style="width: 320px; height:40px" width="99">x</div>"#);
        assert_eq!(nodes[0].declared_size(), (Some(320.0), Some(40.0)));

        let nodes = parse_fragment(r#"<img width="260" height="120">"#);
        assert_eq!(nodes[0].declared_size(), (Some(260.0), Some(120.0)));

        let nodes = parse_fragment("<div>x</div>");
        assert_eq!(nodes[0].declared_size(), (None, None));
    }

    #[test]
    fn text_content_recurses_and_skips_comments() {
        let nodes = parse_fragment("<div>ho<!-- c --><b>la</b></div>");
        assert_eq!(nodes[0].text_content(), "hola");
    }
}
