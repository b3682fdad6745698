use core::fmt;
use core::fmt::Write as _;

use super::{DOM, DOMNode, NodeKind};
use indextree::{NodeEdge, NodeId};

use serde_json::{Map, Value, json};

/// Elements serialized without an end tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written verbatim.
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "xmp", "noscript"];

// -----------------------
// Module-scope helpers
// -----------------------

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.trim().is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

fn push_non_null(children: &mut Vec<Value>, value: Value) {
    if !value.is_null() {
        children.push(value);
    }
}

fn coalesce_children(dom: &DOM, id: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in id.children(&dom.dom) {
        if let Some(NodeKind::Text { text }) = dom.node(child).map(|node| &node.kind) {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        push_non_null(&mut children, node_to_json(dom, child));
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn node_to_json(dom: &DOM, id: NodeId) -> Value {
    let Some(DOMNode { kind, attrs }) = dom.node(id) else {
        return Value::Null;
    };
    match kind {
        NodeKind::Document => json!({ "type": "document", "children": coalesce_children(dom, id) }),
        NodeKind::Element { tag } => {
            // Sort attributes by key for determinism
            let mut pairs: Vec<&(String, String)> = attrs.iter().collect();
            pairs.sort_by(|left, right| left.0.cmp(&right.0));
            let mut attrs_obj = Map::new();
            for (key, value) in pairs {
                attrs_obj.insert(key.clone(), Value::String(value.clone()));
            }
            json!({
                "type": "element",
                "tag": tag,
                "attrs": Value::Object(attrs_obj),
                "children": coalesce_children(dom, id),
            })
        }
        NodeKind::Text { text } => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
        NodeKind::Comment { .. } => Value::Null,
    }
}

fn escape_html(text: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_html(dom: &DOM, id: NodeId, raw_text: bool, out: &mut String) -> fmt::Result {
    let Some(DOMNode { kind, attrs }) = dom.node(id) else {
        return Ok(());
    };
    match kind {
        NodeKind::Document => {
            for child in id.children(&dom.dom) {
                write_html(dom, child, false, out)?;
            }
        }
        NodeKind::Element { tag } => {
            write!(out, "<{tag}")?;
            // Attributes keep their stored order so output mirrors the source
            for (key, value) in attrs.iter() {
                write!(out, " {key}=\"{}\"", escape_html(value, true))?;
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return Ok(());
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
            for child in id.children(&dom.dom) {
                write_html(dom, child, raw, out)?;
            }
            write!(out, "</{tag}>")?;
        }
        NodeKind::Text { text } => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_html(text, false));
            }
        }
        NodeKind::Comment { text } => write!(out, "<!--{text}-->")?,
    }
    Ok(())
}

/// An outline of the tree: one node per line, indented by depth. Elements
/// show their tag and sorted attributes, text is trimmed and quoted, comments
/// are left out.
impl fmt::Debug for DOM {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0_usize;
        for edge in self.root.traverse(&self.dom) {
            let id = match edge {
                NodeEdge::Start(id) => id,
                NodeEdge::End(_) => {
                    depth = depth.saturating_sub(1);
                    continue;
                }
            };
            let indent = depth * 2;
            depth += 1;
            let Some(DOMNode { kind, attrs }) = self.node(id) else {
                continue;
            };
            let line = match kind {
                NodeKind::Document => String::from("#document"),
                NodeKind::Element { tag } => {
                    let mut pairs: Vec<String> = attrs
                        .iter()
                        .map(|(key, value)| format!("{key}={value:?}"))
                        .collect();
                    pairs.sort();
                    if pairs.is_empty() {
                        tag.clone()
                    } else {
                        format!("{tag} [{}]", pairs.join(" "))
                    }
                }
                NodeKind::Text { text } => format!("{:?}", text.trim()),
                NodeKind::Comment { .. } => continue,
            };
            writeln!(formatter, "{:indent$}{line}", "")?;
        }
        Ok(())
    }
}

impl DOM {
    /// Build a deterministic JSON representation of the DOM.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    ///
    /// Comments are omitted.
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root)
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }

    /// Serialize the document (without a doctype) back to HTML markup.
    pub fn to_html(&self) -> String {
        self.subtree_to_html(self.root)
    }

    /// Serialize `node` and its descendants to HTML markup.
    pub fn subtree_to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if write_html(self, node, false, &mut out).is_err() {
            out.clear();
        }
        out
    }
}
