//! HTML5 parsing using html5ever.
//!
//! html5ever builds an `RcDom`, which is then copied into the arena-backed
//! [`DOM`]. Doctypes and processing instructions are dropped, as are
//! whitespace-only text nodes.

use crate::dom::DOM;
use anyhow::Error;
use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use log::trace;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse a complete HTML document.
///
/// # Errors
/// Returns an error if the input cannot be read or the tree cannot be built.
pub fn parse_html(html: &str) -> Result<DOM, Error> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };

    let rc_dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut dom = DOM::new();
    let root = dom.root();
    convert_node(&rc_dom.document, root, &mut dom)?;
    trace!("parsed document with {} nodes", dom.descendants().count());
    Ok(dom)
}

fn convert_node(handle: &Handle, parent: NodeId, dom: &mut DOM) -> Result<(), Error> {
    match &handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, parent, dom)?;
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let node = dom.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                dom.set_attribute(node, &attr.name.local, &attr.value);
            }
            dom.append_child(parent, node)?;
            for child in handle.children.borrow().iter() {
                convert_node(child, node, dom)?;
            }
        }
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if !text.trim().is_empty() {
                let node = dom.create_text(&text);
                dom.append_child(parent, node)?;
            }
        }
        NodeData::Comment { contents } => {
            let node = dom.create_comment(contents);
            dom.append_child(parent, node)?;
        }
        NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {}
    }
    Ok(())
}
