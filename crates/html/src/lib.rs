//! HTML document model used by the sequence engine.
//!
//! The document is an [`indextree`] arena of [`DOMNode`]s rooted at a
//! document node. Documents are built either programmatically or by parsing
//! markup with html5ever, and can be printed back as HTML, as a deterministic
//! JSON snapshot, or as an indented debug tree.

pub mod dom;
pub mod parser;

pub use dom::{DOM, DOMNode, NodeKind};
pub use indextree::NodeId;
pub use parser::parse_html;
