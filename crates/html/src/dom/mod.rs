use anyhow::{Error, anyhow};
use indextree::{Arena, NodeId};
use smallvec::SmallVec;

mod printing;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
}

impl DOMNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            attrs: SmallVec::new(),
        }
    }

    /// Returns the value of `name`, if this node carries it.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

/// An HTML document held in an arena.
///
/// Node ids stay valid for the lifetime of the document; detaching a node
/// only unlinks it from its parent.
pub struct DOM {
    dom: Arena<DOMNode>,
    root: NodeId,
}

impl Default for DOM {
    fn default() -> Self {
        Self::new()
    }
}

impl DOM {
    /// Creates an empty document containing only the document node.
    pub fn new() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DOMNode::default()),
            dom,
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.dom.new_node(DOMNode::element(tag))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            attrs: SmallVec::new(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Comment {
                text: text.to_owned(),
            },
            attrs: SmallVec::new(),
        })
    }

    /// Appends `child` as the last child of `parent`, detaching it from its
    /// previous parent first.
    ///
    /// # Errors
    /// Fails when `child` is `parent` itself or one of its ancestors, or when
    /// either node has been removed from the arena.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        parent
            .checked_append(child, &mut self.dom)
            .map_err(|err| anyhow!("cannot append {child:?} to {parent:?}: {err:?}"))
    }

    /// Unlinks `node` (and its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) {
        node.detach(&mut self.dom);
    }

    pub fn node(&self, node: NodeId) -> Option<&DOMNode> {
        self.dom.get(node).map(indextree::Node::get)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.get(node).and_then(indextree::Node::parent)
    }

    /// Snapshot of the direct children of `node`, in order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.dom).collect()
    }

    /// All nodes attached to the document, in document (pre-)order,
    /// excluding the document node itself.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.dom).skip(1)
    }

    /// Returns true when `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        node.ancestors(&self.dom).any(|candidate| candidate == ancestor)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(DOMNode::is_element)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?.attribute(name)
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.get_attribute(node, name).is_some()
    }

    /// Sets an attribute on an element, keeping the position of an existing
    /// attribute with the same name. Non-element nodes are left untouched.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(entry) = self.dom.get_mut(node) else {
            return;
        };
        let data = entry.get_mut();
        if !data.is_element() {
            return;
        }
        let name = name.to_ascii_lowercase();
        if let Some(existing) = data.attrs.iter_mut().find(|(key, _)| *key == name) {
            value.clone_into(&mut existing.1);
        } else {
            data.attrs.push((name, value.to_owned()));
        }
    }

    /// Elements carrying `name`, in document order.
    pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.descendants()
            .filter(|node| self.has_attribute(*node, name))
            .collect()
    }

    /// First element (in document order) whose `name` attribute equals `value`.
    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants()
            .find(|node| self.get_attribute(*node, name) == Some(value))
    }
}
