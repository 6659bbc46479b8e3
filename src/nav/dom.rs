//! Minimal element tree for navigation markup.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; iteration order is
//! document (pre-order) order.

use std::fmt;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    tag: String,
    /// Class list with set semantics, kept in insertion order.
    classes: Vec<String>,
    children: Vec<NodeId>,
}

/// An element tree with a single root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Document {
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Element {
                tag: root_tag.to_string(),
                classes: Vec::new(),
                children: Vec::new(),
            }],
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a child element under `parent`. Duplicate classes collapse.
    ///
    /// Returns `None` when `parent` does not belong to this document.
    pub fn append(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> Option<NodeId> {
        self.nodes.get(parent.0)?;

        let mut element = Element {
            tag: tag.to_string(),
            classes: Vec::with_capacity(classes.len()),
            children: Vec::new(),
        };
        for class in classes {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push((*class).to_string());
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|e| e.tag.as_str())
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(node.0)
            .map(|e| e.classes.as_slice())
            .unwrap_or_default()
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    /// Add `class` to `node`. Returns `true` if the class was not already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(element) = self.nodes.get_mut(node.0) else {
            return false;
        };
        if element.classes.iter().any(|c| c == class) {
            return false;
        }
        element.classes.push(class.to_string());
        true
    }

    /// Every element carrying `class`, in document order.
    pub fn select_class(&self, class: &str) -> Vec<NodeId> {
        self.select(|classes| classes.iter().any(|c| c == class))
    }

    /// Every element whose class list satisfies `predicate`, in document order.
    pub fn select<P>(&self, mut predicate: P) -> Vec<NodeId>
    where
        P: FnMut(&[String]) -> bool,
    {
        self.walk()
            .into_iter()
            .filter(|node| predicate(self.classes(*node)))
            .collect()
    }

    /// Every element carrying `class`, in document order. Alias used when
    /// checking which elements were marked.
    pub fn marked(&self, class: &str) -> Vec<NodeId> {
        self.select_class(class)
    }

    /// Pre-order traversal from the root.
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        order
    }
}
