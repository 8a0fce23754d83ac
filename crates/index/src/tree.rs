//! Per-attribute node arena and value cache.

use std::collections::HashMap;

use crate::Separator;

/// Stable handle to a node inside one [`AttributeIndex`].
///
/// Handles are never reused: after [`AttributeIndex::reset`] every handle
/// issued before it stops resolving, except the root's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// One segment of a hierarchical attribute value.
#[derive(Debug, Clone)]
pub struct Node {
    /// The trailing segment this node represents.
    pub label: String,
    /// The full attribute value up to and including this segment.
    pub value: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A tree of attribute values for a single attribute kind.
///
/// Nodes live in an arena and are never freed while the index lives (short of
/// [`reset`](Self::reset)). The cache maps each full value to its node, so a
/// value seen before resolves in a single lookup.
#[derive(Debug)]
pub struct AttributeIndex {
    nodes: Vec<Node>,
    /// Handles issued before the last reset; arena slot `i > 0` is
    /// `NodeId(retired + i)`.
    retired: usize,
    cache: HashMap<String, NodeId>,
    separator: Separator,
}

impl AttributeIndex {
    const ROOT: NodeId = NodeId(0);

    pub fn new(root_label: impl Into<String>, separator: Separator) -> Self {
        Self {
            nodes: vec![Node {
                label: root_label.into(),
                value: String::new(),
                parent: None,
                children: Vec::new(),
            }],
            retired: 0,
            cache: HashMap::new(),
            separator,
        }
    }

    fn slot(&self, id: NodeId) -> Option<usize> {
        if id == Self::ROOT {
            return Some(0);
        }
        let slot = id.0.checked_sub(self.retired)?;
        (slot > 0 && slot < self.nodes.len()).then_some(slot)
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// Map `value` onto a chain of nodes under the root, creating only the
    /// missing suffix.
    ///
    /// An absent or empty value is a no-op. `on_created(parent, node, label)`
    /// runs once for every node created by this call, parents first, after the
    /// node is attached.
    pub fn resolve<F>(&mut self, value: Option<&str>, on_created: &mut F) -> Option<NodeId>
    where
        F: FnMut(NodeId, NodeId, &str),
    {
        let value = value.filter(|v| !v.is_empty())?;

        // Walk towards the root until a known ancestor is found.
        let mut missing = Vec::new();
        let mut current = value;
        let mut node = loop {
            if let Some(&id) = self.cache.get(current) {
                break id;
            }
            missing.push(current);
            match self.separator.split_last(current) {
                Some((parent, _)) => current = parent,
                None => break Self::ROOT,
            }
        };

        for full in missing.into_iter().rev() {
            let label = match self.separator.split_last(full) {
                Some((_, label)) => label,
                None => full,
            };
            let parent = node;
            node = self.attach(parent, full, label);
            on_created(parent, node, label);
        }
        Some(node)
    }

    fn attach(&mut self, parent: NodeId, value: &str, label: &str) -> NodeId {
        let id = NodeId(self.retired + self.nodes.len());
        self.nodes.push(Node {
            label: label.to_string(),
            value: value.to_string(),
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(slot) = self.slot(parent) {
            self.nodes[slot].children.push(id);
        }
        self.cache.insert(value.to_string(), id);
        id
    }

    /// Find the node for a full value without creating anything.
    pub fn lookup(&self, value: &str) -> Option<NodeId> {
        self.cache.get(value).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slot(id).map(|slot| &self.nodes[slot])
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.label.as_str())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first walk below the root as `(depth, node)`, children in
    /// insertion order. Top-level nodes have depth 0.
    pub fn walk(&self) -> Vec<(usize, NodeId)> {
        let mut out = Vec::with_capacity(self.nodes.len() - 1);
        let mut stack: Vec<(usize, NodeId)> = self
            .children(Self::ROOT)
            .iter()
            .rev()
            .map(|&id| (0, id))
            .collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            stack.extend(self.children(id).iter().rev().map(|&c| (depth + 1, c)));
        }
        out
    }

    /// Drop every node except the root and clear the cache. Handles issued
    /// so far no longer resolve; new nodes get fresh ones.
    pub fn reset(&mut self) {
        self.retired += self.nodes.len() - 1;
        self.nodes.truncate(1);
        self.nodes[0].children.clear();
        self.cache.clear();
    }
}
