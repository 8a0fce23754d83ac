//! The full set of attribute indexes maintained for one engine.

use events::LogEvent;

use crate::{AttributeIndex, AttributeKind, NodeId};

/// Leaf nodes resolved for one event, one slot per [`AttributeKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexedNodes([Option<NodeId>; AttributeKind::ALL.len()]);

impl IndexedNodes {
    pub fn get(&self, kind: AttributeKind) -> Option<NodeId> {
        self.0[kind.position()]
    }

    /// The source type leaf, the starting point for per-class drill-down.
    pub fn source_type(&self) -> Option<NodeId> {
        self.get(AttributeKind::SourceType)
    }
}

/// One [`AttributeIndex`] per attribute kind, each with its own root and cache.
#[derive(Debug)]
pub struct IndexSet {
    indexes: Vec<AttributeIndex>,
}

impl IndexSet {
    pub fn new(file_separator: char) -> Self {
        let indexes = AttributeKind::ALL
            .iter()
            .map(|kind| AttributeIndex::new(kind.root_label(), kind.separator(file_separator)))
            .collect();
        Self { indexes }
    }

    pub fn get(&self, kind: AttributeKind) -> &AttributeIndex {
        &self.indexes[kind.position()]
    }

    /// Resolve every indexed attribute of `event`, in [`AttributeKind::ALL`]
    /// order. `on_created` sees each new node as it is attached.
    pub fn index_event<F>(&mut self, event: &LogEvent, mut on_created: F) -> IndexedNodes
    where
        F: FnMut(AttributeKind, NodeId, NodeId, &str),
    {
        let mut nodes = IndexedNodes::default();
        for kind in AttributeKind::ALL {
            let index = &mut self.indexes[kind.position()];
            nodes.0[kind.position()] = index.resolve(kind.value(event), &mut |parent, node, label| {
                on_created(kind, parent, node, label)
            });
        }
        nodes
    }

    pub fn reset(&mut self) {
        self.indexes.iter_mut().for_each(AttributeIndex::reset);
    }
}
