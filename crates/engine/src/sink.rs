//! Presentation sink interface.

use std::sync::Arc;

use events::LogEvent;
use index::{AttributeKind, NodeId};

/// Receives the engine's outbound notifications.
///
/// The engine calls these while holding its lock, so for one submission the
/// sink sees the eviction (if any), then the addition, then the new count,
/// then every newly created index node. Implementations must not call back
/// into the engine.
pub trait PresentationSink: Send + Sync {
    fn on_event_added(&self, _event: &Arc<LogEvent>) {}

    fn on_event_evicted(&self, _event: &Arc<LogEvent>) {}

    /// Current number of retained events.
    fn on_count_changed(&self, _count: usize) {}

    /// A node labeled `label` was attached under `parent` in the `kind` tree.
    fn on_node_created(&self, _kind: AttributeKind, _parent: NodeId, _node: NodeId, _label: &str) {}

    /// Every node under the `kind` root was dropped.
    fn on_index_reset(&self, _kind: AttributeKind) {}
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {}

impl<S: PresentationSink + ?Sized> PresentationSink for Arc<S> {
    fn on_event_added(&self, event: &Arc<LogEvent>) {
        (**self).on_event_added(event)
    }

    fn on_event_evicted(&self, event: &Arc<LogEvent>) {
        (**self).on_event_evicted(event)
    }

    fn on_count_changed(&self, count: usize) {
        (**self).on_count_changed(count)
    }

    fn on_node_created(&self, kind: AttributeKind, parent: NodeId, node: NodeId, label: &str) {
        (**self).on_node_created(kind, parent, node, label)
    }

    fn on_index_reset(&self, kind: AttributeKind) {
        (**self).on_index_reset(kind)
    }
}
