//! The ingestion pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use events::{EventId, InstanceId, LogEvent, RingStore};
use filter::{AdmissionFilter, Decision};
use index::{AttributeIndex, AttributeKind, IndexSet, IndexedNodes};
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::{EngineConfig, Error, OrderBy, PresentationSink, Result};

/// Outcome of one [`Engine::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    /// The id assigned to the event, whether or not it was admitted.
    pub id: EventId,
    pub admitted: bool,
    /// The event evicted to make room, if the store was full.
    pub evicted: Option<EventId>,
    /// Leaf nodes resolved for the event's attributes.
    pub nodes: IndexedNodes,
}

struct State {
    store: RingStore,
    indexes: IndexSet,
}

/// Accepts events from receivers, retains the most recent ones, and keeps the
/// attribute indexes current.
///
/// `submit` may be called from any number of threads. Ids come from a
/// lock-free counter; everything else for one event (store, indexes, sink
/// notifications) happens under a single lock. Store order is therefore lock
/// order, which can differ from id order for submissions racing at the same
/// instant.
pub struct Engine {
    instance_id: InstanceId,
    name: String,
    next_id: AtomicU64,
    filter: Box<dyn AdmissionFilter>,
    sink: Box<dyn PresentationSink>,
    state: Mutex<State>,
}

impl Engine {
    pub fn new(
        config: &EngineConfig,
        filter: impl AdmissionFilter + 'static,
        sink: impl PresentationSink + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let store = RingStore::with_capacity(config.capacity)?;
        let engine = Self {
            instance_id: InstanceId::new(),
            name: config.name.clone(),
            next_id: AtomicU64::new(1),
            filter: Box::new(filter),
            sink: Box::new(sink),
            state: Mutex::new(State {
                store,
                indexes: IndexSet::new(config.file_separator),
            }),
        };
        info!(
            instance = %engine.instance_id,
            name = %engine.name,
            capacity = config.capacity,
            "engine created"
        );
        Ok(engine)
    }

    /// Create an engine that admits events according to `config.filter`.
    pub fn from_config(config: &EngineConfig, sink: impl PresentationSink + 'static) -> Result<Self> {
        Self::new(config, config.filter.clone(), sink)
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submit an event from a receiver.
    ///
    /// The event always consumes an id. If the admission filter rejects it,
    /// nothing else happens. Otherwise it is stored, the sink is told about
    /// the eviction (if any) before the addition, and every indexed attribute
    /// is resolved before this returns.
    pub fn submit(&self, mut event: LogEvent) -> Result<Submission> {
        let id = self.assign_id()?;
        event.id = id;

        if let Decision::Reject { reason } = self.filter.decide(&event) {
            trace!(instance = %self.instance_id, %id, %reason, "event rejected");
            return Ok(Submission {
                id,
                admitted: false,
                evicted: None,
                nodes: IndexedNodes::default(),
            });
        }

        let event = Arc::new(event);
        let mut state = self.state.lock();

        let evicted = state.store.add(Arc::clone(&event));
        if let Some(old) = &evicted {
            debug!(instance = %self.instance_id, evicted = %old.id, %id, "event evicted");
            self.sink.on_event_evicted(old);
        }

        self.sink.on_event_added(&event);
        self.sink.on_count_changed(state.store.count());

        let sink = &self.sink;
        let nodes = state.indexes.index_event(&event, |kind, parent, node, label| {
            trace!(%kind, label, "index node created");
            sink.on_node_created(kind, parent, node, label);
        });

        Ok(Submission {
            id,
            admitted: true,
            evicted: evicted.map(|e| e.id),
            nodes,
        })
    }

    fn assign_id(&self) -> Result<EventId> {
        self.next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
                next.checked_add(1)
            })
            .map(EventId)
            .map_err(|_| Error::IdsExhausted)
    }

    /// Number of ids handed out so far, rejected events included.
    pub fn ids_assigned(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed) - 1
    }

    pub fn count(&self) -> usize {
        self.state.lock().store.count()
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().store.capacity()
    }

    /// Retained events, oldest first.
    pub fn snapshot(&self) -> Vec<Arc<LogEvent>> {
        self.state.lock().store.snapshot()
    }

    /// Retained events in the given order.
    pub fn sorted(&self, order: &OrderBy) -> Vec<Arc<LogEvent>> {
        let mut events = self.snapshot();
        order.sort(&mut events);
        events
    }

    /// Run `f` against the index for `kind` while holding the engine lock.
    pub fn with_index<R>(&self, kind: AttributeKind, f: impl FnOnce(&AttributeIndex) -> R) -> R {
        let state = self.state.lock();
        f(state.indexes.get(kind))
    }

    /// Drop every index node. Retained events are kept; the trees are rebuilt
    /// from the events submitted afterwards.
    pub fn reset_indexes(&self) {
        let mut state = self.state.lock();
        state.indexes.reset();
        for kind in AttributeKind::ALL {
            self.sink.on_index_reset(kind);
        }
        info!(instance = %self.instance_id, "indexes reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullSink;
    use events::Level;
    use filter::AcceptAll;

    fn engine(capacity: usize) -> Engine {
        let config = EngineConfig {
            capacity,
            ..Default::default()
        };
        Engine::new(&config, AcceptAll, NullSink).unwrap()
    }

    #[test]
    fn test_ids_start_at_one() {
        let engine = engine(10);
        let first = engine
            .submit(LogEvent::new(Level::Info, "App", "first"))
            .unwrap();
        let second = engine
            .submit(LogEvent::new(Level::Info, "App", "second"))
            .unwrap();
        assert_eq!(first.id, EventId(1));
        assert_eq!(second.id, EventId(2));
        assert_eq!(engine.ids_assigned(), 2);
    }

    #[test]
    fn test_id_exhaustion_is_an_error() {
        let engine = engine(10);
        engine.next_id.store(u64::MAX - 1, Ordering::Relaxed);

        let last = engine
            .submit(LogEvent::new(Level::Info, "App", "last"))
            .unwrap();
        assert_eq!(last.id, EventId(u64::MAX - 1));
        assert!(matches!(
            engine.submit(LogEvent::new(Level::Info, "App", "overflow")),
            Err(Error::IdsExhausted)
        ));
        assert_eq!(engine.count(), 1);
    }

    #[test]
    fn test_zero_capacity_config_rejected() {
        let config = EngineConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            Engine::new(&config, AcceptAll, NullSink),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_source_type_leaf_is_returned() {
        let engine = engine(10);
        let submission = engine
            .submit(LogEvent::new(Level::Info, "App", "x").with_source_type("App.Net.Client"))
            .unwrap();
        let leaf = submission.nodes.source_type().unwrap();
        engine.with_index(AttributeKind::SourceType, |classes| {
            assert_eq!(classes.label(leaf), Some("Client"));
        });
    }
}
