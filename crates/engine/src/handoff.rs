//! Handing notifications to the thread that owns presentation state.
//!
//! [`channel`] splits a sink into a [`ChannelSink`], which the engine calls
//! from whatever thread submits events, and a [`SinkPump`], which applies the
//! notifications to the real sink on its own thread or task.
//!
//! [`polling_channel`] is for a presentation loop that also submits events
//! itself: its [`PollingPump`] is drained once per frame on that same thread,
//! so delivery is always fire-and-forget.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc as std_mpsc;

use events::LogEvent;
use index::{AttributeKind, NodeId};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::PresentationSink;

/// Delivery guarantee between the engine and the pump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// Block each notification until the pump has applied it. Engine state
    /// and sink state never diverge.
    ///
    /// The pump must run on a thread that never submits events: the
    /// submitter waits for the ack while holding the engine lock.
    #[default]
    Acknowledged,
    /// Queue and continue. The sink catches up eventually, in order.
    ///
    /// Queued notifications hold their events, evicted ones included, so a
    /// stalled pump keeps memory growing past the store's capacity.
    FireAndForget,
}

/// An owned notification in transit.
#[derive(Debug, Clone)]
pub enum Notification {
    EventAdded(Arc<LogEvent>),
    EventEvicted(Arc<LogEvent>),
    CountChanged(usize),
    NodeCreated {
        kind: AttributeKind,
        parent: NodeId,
        node: NodeId,
        label: String,
    },
    IndexReset(AttributeKind),
}

impl Notification {
    pub fn apply<S: PresentationSink + ?Sized>(&self, sink: &S) {
        match self {
            Notification::EventAdded(event) => sink.on_event_added(event),
            Notification::EventEvicted(event) => sink.on_event_evicted(event),
            Notification::CountChanged(count) => sink.on_count_changed(*count),
            Notification::NodeCreated {
                kind,
                parent,
                node,
                label,
            } => sink.on_node_created(*kind, *parent, *node, label),
            Notification::IndexReset(kind) => sink.on_index_reset(*kind),
        }
    }
}

struct Envelope {
    notification: Notification,
    ack: Option<std_mpsc::SyncSender<()>>,
}

impl Envelope {
    fn apply<S: PresentationSink + ?Sized>(self, sink: &S) {
        self.notification.apply(sink);
        if let Some(ack) = self.ack {
            let _ = ack.send(());
        }
    }
}

/// Create a connected sink/pump pair.
pub fn channel(delivery: Delivery) -> (ChannelSink, SinkPump) {
    let (sink, rx) = ChannelSink::new(delivery);
    (sink, SinkPump { rx })
}

/// Create a fire-and-forget sink paired with a pump that is drained by
/// polling, typically from the same thread that submits events.
pub fn polling_channel() -> (ChannelSink, PollingPump) {
    let (sink, rx) = ChannelSink::new(Delivery::FireAndForget);
    (sink, PollingPump { rx })
}

/// Engine side of the handoff.
///
/// Once the pump is gone, notifications are dropped and a single warning is
/// logged; ingestion itself keeps going.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Envelope>,
    delivery: Delivery,
    disconnected: AtomicBool,
}

impl ChannelSink {
    fn new(delivery: Delivery) -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Self {
            tx,
            delivery,
            disconnected: AtomicBool::new(false),
        };
        (sink, rx)
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::Relaxed)
    }

    fn deliver(&self, notification: Notification) {
        if self.is_disconnected() {
            return;
        }

        let delivered = match self.delivery {
            Delivery::FireAndForget => self
                .tx
                .send(Envelope {
                    notification,
                    ack: None,
                })
                .is_ok(),
            Delivery::Acknowledged => {
                let (ack_tx, ack_rx) = std_mpsc::sync_channel(1);
                self.tx
                    .send(Envelope {
                        notification,
                        ack: Some(ack_tx),
                    })
                    .is_ok()
                    && ack_rx.recv().is_ok()
            }
        };

        if !delivered && !self.disconnected.swap(true, Ordering::Relaxed) {
            warn!("presentation sink disconnected, dropping further notifications");
        }
    }
}

impl PresentationSink for ChannelSink {
    fn on_event_added(&self, event: &Arc<LogEvent>) {
        self.deliver(Notification::EventAdded(Arc::clone(event)));
    }

    fn on_event_evicted(&self, event: &Arc<LogEvent>) {
        self.deliver(Notification::EventEvicted(Arc::clone(event)));
    }

    fn on_count_changed(&self, count: usize) {
        self.deliver(Notification::CountChanged(count));
    }

    fn on_node_created(&self, kind: AttributeKind, parent: NodeId, node: NodeId, label: &str) {
        self.deliver(Notification::NodeCreated {
            kind,
            parent,
            node,
            label: label.to_string(),
        });
    }

    fn on_index_reset(&self, kind: AttributeKind) {
        self.deliver(Notification::IndexReset(kind));
    }
}

/// Presentation side of the handoff.
///
/// Every `run*` method returns once all [`ChannelSink`]s are dropped and the
/// queue is empty.
pub struct SinkPump {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl SinkPump {
    /// Apply notifications from an async task.
    pub async fn run<S: PresentationSink + ?Sized>(mut self, sink: &S) {
        while let Some(envelope) = self.rx.recv().await {
            envelope.apply(sink);
        }
    }

    /// Apply notifications on a dedicated thread. Must not be called from
    /// within an async runtime.
    pub fn run_blocking<S: PresentationSink + ?Sized>(mut self, sink: &S) {
        while let Some(envelope) = self.rx.blocking_recv() {
            envelope.apply(sink);
        }
    }
}

/// Presentation side of a [`polling_channel`].
pub struct PollingPump {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl PollingPump {
    /// Apply whatever is queued right now without waiting, for UI loops that
    /// poll once per frame. Returns the number of notifications applied.
    pub fn drain<S: PresentationSink + ?Sized>(&mut self, sink: &S) -> usize {
        let mut applied = 0;
        while let Ok(envelope) = self.rx.try_recv() {
            envelope.apply(sink);
            applied += 1;
        }
        applied
    }
}
