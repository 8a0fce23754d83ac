//! Log event model and bounded retention for the logview engine.
//!
//! # Core Concepts
//!
//! ## LogEvent
//!
//! A [`LogEvent`] is one structured record delivered by a receiver: logger
//! name, [`Level`], message text, and optional source attributes (thread,
//! assembly, type, file, machine, application). Once submitted to an engine it
//! carries a unique [`EventId`] and is shared behind an `Arc`.
//!
//! ## RingStore
//!
//! The [`RingStore`] retains the most recent `N` events. Appending to a full
//! store evicts and returns the oldest event so collaborators can drop
//! anything derived from it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use events::{Level, LogEvent, RingStore};
//!
//! let mut store = RingStore::with_capacity(2)?;
//! store.add(Arc::new(LogEvent::new(Level::Info, "App", "one")));
//! store.add(Arc::new(LogEvent::new(Level::Info, "App", "two")));
//! let evicted = store.add(Arc::new(LogEvent::new(Level::Warn, "App", "three")));
//!
//! assert_eq!(evicted.unwrap().message_text, "one");
//! assert_eq!(store.count(), 2);
//! # Ok::<(), events::Error>(())
//! ```

mod error;
mod event;
mod store;

pub use error::{Error, Result};
pub use event::{EventId, InstanceId, Level, LogEvent};
pub use store::{DEFAULT_CAPACITY, RingStore};
