//! Log event ingestion and indexing engine.
//!
//! The engine is the single entry point for receivers. Each submitted event
//! gets a unique, strictly increasing id, passes an admission filter, lands
//! in a bounded ring store, and updates one hierarchical index per attribute
//! kind. A [`PresentationSink`] is told about every addition, eviction, and
//! new index node, synchronously and in that order.
//!
//! # Overview
//!
//! - [`Engine`] — the ingestion pipeline ([`Engine::submit`]).
//! - [`PresentationSink`] — outbound notifications; [`handoff::channel`]
//!   moves them onto the thread that owns presentation state.
//! - [`OrderBy`] — comparator the presentation layer sorts retained events
//!   with.
//! - [`EngineConfig`] — TOML configuration (capacity, separators, initial
//!   order, delivery mode, admission rules).
//!
//! # Operational limits
//!
//! Ids are 64-bit and never wrap; at a billion events per second the space
//! lasts roughly 584 years, after which `submit` returns
//! [`Error::IdsExhausted`]. Index nodes are never evicted together with
//! events, so memory grows with the number of distinct attribute values seen.
//! Call [`Engine::reset_indexes`] to reclaim it.
//!
//! # Example
//!
//! ```
//! use engine::{Engine, EngineConfig, NullSink};
//! use events::{Level, LogEvent};
//! use index::AttributeKind;
//!
//! let config = EngineConfig { capacity: 2, ..Default::default() };
//! let engine = Engine::from_config(&config, NullSink)?;
//!
//! engine.submit(LogEvent::new(Level::Info, "App.Db", "connected"))?;
//! engine.submit(LogEvent::new(Level::Warn, "App.Db", "slow query"))?;
//! let third = engine.submit(LogEvent::new(Level::Info, "App.Web", "listening"))?;
//!
//! assert_eq!(third.evicted.map(|id| id.0), Some(1));
//! assert_eq!(engine.count(), 2);
//! engine.with_index(AttributeKind::Logger, |loggers| {
//!     assert!(loggers.lookup("App.Web").is_some());
//! });
//! # Ok::<(), engine::Error>(())
//! ```

mod config;
mod engine;
mod error;
pub mod handoff;
mod ordering;
mod sink;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, Submission};
pub use error::{Error, Result};
pub use handoff::{ChannelSink, Delivery, Notification, PollingPump, SinkPump};
pub use ordering::{OrderBy, SortColumn, SortDirection};
pub use sink::{NullSink, PresentationSink};
