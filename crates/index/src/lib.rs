//! Hierarchical attribute indexes over log events.
//!
//! Each indexed attribute (logger, level, source type, file, ...) gets its own
//! tree. Dotted or path-like values are split into segments, so
//! `"App.Net.Http"` becomes `App -> Net -> Http` under the `Loggers` root.
//! Nodes are created once per distinct value and looked up through a cache
//! afterwards.
//!
//! Nodes are never removed when the events that created them are evicted.
//! With high attribute cardinality the indexes grow for the lifetime of the
//! process; [`IndexSet::reset`] is the operator's escape hatch.
//!
//! # Example
//!
//! ```
//! use index::{AttributeIndex, Separator};
//!
//! let mut loggers = AttributeIndex::new("Loggers", Separator::Char('.'));
//! let mut created = Vec::new();
//! let leaf = loggers.resolve(Some("a.b.c"), &mut |_, _, label: &str| {
//!     created.push(label.to_string())
//! });
//! assert_eq!(created, ["a", "b", "c"]);
//! assert_eq!(leaf, loggers.lookup("a.b.c"));
//! ```

mod attribute;
mod set;
mod tree;

pub use attribute::{AttributeKind, Separator};
pub use set::{IndexSet, IndexedNodes};
pub use tree::{AttributeIndex, Node, NodeId};
