//! Admission filtering for submitted log events.
//!
//! An [`AdmissionFilter`] decides whether an event is retained and indexed.
//! [`AcceptAll`] is the default; [`FilterRules`] is a TOML-configurable rule
//! set, and any `Fn(&LogEvent) -> bool` closure works as well.

mod error;
mod filter;
mod rules;

pub use error::{Error, Result};
pub use filter::{AcceptAll, AdmissionFilter, Decision};
pub use rules::{DenyRules, FilterRules};
