//! Log event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

/// Identifier assigned to an event when it is submitted to an engine.
///
/// Ids are strictly increasing in arrival order and never reused. The value
/// `0` is reserved for events that have not been submitted yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    pub const UNASSIGNED: EventId = EventId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A unique identifier for an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "Trace",
            Level::Debug => "Debug",
            Level::Info => "Info",
            Level::Warn => "Warn",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

/// A structured log event as delivered by a receiver.
///
/// Every field except `id` is set by the receiver. The engine overwrites `id`
/// on submission; after that the event is shared behind an `Arc` and never
/// mutated again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    #[serde(default)]
    pub id: EventId,
    #[serde(default)]
    pub sent_time: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub received_time: DateTime<Utc>,
    #[serde(default)]
    pub logger: Option<String>,
    pub level: Level,
    #[serde(default)]
    pub message_text: String,
    #[serde(default)]
    pub stack_trace: Option<String>,
    #[serde(default)]
    pub thread: Option<String>,
    #[serde(default)]
    pub source_assembly: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub source_method: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub source_machine: Option<String>,
    #[serde(default)]
    pub source_application: Option<String>,
    #[serde(default)]
    pub source_line: Option<u32>,
    #[serde(default)]
    pub source_column: Option<u32>,
}

impl LogEvent {
    pub fn new(level: Level, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: EventId::UNASSIGNED,
            sent_time: None,
            received_time: Utc::now(),
            logger: Some(logger.into()),
            level,
            message_text: message.into(),
            stack_trace: None,
            thread: None,
            source_assembly: None,
            source_type: None,
            source_method: None,
            source_file: None,
            source_machine: None,
            source_application: None,
            source_line: None,
            source_column: None,
        }
    }

    pub fn with_sent_time(mut self, time: DateTime<Utc>) -> Self {
        self.sent_time = Some(time);
        self
    }

    pub fn with_thread(mut self, thread: impl Into<String>) -> Self {
        self.thread = Some(thread.into());
        self
    }

    pub fn with_source_assembly(mut self, assembly: impl Into<String>) -> Self {
        self.source_assembly = Some(assembly.into());
        self
    }

    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }

    pub fn with_source_method(mut self, method: impl Into<String>) -> Self {
        self.source_method = Some(method.into());
        self
    }

    /// Set the source file along with its line and column.
    pub fn with_source_location(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.source_file = Some(file.into());
        self.source_line = Some(line);
        self.source_column = Some(column);
        self
    }

    pub fn with_source_machine(mut self, machine: impl Into<String>) -> Self {
        self.source_machine = Some(machine.into());
        self
    }

    pub fn with_source_application(mut self, application: impl Into<String>) -> Self {
        self.source_application = Some(application.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }
}
