//! Sort order for presenting retained events.

use std::cmp::Ordering;
use std::sync::Arc;

use events::LogEvent;

/// A column the presentation layer can sort by.
///
/// Only `Level` and `Text` have their own comparison. Every other column,
/// `ReceivedTime` included, sorts in arrival order (by id).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortColumn {
    #[default]
    Id,
    SentTime,
    ReceivedTime,
    Logger,
    Level,
    Text,
    StackTrace,
    SourceAssembly,
    SourceType,
    SourceMethod,
    SourceFile,
    SourceMachine,
    SourceApplication,
    SourceLine,
    SourceColumn,
    Thread,
}

impl SortColumn {
    const ALL: [SortColumn; 16] = [
        SortColumn::Id,
        SortColumn::SentTime,
        SortColumn::ReceivedTime,
        SortColumn::Logger,
        SortColumn::Level,
        SortColumn::Text,
        SortColumn::StackTrace,
        SortColumn::SourceAssembly,
        SortColumn::SourceType,
        SortColumn::SourceMethod,
        SortColumn::SourceFile,
        SortColumn::SourceMachine,
        SortColumn::SourceApplication,
        SortColumn::SourceLine,
        SortColumn::SourceColumn,
        SortColumn::Thread,
    ];

    /// Column header text.
    pub fn name(self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::SentTime => "Sent Time",
            SortColumn::ReceivedTime => "Received Time",
            SortColumn::Logger => "Logger",
            SortColumn::Level => "Level",
            SortColumn::Text => "Text",
            SortColumn::StackTrace => "Stack Trace",
            SortColumn::SourceAssembly => "Source Assembly",
            SortColumn::SourceType => "Source Type",
            SortColumn::SourceMethod => "Source Method",
            SortColumn::SourceFile => "Source File",
            SortColumn::SourceMachine => "Source Machine",
            SortColumn::SourceApplication => "Source Application",
            SortColumn::SourceLine => "Source Line",
            SortColumn::SourceColumn => "Source Column",
            SortColumn::Thread => "Thread",
        }
    }

    /// Look up a column by header text, ignoring ASCII case. Unknown names
    /// map to [`SortColumn::Id`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// A stateless comparator over events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OrderBy {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// The order after a click on `column`'s header: the active column flips
    /// direction, any other column becomes active ascending.
    pub fn clicked(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                column,
                direction: SortDirection::Ascending,
            }
        }
    }

    pub fn compare(&self, a: &LogEvent, b: &LogEvent) -> Ordering {
        let ordering = match self.column {
            SortColumn::Level => a.level.as_str().cmp(b.level.as_str()),
            SortColumn::Text => a.message_text.cmp(&b.message_text),
            _ => a.id.cmp(&b.id),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable sort; ties keep their current relative order.
    pub fn sort(&self, events: &mut [Arc<LogEvent>]) {
        events.sort_by(|a, b| self.compare(a, b));
    }
}
