//! Console rendering of engine output.

use std::fmt::Write;
use std::sync::Arc;

use chrono::{Local, TimeZone};
use engine::PresentationSink;
use events::LogEvent;
use index::{AttributeIndex, AttributeKind, NodeId};
use tracing::trace;

/// Prints one line per admitted event and one per eviction.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl PresentationSink for ConsoleSink {
    fn on_event_added(&self, event: &Arc<LogEvent>) {
        println!("{}", format_row(event));
    }

    fn on_event_evicted(&self, event: &Arc<LogEvent>) {
        println!("- {}", event.id);
    }

    fn on_node_created(&self, kind: AttributeKind, _parent: NodeId, _node: NodeId, label: &str) {
        trace!(%kind, label, "tree node added");
    }
}

pub fn format_row(event: &LogEvent) -> String {
    let time = Local
        .from_utc_datetime(&event.received_time.naive_utc())
        .format("%H:%M:%S%.3f");
    let logger = event.logger.as_deref().unwrap_or("-");

    // Truncate long messages for display
    let text = match event.message_text.char_indices().nth(200) {
        Some((at, _)) => format!("{}...", &event.message_text[..at]),
        None => event.message_text.clone(),
    };
    format!(
        "{:>8}  {time}  {:<5}  {logger}  {text}",
        event.id,
        event.level.as_str()
    )
}

/// Render an attribute tree as indented text, one node per line.
pub fn render_tree(kind: AttributeKind, index: &AttributeIndex) -> String {
    let mut out = format!("{}\n", kind.root_label());
    for (depth, id) in index.walk() {
        let label = index.label(id).unwrap_or_default();
        let _ = writeln!(out, "{}{}", "  ".repeat(depth + 1), label);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::{EventId, Level};
    use index::Separator;

    #[test]
    fn test_format_row() {
        let mut event = LogEvent::new(Level::Warn, "App.Db", "slow query");
        event.id = EventId(7);
        let row = format_row(&event);
        assert!(row.starts_with("       7  "));
        assert!(row.contains("Warn"));
        assert!(row.ends_with("App.Db  slow query"));
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let event = LogEvent::new(Level::Info, "App", "x".repeat(500));
        assert!(format_row(&event).ends_with(&format!("{}...", "x".repeat(200))));
    }

    #[test]
    fn test_render_tree() {
        let mut index = AttributeIndex::new("Loggers", Separator::Char('.'));
        index.resolve(Some("App.Db"), &mut |_, _, _: &str| {});
        index.resolve(Some("App.Web"), &mut |_, _, _: &str| {});
        assert_eq!(
            render_tree(AttributeKind::Logger, &index),
            "Loggers\n  App\n    Db\n    Web\n"
        );
    }
}
