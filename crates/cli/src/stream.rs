//! JSON-lines receiver.
//!
//! Reads one event per line and sends it through a channel. Lines that do not
//! parse are skipped.

use events::LogEvent;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Start reading events from `reader` on a background task.
pub fn start_stream<R>(reader: R) -> mpsc::UnboundedReceiver<LogEvent>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        if let Err(e) = read_lines(BufReader::new(reader), tx).await {
            error!("stream reader error: {}", e);
        }
    });

    rx
}

async fn read_lines<R: AsyncRead + Unpin>(
    reader: BufReader<R>,
    tx: mpsc::UnboundedSender<LogEvent>,
) -> std::io::Result<()> {
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<LogEvent>(line) {
            Ok(event) => {
                if tx.send(event).is_err() {
                    // Receiver dropped, stop reading
                    break;
                }
            }
            Err(e) => warn!(line = line_no, error = %e, "skipping unparseable event"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::Level;

    #[tokio::test]
    async fn test_reads_events_and_skips_garbage() {
        let input = concat!(
            r#"{"level":"info","logger":"App.Web","messageText":"listening"}"#,
            "\n\n",
            "not json\n",
            r#"{"level":"loud","logger":"App"}"#,
            "\n",
            r#"{"level":"error","logger":"App.Db","messageText":"refused","thread":"db-1"}"#,
            "\n",
        );
        let mut rx = start_stream(input.as_bytes());

        let first = rx.recv().await.unwrap();
        assert_eq!(first.logger.as_deref(), Some("App.Web"));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.level, Level::Error);
        assert_eq!(second.thread.as_deref(), Some("db-1"));
        assert!(rx.recv().await.is_none());
    }
}
