mod console;
mod error;
mod stream;

use std::path::{Path, PathBuf};
use std::thread;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineConfig, NullSink, OrderBy, SortColumn, SortDirection, handoff};
use index::AttributeKind;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use console::{ConsoleSink, format_row, render_tree};
use error::{Error, Result};

const CONFIG_FILE: &str = "logview.toml";

#[derive(Parser)]
#[command(name = "logview")]
#[command(about = "Ingest and index a stream of structured log events", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print events as they arrive, then the attribute trees
    Watch(InputArgs),
    /// Ingest silently, then print the attribute trees and the newest events
    Summary {
        #[command(flatten)]
        input: InputArgs,
        /// Number of newest retained events to print
        #[arg(short, long, default_value = "20")]
        tail: usize,
        /// Column to order the printed events by (ID, Level, Text, ...)
        #[arg(long)]
        order_by: Option<String>,
        /// Print in descending order
        #[arg(long)]
        descending: bool,
    },
}

#[derive(Args, Default)]
struct InputArgs {
    /// Read JSON-lines events from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Configuration file (defaults to ./logview.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the number of retained events
    #[arg(long)]
    capacity: Option<usize>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Watch(input)) => cmd_watch(input).await,
        None => cmd_watch(InputArgs::default()).await,
        Some(Commands::Summary {
            input,
            tail,
            order_by,
            descending,
        }) => cmd_summary(input, tail, order_by.as_deref(), descending).await,
    }
}

async fn cmd_watch(input: InputArgs) -> Result<()> {
    let config = load_config(&input)?;

    // Rows are printed by a dedicated thread, the way a UI thread would own
    // its widgets.
    let (sink, pump) = handoff::channel(config.delivery);
    let printer = thread::spawn(move || pump.run_blocking(&ConsoleSink));

    let engine = Engine::from_config(&config, sink)?;
    let engine = ingest(engine, input.file.as_deref()).await?;

    let trees = render_trees(&engine);
    let count = engine.count();
    drop(engine);
    join_printer(printer)?;

    println!();
    print!("{trees}");
    println!("{count} events retained");
    Ok(())
}

async fn cmd_summary(
    input: InputArgs,
    tail: usize,
    order_by: Option<&str>,
    descending: bool,
) -> Result<()> {
    let config = load_config(&input)?;
    let engine = Engine::from_config(&config, NullSink)?;
    let engine = ingest(engine, input.file.as_deref()).await?;

    print!("{}", render_trees(&engine));

    let mut order = config.order();
    if let Some(name) = order_by {
        order = OrderBy::new(SortColumn::from_name(name), SortDirection::Ascending);
    }
    if descending {
        order.direction = SortDirection::Descending;
    }

    let mut events = engine.snapshot();
    let mut newest = events.split_off(events.len().saturating_sub(tail));
    order.sort(&mut newest);

    println!(
        "\n{} of {} events retained ({} received), by {}:",
        newest.len(),
        engine.count(),
        engine.ids_assigned(),
        order.column
    );
    for event in &newest {
        println!("{}", format_row(event));
    }
    Ok(())
}

/// Feed every event from the input into the engine and hand it back once the
/// input is exhausted.
async fn ingest(engine: Engine, file: Option<&Path>) -> Result<Engine> {
    let mut rx = match file {
        Some(path) => stream::start_stream(tokio::fs::File::open(path).await?),
        None => stream::start_stream(tokio::io::stdin()),
    };

    // Submitting may block on the presentation thread, so keep it off the
    // async workers.
    let engine = tokio::task::spawn_blocking(move || -> Result<Engine> {
        while let Some(event) = rx.blocking_recv() {
            engine.submit(event)?;
        }
        Ok(engine)
    })
    .await??;

    Ok(engine)
}

/// Wait for the printer thread once every sink has been dropped.
fn join_printer(printer: thread::JoinHandle<()>) -> Result<()> {
    printer.join().map_err(|_| {
        error!("printer thread panicked, output is incomplete");
        Error::PrinterPanicked
    })
}

fn render_trees(engine: &Engine) -> String {
    AttributeKind::ALL
        .into_iter()
        .map(|kind| engine.with_index(kind, |index| render_tree(kind, index)))
        .collect()
}

fn load_config(input: &InputArgs) -> Result<EngineConfig> {
    let mut config = match &input.config {
        Some(path) => EngineConfig::load(path)?,
        None if Path::new(CONFIG_FILE).exists() => EngineConfig::load(CONFIG_FILE)?,
        None => EngineConfig::default(),
    };

    if let Some(capacity) = input.capacity {
        config.capacity = capacity;
    }
    config.validate()?;

    if config.filter.is_permissive() {
        debug!("no admission rules, admitting every event");
    } else {
        info!(rules = ?config.filter, "admission rules active");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_printer_ok() {
        let printer = thread::spawn(|| {});
        assert!(join_printer(printer).is_ok());
    }

    #[test]
    fn test_join_printer_reports_panic() {
        let printer = thread::spawn(|| panic!("printer failed"));
        assert!(matches!(
            join_printer(printer),
            Err(Error::PrinterPanicked)
        ));
    }

    #[test]
    fn test_capacity_flag_overrides_config() {
        let input = InputArgs {
            config: None,
            file: None,
            capacity: Some(3),
        };
        let config = load_config(&input).unwrap();
        assert_eq!(config.capacity, 3);

        let zero = InputArgs {
            capacity: Some(0),
            ..InputArgs::default()
        };
        assert!(matches!(load_config(&zero), Err(Error::Config(_))));
    }
}
