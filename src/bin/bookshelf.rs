//! Bookshelf Binary
//!
//! Opens the record file and runs the interactive menu on stdin/stdout.

use std::io;

use bookshelf::{Config, Controller, FileStore, SyncMode};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Bookshelf
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Manage book records stored in a local binary file")]
#[command(version)]
struct Args {
    /// Backing data file
    #[arg(short, long, default_value = "books.dat")]
    data_file: String,

    /// fsync after every write
    #[arg(long)]
    sync: bool,
}

fn main() {
    // Logs go to stderr so they never interleave with the menu
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("Bookshelf v{}", bookshelf::VERSION);
    tracing::info!("Data file: {}", args.data_file);

    let sync_mode = if args.sync {
        SyncMode::EveryWrite
    } else {
        SyncMode::Never
    };

    let config = Config::builder()
        .data_file(&args.data_file)
        .sync_mode(sync_mode)
        .build();

    let store = match FileStore::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open record store: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut controller = Controller::new(&store, stdin.lock(), io::stdout());
    if let Err(e) = controller.run() {
        tracing::error!("Terminal I/O failed: {}", e);
        std::process::exit(1);
    }
}
