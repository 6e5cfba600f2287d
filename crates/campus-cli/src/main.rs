//! Campus CLI - inspect and edit the persisted collections.
//!
//! This is the entry point for the `campus` binary. Backend selection comes
//! from `CAMPUS_BACKEND`, `CAMPUS_DATA_DIR` and `CAMPUS_QUOTA_BYTES`; the
//! `--data-dir` flag takes precedence over the variable.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_store::StoreConfig;

/// Campus CLI - inspect and edit the persisted collections.
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database directory.
    #[arg(long, env = "CAMPUS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the demo data into every collection that is still empty.
    Seed,
    /// List stored collection keys.
    Collections,
    /// Print a collection as JSON.
    List {
        /// Collection key, e.g. `students`.
        key: String,
    },
    /// Insert a JSON object at the front of a collection.
    Add {
        /// Collection key.
        key: String,
        /// The record as a JSON object; an id is generated if absent.
        json: String,
    },
    /// Merge JSON fields into one record.
    Patch {
        /// Collection key.
        key: String,
        /// Id of the record to change.
        id: String,
        /// Fields to overwrite, as a JSON object.
        json: String,
    },
    /// Remove one record.
    Remove {
        /// Collection key.
        key: String,
        /// Id of the record to remove.
        id: String,
    },
}

/// Log filter used when `RUST_LOG` is unset.
const fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info,campus=debug"
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(args.debug).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(?config, "Store configuration loaded");

    let store = config.open()?;

    let output = match args.command {
        Command::Seed => commands::seed(&store),
        Command::Collections => commands::collections(&store),
        Command::List { key } => commands::list(&store, &key)?,
        Command::Add { key, json } => commands::add(&store, &key, &json)?,
        Command::Patch { key, id, json } => commands::patch(&store, &key, &id, &json)?,
        Command::Remove { key, id } => commands::remove(&store, &key, &id),
    };

    println!("{output}");
    Ok(())
}
