//! inventory - command-line inventory manager
//!
//! This is the main entry point for the `inventory` tool.
//! It wires together:
//! - Configuration loading
//! - Store path resolution and store initialization
//! - The add / list / search / summary / check commands
//! - Text or JSON rendering

mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inventory_config::{LOG_LEVELS, Settings, load_config_or_default};
use inventory_store::{CsvStore, DEFAULT_LOCATION, ListFilter, NewItem, Store, StoreOptions};
use inventory_util::{default_config_path, default_store_path, expand_tilde};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

/// inventory - CSV-backed personal inventory
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(about = "CSV-backed personal inventory", long_about = None)]
struct Args {
    /// Store file path (default: ~/projects/inventory-manager/inventory.csv)
    #[arg(short, long, env = "INVENTORY_STORE", global = true)]
    store: Option<PathBuf>,

    /// Configuration file path (default: ~/.config/inventory/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path(), global = true)]
    config: PathBuf,

    /// Log level (overrides the config file; RUST_LOG overrides both)
    #[arg(
        short,
        long,
        global = true,
        value_parser = clap::builder::PossibleValuesParser::new(LOG_LEVELS.iter().copied())
    )]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add an item
    Add {
        name: String,
        category: String,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        #[arg(long, default_value = DEFAULT_LOCATION)]
        location: String,

        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// List items, optionally filtered
    List {
        /// Only items in this category (case-sensitive)
        #[arg(long)]
        category: Option<String>,

        /// Only items with quantity of 2 or less
        #[arg(long)]
        low_stock: bool,
    },

    /// Find items whose name or notes contain QUERY (case-insensitive)
    Search { query: String },

    /// Totals per category and the first few items
    Summary,

    /// Scan the store for corrupt rows and duplicate ids
    Check,

    /// Add the sample items and show a summary, a search and the full list
    Demo,
}

/// Resolve the store path: --store / $INVENTORY_STORE, then config, then default
fn store_path(args: &Args, settings: &Settings) -> PathBuf {
    args.store
        .as_ref()
        .map(expand_tilde)
        .or_else(|| settings.store.path.clone())
        .unwrap_or_else(default_store_path)
}

fn open_store(path: &Path, settings: &Settings) -> Result<CsvStore> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory {:?}", parent))?;
    }

    let options = StoreOptions {
        id_policy: settings.store.id_policy,
        lock: settings.store.lock,
    };
    let store = CsvStore::open_with(path, options)
        .with_context(|| format!("Failed to open store {:?}", path))?;

    info!(
        store_path = %path.display(),
        id_policy = %options.id_policy,
        lock = options.lock,
        "Store initialized"
    );
    Ok(store)
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn run(args: Args, settings: Settings) -> Result<ExitCode> {
    let path = store_path(&args, &settings);
    let store = open_store(&path, &settings)?;
    let json = args.json;

    match args.command {
        Command::Add {
            name,
            category,
            quantity,
            location,
            notes,
        } => {
            let item = NewItem::new(name, category)
                .quantity(quantity)
                .location(location)
                .notes(notes);
            let added = store.add(item).context("Failed to add item")?;
            emit(json, &added, render::added)?;
        }

        Command::List {
            category,
            low_stock,
        } => {
            let filter = ListFilter {
                category,
                low_stock,
            };
            debug!(?filter, "Listing items");
            let items = store.list(&filter).context("Failed to list items")?;
            emit(json, &items, |r| render::records(r))?;
        }

        Command::Search { query } => {
            let hits = store.search(&query).context("Failed to search items")?;
            emit(json, &hits, |r| render::matches(r))?;
        }

        Command::Summary => {
            let summary = store.summarize().context("Failed to summarize store")?;
            emit(json, &summary, render::summary)?;
        }

        Command::Check => {
            let health = store.verify().context("Failed to verify store")?;
            emit(json, &health, render::health)?;
            if !health.is_healthy() {
                return Ok(ExitCode::from(1));
            }
        }

        Command::Demo => run_demo(&store, json)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn run_demo(store: &CsvStore, json: bool) -> Result<()> {
    let samples = [
        NewItem::new("Opus One 2019", "Wine")
            .quantity(3)
            .location("Cellar A")
            .notes("Premium Napa"),
        NewItem::new("PGA Tour Merchandise", "Apparel")
            .quantity(12)
            .location("Shelf 1")
            .notes("Various"),
        NewItem::new("Titleist Pro V1", "Golf")
            .quantity(2)
            .location("Bag")
            .notes("Practice balls"),
        NewItem::new("Kirkland Signature Vodka", "Spirits")
            .quantity(1)
            .location("Bar")
            .notes("For guests"),
    ];

    let mut added = Vec::with_capacity(samples.len());
    for item in samples {
        added.push(store.add(item).context("Failed to add sample item")?);
    }

    let summary = store.summarize()?;
    let hits = store.search("wine")?;
    let items = store.list(&ListFilter::all())?;

    if json {
        let report = serde_json::json!({
            "added": added,
            "summary": summary,
            "search": { "query": "wine", "results": hits },
            "items": items,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("INVENTORY MANAGER");
    println!("{}", "=".repeat(50));
    println!();
    println!("SUMMARY");
    println!("{}", render::summary(&summary));
    println!();
    println!("SEARCH 'wine':");
    println!("{}", render::matches(&hits));
    println!();
    println!("ALL ITEMS:");
    println!("{}", render::records(&items));
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging before reading the config; a level from the
    // config file is swapped in once it is loaded
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let filter = env_filter
        .unwrap_or_else(|| EnvFilter::new(args.log_level.as_deref().unwrap_or("warn")));
    let (filter, filter_handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config_path = %args.config.display(),
        "inventory starting"
    );

    let settings = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    if !from_env
        && args.log_level.is_none()
        && let Some(level) = &settings.log_level
    {
        filter_handle
            .reload(EnvFilter::new(level))
            .context("Failed to apply configured log level")?;
        debug!(level = %level, "Log level set from config");
    }

    run(args, settings)
}
