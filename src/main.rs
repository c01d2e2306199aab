//! Contacts Book
//!
//! Interactive address-book shell. With no subcommand the menu loop runs on
//! stdin/stdout; `list` prints a file's contacts and exits.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use contactbook::{
    core::store::ContactStore,
    persist::file::FileSource,
    shell::session::{Shell, ShellConfig},
};

/// Contacts Book - interactive address-book manager
#[derive(Parser)]
#[command(name = "contactbook")]
#[command(version)]
#[command(about = "Manage a comma-delimited address book from a text menu")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Contacts file to load before the menu starts
    #[arg(short, long, env = "CONTACTBOOK_FILE")]
    file: Option<PathBuf>,

    /// Do not clear the terminal between menu screens
    #[arg(long)]
    no_clear: bool,

    /// Store without asking when the target file already exists
    #[arg(long)]
    no_confirm_overwrite: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the contacts of a file and exit
    List {
        /// Contacts file to read
        path: PathBuf,
        /// Print a JSON array instead of numbered lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Some(Commands::List { path, json }) => list(&path, json),
        None => {
            let config = ShellConfig {
                confirm_overwrite: !cli.no_confirm_overwrite,
                clear_screen: !cli.no_clear,
            };
            interactive(cli.file, config)
        }
    }
}

fn load(path: &Path) -> Result<ContactStore> {
    let mut store = ContactStore::new();
    store
        .load(&mut FileSource::open(path))
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(store)
}

fn list(path: &Path, json: bool) -> Result<()> {
    let store = load(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(store.contacts())?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No contacts found.");
    }
    for (position, contact) in store.list() {
        println!("{position}. {contact}");
    }
    Ok(())
}

fn interactive(file: Option<PathBuf>, config: ShellConfig) -> Result<()> {
    let store = match file {
        Some(path) => load(&path)?,
        None => ContactStore::new(),
    };
    tracing::info!("Starting shell with {} contacts", store.len());

    let stdin = io::stdin();
    let mut shell = Shell::new(store, stdin.lock(), io::stdout(), config);
    shell.run()?;
    Ok(())
}
