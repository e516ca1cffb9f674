mod progress;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{BATCH_SIZE, Dataset, ImdbLoader, LoadReport, LoaderConfig, NoProgress, SqliteStore};
use progress::BarProgress;
use std::path::{Path, PathBuf};

/// imdb-load - IMDb dataset loader
#[derive(Parser)]
#[command(name = "imdb-load")]
#[command(about = "Load IMDb dataset dumps into a SQLite database", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "IMDB_DATABASE", default_value = "imdb.sqlite3")]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dataset files from a directory
    Load {
        /// Directory holding the *.tsv.gz dataset files
        #[arg(long, env = "IMDB_DATASET_PATH")]
        path: PathBuf,

        /// Records per bulk insert
        #[arg(long, env = "IMDB_BATCH_SIZE", default_value_t = BATCH_SIZE)]
        batch_size: usize,

        /// Optional datasets to load after the default ones (akas, episodes, principals)
        #[arg(long, value_delimiter = ',')]
        include: Vec<Dataset>,

        /// Enforce foreign keys while loading
        #[arg(long)]
        foreign_keys: bool,

        /// Hide progress bars
        #[arg(short, long)]
        quiet: bool,
    },

    /// Create the schema and seed the reference tables
    InitDb,

    /// Show row counts per table
    Stats {
        /// Print counts as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Load {
            path,
            batch_size,
            include,
            foreign_keys,
            quiet,
        } => {
            let config = LoaderConfig {
                batch_size,
                extra: include,
            };
            handle_load(&cli.database, &path, config, foreign_keys, quiet)?
        }
        Commands::InitDb => handle_init_db(&cli.database)?,
        Commands::Stats { json } => handle_stats(&cli.database, json)?,
    }

    Ok(())
}

fn open_store(database: &Path) -> Result<SqliteStore> {
    SqliteStore::open(database)
        .with_context(|| format!("Failed to open database {}", database.display()))
}

/// Handle the 'load' command
fn handle_load(
    database: &Path,
    data_dir: &Path,
    config: LoaderConfig,
    foreign_keys: bool,
    quiet: bool,
) -> Result<()> {
    let loader = ImdbLoader::new(config).context("Invalid load options")?;
    let mut store = open_store(database)?;
    store.set_foreign_keys(foreign_keys)?;

    println!(
        "Loading IMDb datasets from {} into {}...",
        data_dir.display(),
        database.display()
    );
    let report = if quiet {
        loader.load(data_dir, &mut store, &mut NoProgress)
    } else {
        loader.load(data_dir, &mut store, &mut BarProgress::new())
    }
    .with_context(|| format!("Failed to load IMDb datasets from {}", data_dir.display()))?;

    print_summary(&report);
    Ok(())
}

/// Handle the 'init-db' command
fn handle_init_db(database: &Path) -> Result<()> {
    let store = open_store(database)?;
    let counts = store.table_counts()?;
    println!("{} Schema ready in {}", "✓".green(), database.display());
    for (table, count) in counts.iter().filter(|(_, count)| *count > 0) {
        println!("  {} {}: {} rows", "•".cyan(), table, count);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(database: &Path, json: bool) -> Result<()> {
    let store = open_store(database)?;
    let counts = store
        .table_counts()
        .context("Failed to count table rows")?;

    if json {
        let tables: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(table, count)| (table.to_string(), (*count).into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    println!("{}", format!("Tables in {}:", database.display()).bold().blue());
    for (table, count) in counts {
        println!("  {:<20} {:>12}", table, count);
    }
    Ok(())
}

fn print_summary(report: &LoadReport) {
    let skipped: u64 = report.datasets.iter().map(|d| d.rows_skipped).sum();
    let associations: u64 = report.datasets.iter().map(|d| d.associations_written).sum();
    println!(
        "{} Loaded {} datasets: {} records, {} associations in {:?}",
        "✓".green(),
        report.datasets.len(),
        report.records_written().to_string().bold(),
        associations,
        report.elapsed
    );
    if skipped > 0 {
        println!("{}", format!("  {skipped} malformed rows skipped").yellow());
    }
}
