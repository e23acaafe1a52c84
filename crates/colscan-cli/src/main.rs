#![allow(clippy::doc_markdown)]
//! `colscan` CLI - scalar vs SIMD scans over a dictionary-encoded column
//!
//! Usage:
//!   `colscan compare`
//!   `colscan compare --repetitions 100000 --value apple --distinct apricot --prefix ap`
//!   `colscan backends`
//!   `colscan kv --key hello --value world`

mod report;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colscan_core::{
    compare_equality, compare_prefix, compare_prefix_rows, scan_features_info, BackendPreference,
    ColscanConfig, DictionaryEncoder, FanOut, KeyValueStore, LoggingConfig, ScanBackend,
    VectorScanner,
};

use report::{CompareReport, ComparisonRow, EncodeSummary};

#[derive(Parser)]
#[command(name = "colscan")]
#[command(
    author,
    version,
    about = "colscan - dictionary encoding with scalar and SIMD scans"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./colscan.toml when present)
    #[arg(short, long, global = true, env = "COLSCAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI backend option
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Auto,
    Scalar,
    Portable,
    Native,
}

impl From<BackendArg> for BackendPreference {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Auto => BackendPreference::Auto,
            BackendArg::Scalar => BackendPreference::Scalar,
            BackendArg::Portable => BackendPreference::Portable,
            BackendArg::Native => BackendPreference::Native,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a column, then run each query through both scan paths
    Compare {
        /// Copies of the repeated value
        #[arg(short, long, default_value_t = 1000)]
        repetitions: usize,

        /// The repeated value
        #[arg(long, default_value = "test")]
        value: String,

        /// One distinct value appended after the repetitions
        #[arg(long, default_value = "test1")]
        distinct: String,

        /// Equality query (defaults to the distinct value)
        #[arg(short, long)]
        query: Option<String>,

        /// Prefix query (defaults to the repeated value)
        #[arg(short, long)]
        prefix: Option<String>,

        /// Encode workers (overrides `[encode] workers`)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Scan backend (overrides `[scan] backend`)
        #[arg(short, long, value_enum)]
        backend: Option<BackendArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show detected CPU features and usable scan backends
    Backends,

    /// Run put/get/delete against the key-value store
    Kv {
        /// Key
        #[arg(long, default_value = "hello")]
        key: String,

        /// Value
        #[arg(long, default_value = "world")]
        value: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ColscanConfig::load_from_path(path)?,
        None => ColscanConfig::load()?,
    };
    config.validate()?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Compare {
            repetitions,
            value,
            distinct,
            query,
            prefix,
            workers,
            backend,
            format,
        } => {
            let mut config = config;
            if let Some(workers) = workers {
                config.encode.workers = workers;
            }
            if let Some(backend) = backend {
                config.scan.backend = backend.into();
            }
            let query = query.unwrap_or_else(|| distinct.clone());
            let prefix = prefix.unwrap_or_else(|| value.clone());

            let mut column = vec![value; repetitions];
            column.push(distinct);

            let report = run_compare(&config, &column, &query, &prefix)?;
            match format {
                OutputFormat::Table => report::print_table(&report),
                OutputFormat::Json => report::print_json(&report)?,
            }

            if !report.all_agree() {
                anyhow::bail!("scalar and vector scans disagree");
            }
        }
        Commands::Backends => print_backends(&VectorScanner::new(config.scan.options())),
        Commands::Kv { key, value } => run_kv(&key, &value),
    }

    Ok(())
}

/// Installs the subscriber; `RUST_LOG` overrides the configured level.
///
/// Logs go to stderr so JSON reports on stdout stay parseable.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let (text, json) = if logging.format == "json" {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

fn run_compare(
    config: &ColscanConfig,
    column: &[String],
    query: &str,
    prefix: &str,
) -> anyhow::Result<CompareReport> {
    let fan_out = FanOut::from_config(&config.encode);
    let encoder = DictionaryEncoder::new();

    let start = Instant::now();
    encoder.encode_parallel(column, &fan_out)?;
    let encode_us = start.elapsed().as_secs_f64() * 1e6;

    // Encoding has joined; scans read a fixed copy
    let snapshot = encoder.snapshot();
    let scanner = VectorScanner::new(config.scan.options());
    tracing::info!(
        rows = snapshot.len(),
        distinct = snapshot.distinct_count(),
        backend = scanner.backend().name(),
        "Column encoded"
    );

    let equality = compare_equality(&encoder, &snapshot, &scanner, query)?;
    let prefix_codes = compare_prefix(&encoder, &snapshot, &scanner, prefix)?;
    let prefix_rows = compare_prefix_rows(column, &scanner, prefix)?;

    Ok(CompareReport {
        encode: EncodeSummary {
            rows: snapshot.len(),
            distinct: snapshot.distinct_count(),
            workers: fan_out.workers(),
            encode_us,
        },
        comparisons: vec![
            ComparisonRow::from(&equality),
            ComparisonRow::from(&prefix_codes),
            ComparisonRow::from(&prefix_rows),
        ],
    })
}

fn print_backends(configured: &VectorScanner) {
    let features = scan_features_info();
    println!(
        "{} {} ({})",
        "CPU features:".bold(),
        features.summary(),
        std::env::consts::ARCH
    );

    let detected = ScanBackend::detected();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("backend").fg(Color::Cyan),
        Cell::new("vectorized").fg(Color::Cyan),
        Cell::new("status").fg(Color::Cyan),
    ]);

    for backend in ScanBackend::available() {
        let mut status = Vec::new();
        if backend == detected {
            status.push("detected");
        }
        if backend == configured.backend() {
            status.push("configured");
        }
        table.add_row(vec![
            Cell::new(backend.name()),
            Cell::new(if backend.is_vectorized() { "yes" } else { "no" }),
            Cell::new(status.join(", ")),
        ]);
    }

    println!("{table}");
}

fn run_kv(key: &str, value: &str) {
    let store = KeyValueStore::new();

    store.put(key, value);
    println!("{} {key} = {value}", "put".green());

    match store.get(key) {
        Some(found) => println!("{} {key} -> {found}", "get".green()),
        None => println!("{} {key} -> {}", "get".green(), "not found".dimmed()),
    }

    let deleted = store.delete(key);
    println!("{} {key} ({})", "del".green(), if deleted { "removed" } else { "absent" });

    match store.get(key) {
        Some(found) => println!("{} {key} -> {found}", "get".green()),
        None => println!("{} {key} -> {}", "get".green(), "not found".dimmed()),
    }
}
