//! Triage CLI - Filtered hospital reports and exports
//!
//! Usage:
//!   triage export <entity> [--format csv|document] [--filter key=value]... [--out <path>]
//!   triage serve [--bind <addr>]
//!   triage init-db [--seed]
//!   triage entities
//!
//! Examples:
//!   triage export appointments --filter status=completed --filter start_date=2024-01-01
//!   triage export invoices --format document --out invoices.html
//!   triage init-db --seed

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use triage::config::Settings;
use triage::report::{entities, AdminContext, ReportEngine};
use triage::store::SqliteStore;

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Triage - Filtered reports and exports for hospital administration")]
#[command(version)]
struct Cli {
    /// Path to a triage.toml (overrides the default search)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a report as CSV or a printable document
    Export {
        /// Entity to report on (see `triage entities`)
        entity: String,

        /// csv, document, pdf, excel, xlsx or print
        #[arg(short, long)]
        format: Option<String>,

        /// Filter as key=value; repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Output file (defaults to the artifact's filename)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Serve the admin report endpoints
    #[cfg(feature = "server")]
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Create the database schema
    InitDb {
        /// Also load the demonstration records
        #[arg(long)]
        seed: bool,
    },

    /// List available reports and their filters
    Entities,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // TRIAGE_LOG, then RUST_LOG, then the configured filter
    let filter = EnvFilter::try_from_env("TRIAGE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export {
            entity,
            format,
            filters,
            out,
        } => cmd_export(&settings, &entity, format.as_deref(), filters, out),
        #[cfg(feature = "server")]
        Commands::Serve { bind } => cmd_serve(settings, bind),
        Commands::InitDb { seed } => cmd_init_db(&settings, seed),
        Commands::Entities => cmd_entities(),
    }
}

fn open_store(settings: &Settings) -> Result<SqliteStore, String> {
    let path = settings.database.resolved_path().map_err(|e| e.to_string())?;
    SqliteStore::open(&path).map_err(|e| format!("Error opening '{}': {}", path.display(), e))
}

fn cmd_export(
    settings: &Settings,
    entity: &str,
    format: Option<&str>,
    filters: Vec<(String, String)>,
    out: Option<PathBuf>,
) -> ExitCode {
    let Some(descriptor) = entities::lookup(entity) else {
        eprintln!("Unknown report: {}", entity);
        eprintln!("Available: {}", entities::ENTITIES.join(", "));
        return ExitCode::FAILURE;
    };

    let store = match open_store(settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let raw: HashMap<String, String> = filters.into_iter().collect();
    let engine = ReportEngine::new(settings.to_export_options());
    let ctx = AdminContext::new(true, &store);
    let generated_at = chrono::Local::now().naive_local();

    let artifact = match engine.export(&ctx, &descriptor, &raw, format, generated_at) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Export failed: {}", e);
            if let Some(cause) = std::error::Error::source(&e) {
                eprintln!("  caused by: {}", cause);
            }
            return ExitCode::FAILURE;
        }
    };

    let path = out.unwrap_or_else(|| PathBuf::from(artifact.filename()));
    if let Err(e) = fs::write(&path, artifact.bytes()) {
        eprintln!("Error writing '{}': {}", path.display(), e);
        return ExitCode::FAILURE;
    }

    println!("{} ({} bytes)", path.display(), artifact.bytes().len());
    ExitCode::SUCCESS
}

#[cfg(feature = "server")]
fn cmd_serve(mut settings: Settings, bind: Option<String>) -> ExitCode {
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(triage::web::serve(&settings)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_init_db(settings: &Settings, seed: bool) -> ExitCode {
    let store = match open_store(settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = store.init_schema().and_then(|()| if seed { store.seed() } else { Ok(()) });
    match result {
        Ok(()) => {
            println!(
                "Initialized {}{}",
                settings.database.path,
                if seed { " with demonstration data" } else { "" }
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error initializing database: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_entities() -> ExitCode {
    for descriptor in entities::all() {
        println!("{} - {}", descriptor.entity, descriptor.title);
        for filter in &descriptor.filters {
            println!("    {:<14} {}", filter.param_names().join(", "), filter.label);
        }
    }
    ExitCode::SUCCESS
}
