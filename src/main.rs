use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use casestats::config::CaseStatsConfig;
use casestats::database::{connect_and_migrate, get_database_url, DEFAULT_DATABASE_FILE};
use casestats::report::{resolve_cjk_family, SystemFonts};
use casestats::server;
use casestats::services::CaseStatsService;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    #[cfg(feature = "server")]
    Serve {
        #[clap(short, long, default_value = "8080")]
        port: u16,
        #[clap(short, long, default_value = DEFAULT_DATABASE_FILE)]
        database: String,
        #[clap(long)]
        cors_origin: Option<String>,
        /// Overrides CASESTATS_REPORT_DIR
        #[clap(long)]
        report_dir: Option<PathBuf>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Import a spreadsheet and generate its report without the server
    Import {
        #[clap(short, long)]
        file: PathBuf,
        #[clap(short, long, default_value = DEFAULT_DATABASE_FILE)]
        database: String,
        #[clap(long)]
        report_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long, default_value = DEFAULT_DATABASE_FILE)]
        database: String,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long, default_value = DEFAULT_DATABASE_FILE)]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        #[cfg(feature = "server")]
        Commands::Serve {
            port,
            database,
            cors_origin,
            report_dir,
        } => {
            info!("Starting server on port {}", port);
            let config = load_config(report_dir);
            server::start_server(port, &database, cors_origin.as_deref(), config).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                info!("Initializing database: {}", database);
                server::migrate_database(&database, server::MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&database, direction).await?;
            }
        },
        Commands::Import {
            file,
            database,
            report_dir,
        } => {
            info!("Importing {}", file.display());
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let db = connect_and_migrate(&get_database_url(Some(&database))).await?;
            let font_family = resolve_cjk_family(&SystemFonts::default());
            let service = CaseStatsService::new(db, &load_config(report_dir), &font_family);

            let summary = service.import_excel(bytes).await?;
            info!(
                "Imported batch {} with {} records",
                summary.analysis.batch_no, summary.record_count
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn load_config(report_dir: Option<PathBuf>) -> CaseStatsConfig {
    let config = CaseStatsConfig::from_env();
    match report_dir {
        Some(dir) => config.with_report_dir(dir),
        None => config,
    }
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .without_time()
        .init();
}
