#[cfg(feature = "server")]
pub mod app;
#[cfg(feature = "server")]
pub mod handlers;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use crate::database::{connection::*, migrations::Migrator};
use anyhow::Result;
use sea_orm_migration::prelude::*;
use tracing::info;

#[cfg(feature = "server")]
pub async fn start_server(
    port: u16,
    database_path: &str,
    cors_origin: Option<&str>,
    config: crate::config::CaseStatsConfig,
) -> Result<()> {
    use crate::report::{resolve_cjk_family, SystemFonts};
    use crate::services::CaseStatsService;

    let database_url = get_database_url(Some(database_path));
    let db = connect_and_migrate(&database_url).await?;
    info!("Database migrations completed");

    let font_family = resolve_cjk_family(&SystemFonts::default());
    info!("Chart font family: {}", font_family);
    if config.dify.is_none() {
        info!("No narrative workflow key configured, reports use default slide text");
    }
    info!("Reports are written under {}", config.report_dir.display());

    let service = CaseStatsService::new(db, &config, &font_family);
    let app = app::create_app(service, cors_origin)?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "server")]
fn log_routes() {
    info!("API Endpoints:");
    info!("  GET  /health                                       - Health check");
    info!("  POST /api/case-stats/import-excel                  - Import a spreadsheet");
    info!("  GET  /api/case-stats/batches                       - List batches");
    info!("  GET  /api/case-stats/batches/:id/details           - Batch details");
    info!("  GET  /api/case-stats/batches/:id/analysis          - Batch views and charts");
    info!("  POST /api/case-stats/batches/:id/report            - Regenerate report");
    info!("  GET  /api/case-stats/batches/:id/report-download   - Download report");
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}
