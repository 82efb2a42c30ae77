use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::batch_store::{BatchAnalysis, BatchStore, ReportArtifacts, ReportFile};
use crate::config::CaseStatsConfig;
use crate::database::entities::{case_stats_batch, case_stats_detail};
use crate::errors::{CaseStatsError, CaseStatsResult};
use crate::narrative::{resolve_narrative, DifyClient, NarrativeSource};
use crate::report::{ChartRenderer, ReportAssembler};
use crate::stats::{build_analysis, parse_details, CaseDetail};

/// Result of a successful import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub record_count: i32,
    pub imported_at: NaiveDateTime,
    #[serde(flatten)]
    pub analysis: BatchAnalysis,
}

/// Runs the import pipeline: parse, persist, aggregate, render, narrate, assemble.
#[derive(Clone)]
pub struct CaseStatsService {
    store: BatchStore,
    renderer: ChartRenderer,
    assembler: ReportAssembler,
    narrative: Option<Arc<dyn NarrativeSource>>,
    report_root: PathBuf,
}

impl CaseStatsService {
    /// Build the service from configuration. An unusable narrative client is
    /// logged and skipped; reports then carry the default slide text.
    pub fn new(db: DatabaseConnection, config: &CaseStatsConfig, font_family: &str) -> Self {
        let narrative = config.dify.clone().and_then(|dify| match DifyClient::new(dify) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn NarrativeSource>),
            Err(err) => {
                warn!("Narrative workflow client unavailable: {}", err);
                None
            }
        });

        Self {
            store: BatchStore::new(db),
            renderer: ChartRenderer::new(font_family),
            assembler: ReportAssembler::new(font_family),
            narrative,
            report_root: config.report_dir.clone(),
        }
    }

    pub fn with_narrative(mut self, narrative: Option<Arc<dyn NarrativeSource>>) -> Self {
        self.narrative = narrative;
        self
    }

    pub fn store(&self) -> &BatchStore {
        &self.store
    }

    pub fn report_root(&self) -> &PathBuf {
        &self.report_root
    }

    pub async fn import_excel(&self, bytes: Vec<u8>) -> CaseStatsResult<ImportSummary> {
        if bytes.is_empty() {
            return Err(CaseStatsError::EmptyFile);
        }

        let details = tokio::task::spawn_blocking(move || parse_details(&bytes))
            .await
            .map_err(|err| CaseStatsError::Task(err.to_string()))??;
        info!("Parsed {} detail rows from upload", details.len());

        let imported_at = now();
        let batch = self.store.create_batch(&details, imported_at).await?;
        let analysis = self.generate_report(&batch, details).await?;

        Ok(ImportSummary {
            record_count: batch.record_count,
            imported_at: batch.imported_at,
            analysis,
        })
    }

    pub async fn list_batches(&self) -> CaseStatsResult<Vec<case_stats_batch::Model>> {
        self.store.list_batches().await
    }

    pub async fn list_details(&self, batch_id: i32) -> CaseStatsResult<Vec<case_stats_detail::Model>> {
        self.store.list_details(batch_id).await
    }

    pub async fn get_analysis(&self, batch_id: i32) -> CaseStatsResult<BatchAnalysis> {
        self.store.get_analysis(batch_id).await
    }

    pub async fn report_file(&self, batch_id: i32) -> CaseStatsResult<ReportFile> {
        self.store.report_file(batch_id).await
    }

    /// Rebuild views, charts and deck from the stored details of a batch.
    pub async fn regenerate_report(&self, batch_id: i32) -> CaseStatsResult<BatchAnalysis> {
        let batch = self.store.get_batch(batch_id).await?;
        let details: Vec<CaseDetail> = self
            .store
            .list_details(batch_id)
            .await?
            .into_iter()
            .map(CaseDetail::from)
            .collect();
        info!("Regenerating report for batch {} ({} details)", batch.id, details.len());
        self.generate_report(&batch, details).await
    }

    async fn generate_report(
        &self,
        batch: &case_stats_batch::Model,
        details: Vec<CaseDetail>,
    ) -> CaseStatsResult<BatchAnalysis> {
        let analysis = build_analysis(&details, today());
        let narrative = resolve_narrative(self.narrative.as_deref(), &analysis).await;

        let dir = self.report_root.join(&batch.batch_no);
        let renderer = self.renderer.clone();
        let assembler = self.assembler.clone();
        let imported_at = batch.imported_at;
        let (analysis, artifacts) = tokio::task::spawn_blocking(move || {
            let charts = renderer.render_all(&analysis, &dir)?;
            let report_file = assembler.write_report(&dir, &charts, &narrative, imported_at)?;
            Ok::<_, CaseStatsError>((analysis, ReportArtifacts::new(&charts, report_file)))
        })
        .await
        .map_err(|err| CaseStatsError::Task(err.to_string()))??;

        self.store
            .record_report(batch.id, &analysis, &artifacts, now())
            .await?;
        self.store.get_analysis(batch.id).await
    }
}

fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    async fn service(root: &std::path::Path) -> CaseStatsService {
        let config = CaseStatsConfig::default().with_report_dir(root);
        CaseStatsService::new(setup_test_db().await, &config, "sans-serif")
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path()).await.import_excel(Vec::new()).await;
        assert!(matches!(result, Err(CaseStatsError::EmptyFile)));
    }

    #[tokio::test]
    async fn test_unreadable_upload_creates_no_batch() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path()).await;
        let result = service.import_excel(b"not a workbook".to_vec()).await;
        assert!(matches!(result, Err(CaseStatsError::InvalidSpreadsheet(_))));
        assert!(service.list_batches().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_regenerate_unknown_batch() {
        let dir = tempfile::tempdir().unwrap();
        let result = service(dir.path()).await.regenerate_report(5).await;
        assert!(matches!(result, Err(CaseStatsError::BatchNotFound(5))));
    }

    #[tokio::test]
    async fn test_regenerate_fills_report_fields() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path()).await;
        let details = vec![CaseDetail {
            serial_no: "1".to_string(),
            district: "西区".to_string(),
            street_town: "南街".to_string(),
            case_type: "邻里".to_string(),
            register_time: today().format("%Y-%m-%d").to_string(),
            current_status: "已办结".to_string(),
            ..Default::default()
        }];
        let batch = service.store().create_batch(&details, now()).await.unwrap();

        let analysis = service.regenerate_report(batch.id).await.unwrap();
        assert_eq!(analysis.time_trend.values().sum::<u64>(), 1);
        assert_eq!(analysis.street_top10.get("南街"), Some(&1));
        assert!(analysis.report_generated_at.is_some());

        let file = service.report_file(batch.id).await.unwrap();
        assert!(file.path.starts_with(dir.path().join(&batch.batch_no)));
        assert!(dir.path().join(&batch.batch_no).join("time-trend.png").exists());
    }
}
