use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::entities::{case_stats_batch, case_stats_detail};
use crate::errors::{CaseStatsError, CaseStatsResult};
use crate::report::ChartSet;
use crate::stats::{Analysis, CaseDetail, CountMap, NestedCountMap};

const INSERT_CHUNK: usize = 500;

pub fn batch_no(imported_at: NaiveDateTime) -> String {
    format!("BATCH-{}", imported_at.format("%Y%m%d%H%M%S"))
}

pub fn report_download_url(batch_id: i32) -> String {
    format!("/api/case-stats/batches/{}/report-download", batch_id)
}

/// Files written for one generated report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub time_chart: PathBuf,
    pub street_chart: PathBuf,
    pub type_chart: PathBuf,
    pub district_chart: PathBuf,
    pub report_file: PathBuf,
}

impl ReportArtifacts {
    pub fn new(charts: &ChartSet, report_file: PathBuf) -> Self {
        Self {
            time_chart: charts.time_trend.path.clone(),
            street_chart: charts.street_top10.path.clone(),
            type_chart: charts.type_top10.path.clone(),
            district_chart: charts.district_status.path.clone(),
            report_file,
        }
    }
}

/// Stored views and artifact locations for a batch.
///
/// Views are empty until a report has been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalysis {
    pub batch_id: i32,
    pub batch_no: String,
    pub time_trend: CountMap,
    pub street_top10: CountMap,
    pub type_top10: CountMap,
    pub district_status: NestedCountMap,
    pub time_chart_path: Option<String>,
    pub street_chart_path: Option<String>,
    pub type_chart_path: Option<String>,
    pub district_chart_path: Option<String>,
    pub report_file_url: Option<String>,
    pub report_generated_at: Option<NaiveDateTime>,
}

/// A report on disk, ready to be streamed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// Persistence for import batches and their detail rows.
#[derive(Clone)]
pub struct BatchStore {
    db: DatabaseConnection,
}

impl BatchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert the batch row and every detail in one transaction, in source order.
    pub async fn create_batch(
        &self,
        details: &[CaseDetail],
        imported_at: NaiveDateTime,
    ) -> CaseStatsResult<case_stats_batch::Model> {
        let txn = self.db.begin().await?;

        let batch = case_stats_batch::ActiveModel::for_import(
            batch_no(imported_at),
            details.len() as i32,
            imported_at,
        )
        .insert(&txn)
        .await?;

        for chunk in details.chunks(INSERT_CHUNK) {
            let rows = chunk
                .iter()
                .map(|detail| case_stats_detail::ActiveModel::from_detail(batch.id, detail, imported_at));
            case_stats_detail::Entity::insert_many(rows).exec(&txn).await?;
            debug!("Inserted {} detail rows for batch {}", chunk.len(), batch.id);
        }

        txn.commit().await?;
        info!(
            "Created batch {} ({}) with {} details",
            batch.id, batch.batch_no, batch.record_count
        );
        Ok(batch)
    }

    pub async fn list_batches(&self) -> CaseStatsResult<Vec<case_stats_batch::Model>> {
        let batches = case_stats_batch::Entity::find()
            .order_by_desc(case_stats_batch::Column::ImportedAt)
            .order_by_desc(case_stats_batch::Column::Id)
            .all(&self.db)
            .await?;
        Ok(batches)
    }

    pub async fn list_details(&self, batch_id: i32) -> CaseStatsResult<Vec<case_stats_detail::Model>> {
        let details = case_stats_detail::Entity::find()
            .filter(case_stats_detail::Column::BatchId.eq(batch_id))
            .order_by_asc(case_stats_detail::Column::Id)
            .all(&self.db)
            .await?;
        Ok(details)
    }

    pub async fn get_batch(&self, batch_id: i32) -> CaseStatsResult<case_stats_batch::Model> {
        case_stats_batch::Entity::find_by_id(batch_id)
            .one(&self.db)
            .await?
            .ok_or(CaseStatsError::BatchNotFound(batch_id))
    }

    pub async fn report_file(&self, batch_id: i32) -> CaseStatsResult<ReportFile> {
        let batch = self.get_batch(batch_id).await?;
        let path = batch
            .report_file_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .ok_or(CaseStatsError::ReportFileNotFound(batch_id))?;

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(CaseStatsError::ReportFileNotFound(batch_id));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or(CaseStatsError::ReportFileNotFound(batch_id))?;
        Ok(ReportFile { path, file_name })
    }

    /// Store the serialized views, artifact paths, download url and generation time.
    pub async fn record_report(
        &self,
        batch_id: i32,
        analysis: &Analysis,
        artifacts: &ReportArtifacts,
        generated_at: NaiveDateTime,
    ) -> CaseStatsResult<case_stats_batch::Model> {
        let batch = self.get_batch(batch_id).await?;

        let mut active: case_stats_batch::ActiveModel = batch.into();
        active.time_trend_json = Set(Some(serde_json::to_string(&analysis.time_trend)?));
        active.street_top10_json = Set(Some(serde_json::to_string(&analysis.street_top10)?));
        active.type_top10_json = Set(Some(serde_json::to_string(&analysis.type_top10)?));
        active.district_status_json = Set(Some(serde_json::to_string(&analysis.district_status)?));
        active.time_chart_path = Set(Some(path_string(&artifacts.time_chart)));
        active.street_chart_path = Set(Some(path_string(&artifacts.street_chart)));
        active.type_chart_path = Set(Some(path_string(&artifacts.type_chart)));
        active.district_chart_path = Set(Some(path_string(&artifacts.district_chart)));
        active.report_file_path = Set(Some(path_string(&artifacts.report_file)));
        active.report_file_url = Set(Some(report_download_url(batch_id)));
        active.report_generated_at = Set(Some(generated_at));

        let updated = active.update(&self.db).await?;
        info!("Recorded report for batch {}", batch_id);
        Ok(updated)
    }

    pub async fn get_analysis(&self, batch_id: i32) -> CaseStatsResult<BatchAnalysis> {
        let batch = self.get_batch(batch_id).await?;
        Ok(BatchAnalysis {
            batch_id: batch.id,
            time_trend: parse_view(batch.time_trend_json.as_deref())?,
            street_top10: parse_view(batch.street_top10_json.as_deref())?,
            type_top10: parse_view(batch.type_top10_json.as_deref())?,
            district_status: parse_view(batch.district_status_json.as_deref())?,
            batch_no: batch.batch_no,
            time_chart_path: batch.time_chart_path,
            street_chart_path: batch.street_chart_path,
            type_chart_path: batch.type_chart_path,
            district_chart_path: batch.district_chart_path,
            report_file_url: batch.report_file_url,
            report_generated_at: batch.report_generated_at,
        })
    }
}

fn parse_view<T: DeserializeOwned + Default>(json: Option<&str>) -> CaseStatsResult<T> {
    match json.map(str::trim).filter(|json| !json.is_empty()) {
        Some(json) => Ok(serde_json::from_str(json)?),
        None => Ok(T::default()),
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
