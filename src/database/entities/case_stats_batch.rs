use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

/// One spreadsheet import and the report artifacts derived from it.
///
/// The JSON and path columns stay empty until report generation succeeds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "case_stats_batch")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub batch_no: String,
    pub record_count: i32,
    pub imported_at: ChronoDateTime,
    pub report_generated_at: Option<ChronoDateTime>,
    pub report_file_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub time_trend_json: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub street_top10_json: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub type_top10_json: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub district_status_json: Option<String>,
    pub time_chart_path: Option<String>,
    pub street_chart_path: Option<String>,
    pub type_chart_path: Option<String>,
    pub district_chart_path: Option<String>,
    pub report_file_path: Option<String>,
    pub created_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::case_stats_detail::Entity")]
    CaseStatsDetail,
}

impl Related<super::case_stats_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseStatsDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn for_import(batch_no: String, record_count: i32, imported_at: ChronoDateTime) -> Self {
        Self {
            id: ActiveValue::NotSet,
            batch_no: Set(batch_no),
            record_count: Set(record_count),
            imported_at: Set(imported_at),
            report_generated_at: Set(None),
            report_file_url: Set(None),
            time_trend_json: Set(None),
            street_top10_json: Set(None),
            type_top10_json: Set(None),
            district_status_json: Set(None),
            time_chart_path: Set(None),
            street_chart_path: Set(None),
            type_chart_path: Set(None),
            district_chart_path: Set(None),
            report_file_path: Set(None),
            created_at: Set(imported_at),
        }
    }
}

impl Model {
    pub fn has_report(&self) -> bool {
        self.report_file_path
            .as_deref()
            .map(|path| !path.trim().is_empty())
            .unwrap_or(false)
    }
}
