use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

use crate::stats::CaseDetail;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "case_stats_detail")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub batch_id: i32,
    pub serial_no: String,
    pub event_time: String,
    pub district: String,
    pub street_town: String,
    pub register_source: String,
    pub case_type: String,
    pub register_time: String,
    pub current_status: String,
    pub created_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::case_stats_batch::Entity",
        from = "Column::BatchId",
        to = "super::case_stats_batch::Column::Id",
        on_delete = "Cascade"
    )]
    CaseStatsBatch,
}

impl Related<super::case_stats_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseStatsBatch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn from_detail(batch_id: i32, detail: &CaseDetail, created_at: ChronoDateTime) -> Self {
        Self {
            id: ActiveValue::NotSet,
            batch_id: Set(batch_id),
            serial_no: Set(detail.serial_no.clone()),
            event_time: Set(detail.event_time.clone()),
            district: Set(detail.district.clone()),
            street_town: Set(detail.street_town.clone()),
            register_source: Set(detail.register_source.clone()),
            case_type: Set(detail.case_type.clone()),
            register_time: Set(detail.register_time.clone()),
            current_status: Set(detail.current_status.clone()),
            created_at: Set(created_at),
        }
    }
}
