use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseStatsBatch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseStatsBatch::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseStatsBatch::BatchNo).string().not_null())
                    .col(
                        ColumnDef::new(CaseStatsBatch::RecordCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CaseStatsBatch::ImportedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CaseStatsBatch::ReportGeneratedAt).timestamp())
                    .col(ColumnDef::new(CaseStatsBatch::ReportFileUrl).string())
                    .col(ColumnDef::new(CaseStatsBatch::TimeTrendJson).text())
                    .col(ColumnDef::new(CaseStatsBatch::StreetTop10Json).text())
                    .col(ColumnDef::new(CaseStatsBatch::TypeTop10Json).text())
                    .col(ColumnDef::new(CaseStatsBatch::DistrictStatusJson).text())
                    .col(ColumnDef::new(CaseStatsBatch::TimeChartPath).string())
                    .col(ColumnDef::new(CaseStatsBatch::StreetChartPath).string())
                    .col(ColumnDef::new(CaseStatsBatch::TypeChartPath).string())
                    .col(ColumnDef::new(CaseStatsBatch::DistrictChartPath).string())
                    .col(ColumnDef::new(CaseStatsBatch::ReportFilePath).string())
                    .col(
                        ColumnDef::new(CaseStatsBatch::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CaseStatsDetail::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseStatsDetail::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseStatsDetail::BatchId).integer().not_null())
                    .col(ColumnDef::new(CaseStatsDetail::SerialNo).string().not_null().default(""))
                    .col(ColumnDef::new(CaseStatsDetail::EventTime).string().not_null().default(""))
                    .col(ColumnDef::new(CaseStatsDetail::District).string().not_null().default(""))
                    .col(ColumnDef::new(CaseStatsDetail::StreetTown).string().not_null().default(""))
                    .col(
                        ColumnDef::new(CaseStatsDetail::RegisterSource)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(CaseStatsDetail::CaseType).string().not_null().default(""))
                    .col(
                        ColumnDef::new(CaseStatsDetail::RegisterTime)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseStatsDetail::CurrentStatus)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CaseStatsDetail::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_stats_detail_batch_id")
                            .from(CaseStatsDetail::Table, CaseStatsDetail::BatchId)
                            .to(CaseStatsBatch::Table, CaseStatsBatch::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_case_stats_detail_batch_id")
                    .table(CaseStatsDetail::Table)
                    .col(CaseStatsDetail::BatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_case_stats_batch_imported_at")
                    .table(CaseStatsBatch::Table)
                    .col(CaseStatsBatch::ImportedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseStatsDetail::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CaseStatsBatch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CaseStatsBatch {
    Table,
    Id,
    BatchNo,
    RecordCount,
    ImportedAt,
    ReportGeneratedAt,
    ReportFileUrl,
    TimeTrendJson,
    StreetTop10Json,
    TypeTop10Json,
    DistrictStatusJson,
    TimeChartPath,
    StreetChartPath,
    TypeChartPath,
    DistrictChartPath,
    ReportFilePath,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CaseStatsDetail {
    Table,
    Id,
    BatchId,
    SerialNo,
    EventTime,
    District,
    StreetTown,
    RegisterSource,
    CaseType,
    RegisterTime,
    CurrentStatus,
    CreatedAt,
}
