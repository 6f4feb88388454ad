//! scan_events 表
//!
//! 每次成功跳转写入一行；父 qr_code 删除时级联删除。

use sea_orm_migration::prelude::*;

use crate::m20261018_000001_qr_codes::QrCodes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScanEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScanEvents::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScanEvents::QrCodeId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScanEvents::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // X-Forwarded-For 原始值，长度由客户端决定
                    .col(ColumnDef::new(ScanEvents::IpAddress).text().null())
                    .col(ColumnDef::new(ScanEvents::UserAgent).text().null())
                    .col(ColumnDef::new(ScanEvents::Country).string_len(64).null())
                    .col(ColumnDef::new(ScanEvents::City).string_len(100).null())
                    .col(ColumnDef::new(ScanEvents::DeviceType).string_len(32).null())
                    .col(ColumnDef::new(ScanEvents::Os).string_len(32).null())
                    .col(ColumnDef::new(ScanEvents::Referrer).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scan_events_qr_code_id")
                            .from(ScanEvents::Table, ScanEvents::QrCodeId)
                            .to(QrCodes::Table, QrCodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scan_events_qr_code_id")
                    .table(ScanEvents::Table)
                    .col(ScanEvents::QrCodeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scan_events_timestamp")
                    .table(ScanEvents::Table)
                    .col(ScanEvents::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_scan_events_timestamp").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_scan_events_qr_code_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ScanEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScanEvents {
    #[sea_orm(iden = "scan_events")]
    Table,
    Id,
    QrCodeId,
    Timestamp,
    IpAddress,
    UserAgent,
    Country,
    City,
    DeviceType,
    Os,
    Referrer,
}
