//! qr_codes 表
//!
//! short_code 带唯一约束：并发创建时由数据库裁决唯一性。

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

/// 用户 ID 最大长度（需要建索引，不能用 TEXT）
pub const USER_ID_MAX_LEN: u32 = 255;

/// MySQL 默认排序规则大小写不敏感；短码与用户 ID 必须按字节比较
pub(crate) fn case_sensitive(col: &mut ColumnDef, backend: DatabaseBackend) -> &mut ColumnDef {
    if matches!(backend, DatabaseBackend::MySql) {
        col.extra("COLLATE utf8mb4_bin");
    }
    col
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        manager
            .create_table(
                Table::create()
                    .table(QrCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QrCodes::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(case_sensitive(
                        ColumnDef::new(QrCodes::UserId)
                            .string_len(USER_ID_MAX_LEN)
                            .not_null(),
                        backend,
                    ))
                    .col(case_sensitive(
                        ColumnDef::new(QrCodes::ShortCode)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                        backend,
                    ))
                    .col(ColumnDef::new(QrCodes::DestinationUrl).text().not_null())
                    .col(ColumnDef::new(QrCodes::Title).text().null())
                    .col(ColumnDef::new(QrCodes::DesignConfig).text().null())
                    .col(
                        ColumnDef::new(QrCodes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(QrCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QrCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 按用户列出
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_qr_codes_user_id")
                    .table(QrCodes::Table)
                    .col(QrCodes::UserId)
                    .col(QrCodes::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_qr_codes_user_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(QrCodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum QrCodes {
    #[sea_orm(iden = "qr_codes")]
    Table,
    Id,
    UserId,
    ShortCode,
    DestinationUrl,
    Title,
    DesignConfig,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
