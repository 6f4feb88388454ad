//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write operations on QR codes.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_qr_code, qr_code_to_active_model};
use crate::errors::{QrError, Result};
use crate::storage::{QrCode, QrCodePatch};

use migration::entities::{qr_code, scan_event};

impl SeaOrmStorage {
    /// 插入新 QR 码
    ///
    /// short_code 唯一约束冲突时返回 `QrError::Conflict`。
    pub async fn insert_qr_code(&self, qr: &QrCode) -> Result<QrCode> {
        let active = qr_code_to_active_model(qr)?;
        let model = active.insert(&self.db).await?;

        info!("QR code created: {} -> {}", model.short_code, model.destination_url);
        Ok(model_to_qr_code(model))
    }

    /// 部分更新，同时刷新 updated_at
    pub async fn update_qr_code(&self, id: &str, patch: QrCodePatch) -> Result<QrCode> {
        let existing = qr_code::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| QrError::not_found(format!("QR code not found: {}", id)))?;

        let mut active: qr_code::ActiveModel = existing.into();
        if let Some(destination_url) = patch.destination_url {
            active.destination_url = Set(destination_url);
        }
        if let Some(title) = patch.title {
            active.title = Set(Some(title));
        }
        if let Some(design_config) = patch.design_config {
            active.design_config = Set(Some(serde_json::to_string(&design_config)?));
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        info!("QR code updated: {}", model.short_code);
        Ok(model_to_qr_code(model))
    }

    /// 删除 QR 码及其全部扫码记录（单事务）
    pub async fn delete_qr_code(&self, id: &str) -> Result<()> {
        let txn = self.db.begin().await?;

        let scans = scan_event::Entity::delete_many()
            .filter(scan_event::Column::QrCodeId.eq(id))
            .exec(&txn)
            .await?;

        let result = qr_code::Entity::delete_by_id(id.to_string())
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(QrError::not_found(format!("QR code not found: {}", id)));
        }

        txn.commit().await?;
        info!(
            "QR code deleted: {} ({} scan events removed)",
            id, scans.rows_affected
        );
        Ok(())
    }
}
