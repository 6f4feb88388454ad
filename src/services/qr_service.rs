//! QR code management service
//!
//! Create/list/get/update/delete, always scoped to the calling user.
//! A record owned by someone else is reported as not found.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::ShortCodeGenerator;
use crate::errors::{QrError, Result};
use crate::storage::{DesignConfig, QrCode, QrCodePatch, SeaOrmStorage};
use crate::utils::url_validator::validate_url;

/// Request to create a new QR code
#[derive(Debug, Clone)]
pub struct CreateQrRequest {
    pub destination_url: String,
    /// Defaults to the destination URL
    pub title: Option<String>,
    /// Defaults to black squares
    pub design_config: Option<DesignConfig>,
}

pub struct QrService {
    storage: Arc<SeaOrmStorage>,
    generator: ShortCodeGenerator,
}

impl QrService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        let generator = ShortCodeGenerator::new(storage.clone());
        Self { storage, generator }
    }

    /// 创建 QR 码
    ///
    /// 插入撞上唯一约束时返回 `Conflict`，由调用方决定是否整体重试。
    pub async fn create(&self, user_id: &str, req: CreateQrRequest) -> Result<QrCode> {
        validate_url(&req.destination_url).map_err(|e| QrError::validation(e.to_string()))?;

        let short_code = self.generator.generate().await?;
        let now = Utc::now();
        let title = req
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| req.destination_url.clone());

        let qr = QrCode {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            short_code,
            destination_url: req.destination_url,
            title: Some(title),
            design_config: Some(req.design_config.unwrap_or_default()),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.storage.insert_qr_code(&qr).await.map_err(|e| match e {
            QrError::Conflict(_) => QrError::conflict(format!(
                "Short code {} was taken concurrently, retry the creation",
                qr.short_code
            )),
            other => other,
        })
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<QrCode>> {
        self.storage.list_by_owner(user_id).await
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<QrCode> {
        self.storage
            .find_owned(id, user_id)
            .await?
            .ok_or_else(|| QrError::not_found("QR Code not found"))
    }

    /// 部分更新；空字符串的标题视为未提供
    pub async fn update(&self, id: &str, user_id: &str, mut patch: QrCodePatch) -> Result<QrCode> {
        if let Some(ref url) = patch.destination_url {
            validate_url(url).map_err(|e| QrError::validation(e.to_string()))?;
        }
        patch.title = patch.title.filter(|t| !t.is_empty());

        let current = self.get(id, user_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let updated = self.storage.update_qr_code(&current.id, patch).await?;
        info!("User {} updated QR code {}", user_id, updated.short_code);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        let current = self.get(id, user_id).await?;
        self.storage.delete_qr_code(&current.id).await
    }
}
