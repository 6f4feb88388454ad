//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only QR code operations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::trace;

use super::SeaOrmStorage;
use super::converters::model_to_qr_code;
use crate::errors::Result;
use crate::storage::{QrCode, ShortCodeLookup};

use migration::entities::qr_code;

#[async_trait]
impl ShortCodeLookup for SeaOrmStorage {
    async fn find_by_short_code(&self, code: &str) -> Result<Option<QrCode>> {
        let model = qr_code::Entity::find()
            .filter(qr_code::Column::ShortCode.eq(code))
            .one(&self.db)
            .await?;

        trace!("find_by_short_code({}) hit={}", code, model.is_some());
        Ok(model.map(model_to_qr_code))
    }

    async fn short_code_exists(&self, code: &str) -> Result<bool> {
        let count = qr_code::Entity::find()
            .filter(qr_code::Column::ShortCode.eq(code))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

impl SeaOrmStorage {
    /// 按 id 查找，并校验归属用户
    pub async fn find_owned(&self, id: &str, user_id: &str) -> Result<Option<QrCode>> {
        let model = qr_code::Entity::find_by_id(id.to_string())
            .filter(qr_code::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_qr_code))
    }

    /// 列出用户的全部 QR 码，按创建时间倒序
    pub async fn list_by_owner(&self, user_id: &str) -> Result<Vec<QrCode>> {
        let models = qr_code::Entity::find()
            .filter(qr_code::Column::UserId.eq(user_id))
            .order_by_desc(qr_code::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_qr_code).collect())
    }

    /// 存储可用性探测
    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}
