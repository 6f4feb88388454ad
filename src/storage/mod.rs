use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{DesignConfig, GroupCount, QrCode, QrCodePatch, ScanEvent, ScanStats};

/// 按短码查找 QR 码（跳转路径与短码生成共用）
///
/// 只暴露这两个读操作，测试可以用计数/故障注入的替身实现。
#[async_trait]
pub trait ShortCodeLookup: Send + Sync {
    /// 按 short_code 精确匹配（大小写敏感），不过滤 is_active
    async fn find_by_short_code(&self, code: &str) -> Result<Option<QrCode>>;

    /// 短码是否已被占用
    async fn short_code_exists(&self, code: &str) -> Result<bool>;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = &config.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
