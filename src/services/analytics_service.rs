//! Scan statistics for the dashboard

use std::sync::Arc;

use crate::config::AnalyticsConfig;
use crate::errors::{QrError, Result};
use crate::storage::{ScanStats, SeaOrmStorage};

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
    recent_events_limit: u64,
    group_limit: u64,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &AnalyticsConfig) -> Self {
        Self {
            storage,
            recent_events_limit: config.recent_events_limit,
            group_limit: config.group_limit,
        }
    }

    /// 汇总单个 QR 码的扫码数据（先校验归属）
    pub async fn get_stats(&self, qr_id: &str, user_id: &str) -> Result<ScanStats> {
        if self.storage.find_owned(qr_id, user_id).await?.is_none() {
            return Err(QrError::not_found("QR Code not found"));
        }

        let total_scans = self.storage.count_scans(qr_id).await?;
        let recent_events = self
            .storage
            .recent_scans(qr_id, self.recent_events_limit)
            .await?;
        let by_city = self.storage.scans_by_city(qr_id, self.group_limit).await?;
        let by_device = self.storage.scans_by_device(qr_id, self.group_limit).await?;

        Ok(ScanStats {
            total_scans,
            recent_events,
            by_city,
            by_device,
        })
    }
}
