//! ScanSink implementation for SeaOrmStorage

use async_trait::async_trait;
use sea_orm::EntityTrait;
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::scan_to_active_model;
use crate::analytics::{ScanDetail, ScanSink};

use migration::entities::scan_event;

#[async_trait]
impl ScanSink for SeaOrmStorage {
    async fn insert_scan(&self, detail: ScanDetail) -> anyhow::Result<()> {
        scan_event::Entity::insert(scan_to_active_model(&detail))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to insert scan event: {}", e))?;

        debug!(
            "Scan event written to {} database for {}",
            self.backend_name.to_uppercase(),
            detail.short_code
        );
        Ok(())
    }
}
