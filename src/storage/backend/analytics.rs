//! 扫码统计查询
//!
//! 供 AnalyticsService 调用；都按单个 qr_code_id 过滤。

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};

use super::SeaOrmStorage;
use super::converters::model_to_scan_event;
use crate::errors::Result;
use crate::storage::{GroupCount, ScanEvent};

use migration::entities::scan_event;

/// 分组查询结果行
#[derive(Debug, FromQueryResult)]
struct GroupRow {
    name: Option<String>,
    count: i64,
}

impl SeaOrmStorage {
    /// 统计扫码总数
    pub async fn count_scans(&self, qr_code_id: &str) -> Result<u64> {
        let count = scan_event::Entity::find()
            .filter(scan_event::Column::QrCodeId.eq(qr_code_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// 最近的扫码记录，按时间倒序
    pub async fn recent_scans(&self, qr_code_id: &str, limit: u64) -> Result<Vec<ScanEvent>> {
        let models = scan_event::Entity::find()
            .filter(scan_event::Column::QrCodeId.eq(qr_code_id))
            .order_by_desc(scan_event::Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_scan_event).collect())
    }

    /// 按城市分组
    pub async fn scans_by_city(&self, qr_code_id: &str, limit: u64) -> Result<Vec<GroupCount>> {
        self.group_scans_by(qr_code_id, scan_event::Column::City, limit)
            .await
    }

    /// 按设备类型分组
    pub async fn scans_by_device(&self, qr_code_id: &str, limit: u64) -> Result<Vec<GroupCount>> {
        self.group_scans_by(qr_code_id, scan_event::Column::DeviceType, limit)
            .await
    }

    /// 分组计数，丢弃分组键为 NULL 的行
    async fn group_scans_by(
        &self,
        qr_code_id: &str,
        column: scan_event::Column,
        limit: u64,
    ) -> Result<Vec<GroupCount>> {
        let rows = scan_event::Entity::find()
            .select_only()
            .column_as(column, "name")
            .column_as(scan_event::Column::Id.count(), "count")
            .filter(scan_event::Column::QrCodeId.eq(qr_code_id))
            .filter(column.is_not_null())
            .group_by(column)
            .order_by_desc(Expr::cust("count"))
            .limit(limit)
            .into_model::<GroupRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.name.map(|name| GroupCount {
                    name,
                    value: row.count.max(0) as u64,
                })
            })
            .collect())
    }
}
