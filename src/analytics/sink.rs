use super::ScanDetail;

/// 扫码记录 Sink
#[async_trait::async_trait]
pub trait ScanSink: Send + Sync {
    async fn insert_scan(&self, detail: ScanDetail) -> anyhow::Result<()>;
}
