//! 扫码记录器
//!
//! 同步阶段只做字段推导（UA 分类、IP 取值），写库放进独立的 tokio 任务：
//! 跳转响应不等待写入完成，写入失败只记日志、不重试、不影响响应。

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use super::{ScanDetail, ScanRequestMeta, ScanSink, classify_device, classify_os};
use crate::config::AnalyticsConfig;
use crate::storage::QrCode;

#[derive(Debug, Clone)]
pub struct RecorderSettings {
    pub enabled: bool,
    /// false 时 ip_address 写入 NULL
    pub record_ip: bool,
    /// 单次写入的超时
    pub timeout: Duration,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self::from(&AnalyticsConfig::default())
    }
}

impl From<&AnalyticsConfig> for RecorderSettings {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            enabled: config.enabled,
            record_ip: config.record_ip,
            timeout: Duration::from_millis(config.record_timeout_ms),
        }
    }
}

#[derive(Clone)]
pub struct ScanRecorder {
    sink: Arc<dyn ScanSink>,
    settings: RecorderSettings,
}

impl ScanRecorder {
    pub fn new(sink: Arc<dyn ScanSink>, settings: RecorderSettings) -> Self {
        Self { sink, settings }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// 推导扫码记录的全部字段
    pub fn build_detail(&self, qr: &QrCode, meta: ScanRequestMeta) -> ScanDetail {
        let user_agent = meta.user_agent;
        ScanDetail {
            qr_code_id: qr.id.clone(),
            short_code: qr.short_code.clone(),
            timestamp: Utc::now(),
            ip_address: self.settings.record_ip.then_some(meta.ip_source),
            device_type: classify_device(user_agent.as_deref()),
            os: classify_os(user_agent.as_deref()),
            user_agent,
            referrer: meta.referrer,
            country: None,
            city: None,
        }
    }

    /// 派发一次扫码写入，立即返回
    ///
    /// 只能在解析出有效（active）的 QR 码之后调用。调用方不需要持有任何数据库
    /// 连接：后台任务自己从连接池获取。返回的 handle 可以直接丢弃，任务会继续
    /// 运行到完成或失败。
    pub fn record(&self, qr: &QrCode, meta: ScanRequestMeta) -> Option<JoinHandle<()>> {
        if !self.settings.enabled {
            trace!("Scan recording disabled, skipping {}", qr.short_code);
            return None;
        }

        let detail = self.build_detail(qr, meta);
        let sink = Arc::clone(&self.sink);
        let timeout = self.settings.timeout;

        Some(tokio::spawn(persist(sink, detail, timeout)))
    }
}

async fn persist(sink: Arc<dyn ScanSink>, detail: ScanDetail, timeout: Duration) {
    let code = detail.short_code.clone();
    match tokio::time::timeout(timeout, sink.insert_scan(detail)).await {
        Ok(Ok(())) => debug!("Logged scan for {}", code),
        Ok(Err(e)) => error!("Analytics error for {}: {}", code, e),
        Err(_) => warn!(
            "Scan write for {} timed out after {} ms, dropped",
            code,
            timeout.as_millis()
        ),
    }
}
