//! 扫码分析
//!
//! - `classify`: 从 User-Agent 推导设备类型与操作系统
//! - `sink`: 扫码记录的持久化接口
//! - `recorder`: 在后台任务中写入扫码记录，不阻塞跳转响应

pub mod classify;
pub mod recorder;
pub mod sink;

pub use classify::{DeviceType, OsFamily, classify_device, classify_os};
pub use recorder::{RecorderSettings, ScanRecorder};
pub use sink::ScanSink;

use chrono::{DateTime, Utc};

/// 跳转请求中与扫码相关的原始信息
#[derive(Debug, Clone, Default)]
pub struct ScanRequestMeta {
    /// User-Agent header
    pub user_agent: Option<String>,
    /// X-Forwarded-For 原始值（缺失时为 "unknown"），客户端可伪造
    pub ip_source: String,
    /// Referer header
    pub referrer: Option<String>,
}

/// 待写入的扫码记录
#[derive(Debug, Clone)]
pub struct ScanDetail {
    pub qr_code_id: String,
    /// 仅用于日志
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: DeviceType,
    pub os: OsFamily,
    /// 由外部 GeoIP 服务填充，这里始终为空
    pub country: Option<String>,
    pub city: Option<String>,
}
