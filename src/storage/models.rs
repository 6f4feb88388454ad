use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// QR 码外观配置（纯展示用途，跳转逻辑不关心）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignConfig {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_shape")]
    pub shape: String,
    #[serde(default)]
    pub logo: Option<String>,
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_shape() -> String {
    "square".to_string()
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            shape: default_shape(),
            logo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: String,
    pub user_id: String,
    pub short_code: String,
    pub destination_url: String,
    pub title: Option<String>,
    pub design_config: Option<DesignConfig>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 部分更新；`None` 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct QrCodePatch {
    pub destination_url: Option<String>,
    pub title: Option<String>,
    pub design_config: Option<DesignConfig>,
    pub is_active: Option<bool>,
}

impl QrCodePatch {
    pub fn is_empty(&self) -> bool {
        self.destination_url.is_none()
            && self.title.is_none()
            && self.design_config.is_none()
            && self.is_active.is_none()
    }
}

/// 一次成功跳转的记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    pub id: String,
    pub qr_code_id: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub device_type: Option<String>,
    pub os: Option<String>,
    pub referrer: Option<String>,
}

/// 分组计数（城市、设备类型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub total_scans: u64,
    pub recent_events: Vec<ScanEvent>,
    pub by_city: Vec<GroupCount>,
    pub by_device: Vec<GroupCount>,
}
