//! API 类型定义

use serde::{Deserialize, Serialize};

use crate::storage::{DesignConfig, QrCodePatch};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrBody {
    pub destination_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub design_config: Option<DesignConfig>,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQrBody {
    #[serde(default)]
    pub destination_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub design_config: Option<DesignConfig>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl From<UpdateQrBody> for QrCodePatch {
    fn from(body: UpdateQrBody) -> Self {
        QrCodePatch {
            destination_url: body.destination_url,
            title: body.title,
            design_config: body.design_config,
            is_active: body.is_active,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeleteResult {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime: u64,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u64,
}
