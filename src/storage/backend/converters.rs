use sea_orm::ActiveValue::Set;
use tracing::warn;

use crate::analytics::ScanDetail;
use crate::storage::{DesignConfig, QrCode, ScanEvent};
use migration::entities::{qr_code, scan_event};

/// 将 Sea-ORM Model 转换为 QrCode
pub fn model_to_qr_code(model: qr_code::Model) -> QrCode {
    let design_config = model.design_config.as_deref().and_then(|raw| {
        serde_json::from_str::<DesignConfig>(raw)
            .map_err(|e| warn!("Ignoring malformed design_config on {}: {}", model.id, e))
            .ok()
    });

    QrCode {
        id: model.id,
        user_id: model.user_id,
        short_code: model.short_code,
        destination_url: model.destination_url,
        title: model.title,
        design_config,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 将 QrCode 转换为用于插入的 ActiveModel
pub fn qr_code_to_active_model(qr: &QrCode) -> serde_json::Result<qr_code::ActiveModel> {
    let design_config = qr
        .design_config
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    Ok(qr_code::ActiveModel {
        id: Set(qr.id.clone()),
        user_id: Set(qr.user_id.clone()),
        short_code: Set(qr.short_code.clone()),
        destination_url: Set(qr.destination_url.clone()),
        title: Set(qr.title.clone()),
        design_config: Set(design_config),
        is_active: Set(qr.is_active),
        created_at: Set(qr.created_at),
        updated_at: Set(qr.updated_at),
    })
}

pub fn model_to_scan_event(model: scan_event::Model) -> ScanEvent {
    ScanEvent {
        id: model.id,
        qr_code_id: model.qr_code_id,
        timestamp: model.timestamp,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        country: model.country,
        city: model.city,
        device_type: model.device_type,
        os: model.os,
        referrer: model.referrer,
    }
}

/// 扫码详情 → ActiveModel；每条记录生成新的 UUID
pub fn scan_to_active_model(detail: &ScanDetail) -> scan_event::ActiveModel {
    scan_event::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        qr_code_id: Set(detail.qr_code_id.clone()),
        timestamp: Set(detail.timestamp),
        ip_address: Set(detail.ip_address.clone()),
        user_agent: Set(detail.user_agent.clone()),
        country: Set(detail.country.clone()),
        city: Set(detail.city.clone()),
        device_type: Set(Some(detail.device_type.as_str().to_string())),
        os: Set(Some(detail.os.as_str().to_string())),
        referrer: Set(detail.referrer.clone()),
    }
}
