//! 调用方身份
//!
//! 认证由上游网关完成，网关把用户 ID 写进配置的 header（默认 `X-User-Id`）。
//! 跳转路径不需要身份。

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use migration::USER_ID_MAX_LEN;
use tracing::{debug, trace};

use crate::errors::QrError;

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub user_header: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_header: "X-User-Id".to_string(),
        }
    }
}

/// 已认证用户的 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity(pub String);

impl UserIdentity {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for UserIdentity {
    type Error = QrError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let default_config = IdentityConfig::default();
        let config = req.app_data::<web::Data<IdentityConfig>>();
        let header = config
            .map(|c| c.user_header.as_str())
            .unwrap_or(default_config.user_header.as_str());

        let user_id = req
            .headers()
            .get(header)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        ready(match user_id {
            Some(id) if id.len() > USER_ID_MAX_LEN as usize => {
                debug!("Identity header {} exceeds {} bytes", header, USER_ID_MAX_LEN);
                Err(QrError::unauthorized("Invalid identity"))
            }
            Some(id) => Ok(UserIdentity(id.to_string())),
            None => {
                trace!("Request without identity header {}", header);
                Err(QrError::unauthorized("Authentication required"))
            }
        })
    }
}
