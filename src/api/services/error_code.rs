//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::QrError;

/// API 错误码枚举
///
/// 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: QR 码错误
/// - 6000-6099: 统计错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    Timeout = 1006,

    QrNotFound = 3000,
    QrConflict = 3001,
    QrInvalidUrl = 3002,
    QrCodeExhausted = 3003,
    QrDatabaseError = 3005,

    AnalyticsQueryFailed = 6000,
}

impl From<&QrError> for ErrorCode {
    fn from(err: &QrError) -> Self {
        match err {
            QrError::Validation(_) => ErrorCode::QrInvalidUrl,
            QrError::NotFound(_) => ErrorCode::QrNotFound,
            QrError::Unauthorized(_) => ErrorCode::Unauthorized,
            QrError::Conflict(_) => ErrorCode::QrConflict,
            QrError::CodeExhausted(_) => ErrorCode::QrCodeExhausted,
            QrError::Timeout(_) => ErrorCode::Timeout,
            QrError::DatabaseOperation(_) | QrError::DatabaseConnection(_) => {
                ErrorCode::QrDatabaseError
            }
            QrError::DatabaseConfig(_) | QrError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
