//! API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

use super::error_code::ErrorCode;
use super::types::ApiResponse;
use crate::errors::QrError;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 从 QrError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_qr(err: &QrError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("API request failed: {}", err);
    }
    // 内部错误不向客户端暴露细节
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        err.error_type()
    } else {
        err.message()
    };
    json_response::<()>(status, ErrorCode::from(err), message, None)
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: Result<T, QrError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_qr(&e),
    }
}

/// 提取器（如身份校验）失败时使用同一套 JSON 信封
impl ResponseError for QrError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        error_from_qr(self)
    }
}
