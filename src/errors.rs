use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    /// 存储层暂时不可用（查询或写入失败）
    DatabaseOperation(String),
    Timeout(String),
    Validation(String),
    NotFound(String),
    Unauthorized(String),
    /// 重试次数用尽仍未生成唯一短码
    CodeExhausted(String),
    /// 插入时撞上 short_code 唯一约束，调用方应整体重试创建
    Conflict(String),
    Serialization(String),
}

impl QrError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            QrError::DatabaseConfig(_) => "E001",
            QrError::DatabaseConnection(_) => "E002",
            QrError::DatabaseOperation(_) => "E003",
            QrError::Timeout(_) => "E004",
            QrError::Validation(_) => "E005",
            QrError::NotFound(_) => "E006",
            QrError::Unauthorized(_) => "E007",
            QrError::CodeExhausted(_) => "E008",
            QrError::Conflict(_) => "E009",
            QrError::Serialization(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            QrError::DatabaseConfig(_) => "Database Configuration Error",
            QrError::DatabaseConnection(_) => "Database Connection Error",
            QrError::DatabaseOperation(_) => "Database Operation Error",
            QrError::Timeout(_) => "Timeout",
            QrError::Validation(_) => "Validation Error",
            QrError::NotFound(_) => "Resource Not Found",
            QrError::Unauthorized(_) => "Unauthorized",
            QrError::CodeExhausted(_) => "Unique Code Exhausted",
            QrError::Conflict(_) => "Conflict",
            QrError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            QrError::DatabaseConfig(msg)
            | QrError::DatabaseConnection(msg)
            | QrError::DatabaseOperation(msg)
            | QrError::Timeout(msg)
            | QrError::Validation(msg)
            | QrError::NotFound(msg)
            | QrError::Unauthorized(msg)
            | QrError::CodeExhausted(msg)
            | QrError::Conflict(msg)
            | QrError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            QrError::Validation(_) => StatusCode::BAD_REQUEST,
            QrError::NotFound(_) => StatusCode::NOT_FOUND,
            QrError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            QrError::Conflict(_) => StatusCode::CONFLICT,
            QrError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            QrError::DatabaseConfig(_)
            | QrError::DatabaseConnection(_)
            | QrError::DatabaseOperation(_)
            | QrError::CodeExhausted(_)
            | QrError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否为存储层的暂时性故障
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            QrError::DatabaseConnection(_) | QrError::DatabaseOperation(_) | QrError::Timeout(_)
        )
    }

    /// 格式化为彩色输出（用于启动失败时的终端提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for QrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for QrError {}

// 便捷的构造函数
impl QrError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        QrError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        QrError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        QrError::DatabaseOperation(msg.into())
    }

    pub fn timeout<T: Into<String>>(msg: T) -> Self {
        QrError::Timeout(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        QrError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        QrError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        QrError::Unauthorized(msg.into())
    }

    pub fn code_exhausted<T: Into<String>>(msg: T) -> Self {
        QrError::CodeExhausted(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        QrError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        QrError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for QrError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独分类，其余一律视为暂时性存储故障
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return QrError::Conflict(detail);
        }
        QrError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for QrError {
    fn from(err: serde_json::Error) -> Self {
        QrError::Serialization(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for QrError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        QrError::Timeout(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QrError>;
