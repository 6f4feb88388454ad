use serde::{Deserialize, Serialize};

use crate::errors::{QrError, Result};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量、CORS
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - redirect: 跳转路径的查询超时与保留路径
/// - analytics: 扫码记录开关与超时
/// - auth: 上游认证网关传入的身份 header
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub redirect: RedirectConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：QR，分隔符：__
    /// 示例：QR__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("QR")
                    .separator("__")
                    .try_parsing(true),
            );

        // tracing 尚未初始化，只能写 stderr
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 启动前校验
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(QrError::validation("server.port must be non-zero"));
        }
        if self.database.database_url.trim().is_empty() {
            return Err(QrError::database_config("database.database_url is empty"));
        }
        if self.auth.user_header.trim().is_empty() {
            return Err(QrError::validation("auth.user_header is empty"));
        }
        if self.redirect.lookup_timeout_ms == 0 || self.analytics.record_timeout_ms == 0 {
            return Err(QrError::validation("timeouts must be greater than zero"));
        }
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
    /// API 允许的跨域来源，空表示仅同源
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// 连接/获取连接超时（秒）
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 跳转路径配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// 单次短码查询的超时（毫秒）
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    /// 不查库直接 404 的保留路径
    #[serde(default = "default_reserved_paths")]
    pub reserved_paths: Vec<String>,
}

/// 扫码分析配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 是否保存客户端 IP（来自 X-Forwarded-For，未做哈希）
    #[serde(default = "default_true")]
    pub record_ip: bool,
    /// 后台写入扫码记录的超时（毫秒）
    #[serde(default = "default_record_timeout_ms")]
    pub record_timeout_ms: u64,
    #[serde(default = "default_recent_events_limit")]
    pub recent_events_limit: u64,
    #[serde(default = "default_group_limit")]
    pub group_limit: u64,
}

/// 身份配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 上游认证网关写入的用户 ID header
    #[serde(default = "default_user_header")]
    pub user_header: String,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://qrlinker.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_lookup_timeout_ms() -> u64 {
    3000
}

fn default_reserved_paths() -> Vec<String> {
    vec!["favicon.ico".to_string(), "robots.txt".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_record_timeout_ms() -> u64 {
    5000
}

fn default_recent_events_limit() -> u64 {
    20
}

fn default_group_limit() -> u64 {
    5
}

fn default_user_header() -> String {
    "X-User-Id".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: default_lookup_timeout_ms(),
            reserved_paths: default_reserved_paths(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            record_ip: true,
            record_timeout_ms: default_record_timeout_ms(),
            recent_events_limit: default_recent_events_limit(),
            group_limit: default_group_limit(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
        }
    }
}
