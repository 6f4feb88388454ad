//! 短码解析
//!
//! 入站路径段 → 目标地址或 NotFound。纯读操作，不重试。

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::RedirectConfig;
use crate::errors::Result;
use crate::storage::{QrCode, ShortCodeLookup};

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 有效且启用的 QR 码，跳转到 `destination_url`
    Destination(QrCode),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// 精确匹配即拒绝的保留路径（如 favicon.ico）
    pub reserved_paths: Vec<String>,
    /// 查询超时；None 表示不限
    pub lookup_timeout: Option<Duration>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from(&RedirectConfig::default())
    }
}

impl From<&RedirectConfig> for ResolverSettings {
    fn from(config: &RedirectConfig) -> Self {
        Self {
            reserved_paths: config.reserved_paths.clone(),
            lookup_timeout: Some(Duration::from_millis(config.lookup_timeout_ms)),
        }
    }
}

#[derive(Clone)]
pub struct Resolver {
    lookup: Arc<dyn ShortCodeLookup>,
    settings: ResolverSettings,
}

impl Resolver {
    pub fn new(lookup: Arc<dyn ShortCodeLookup>, settings: ResolverSettings) -> Self {
        Self { lookup, settings }
    }

    /// 静态资源类路径：含 `.`、空串或命中保留路径
    pub fn is_asset_like(&self, segment: &str) -> bool {
        segment.is_empty()
            || segment.contains('.')
            || self.settings.reserved_paths.iter().any(|p| p == segment)
    }

    /// 解析路径段
    ///
    /// 资源类路径不查库直接返回 NotFound；记录不存在或已停用同样返回 NotFound。
    /// 存储故障（含超时）原样向上传递。
    pub async fn resolve(&self, segment: &str) -> Result<Resolution> {
        if self.is_asset_like(segment) {
            trace!("Asset-like path rejected without lookup: {}", segment);
            return Ok(Resolution::NotFound);
        }

        let found = match self.settings.lookup_timeout {
            Some(timeout) => {
                tokio::time::timeout(timeout, self.lookup.find_by_short_code(segment)).await??
            }
            None => self.lookup.find_by_short_code(segment).await?,
        };

        match found {
            Some(qr) if qr.is_active => Ok(Resolution::Destination(qr)),
            Some(_) => {
                debug!("QR code is inactive: {}", segment);
                Ok(Resolution::NotFound)
            }
            None => {
                debug!("QR code not found: {}", segment);
                Ok(Resolution::NotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QrError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 计数查询次数的内存实现
    #[derive(Default)]
    struct CountingLookup {
        codes: HashMap<String, QrCode>,
        lookups: AtomicUsize,
    }

    impl CountingLookup {
        fn with(qrs: Vec<QrCode>) -> Self {
            Self {
                codes: qrs.into_iter().map(|q| (q.short_code.clone(), q)).collect(),
                lookups: AtomicUsize::new(0),
            }
        }

        fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ShortCodeLookup for CountingLookup {
        async fn find_by_short_code(&self, code: &str) -> Result<Option<QrCode>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.codes.get(code).cloned())
        }

        async fn short_code_exists(&self, code: &str) -> Result<bool> {
            Ok(self.codes.contains_key(code))
        }
    }

    struct BrokenLookup;

    #[async_trait]
    impl ShortCodeLookup for BrokenLookup {
        async fn find_by_short_code(&self, _code: &str) -> Result<Option<QrCode>> {
            Err(QrError::database_operation("connection refused"))
        }

        async fn short_code_exists(&self, _code: &str) -> Result<bool> {
            Err(QrError::database_operation("connection refused"))
        }
    }

    struct HangingLookup;

    #[async_trait]
    impl ShortCodeLookup for HangingLookup {
        async fn find_by_short_code(&self, _code: &str) -> Result<Option<QrCode>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }

        async fn short_code_exists(&self, _code: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn qr(code: &str, destination: &str, active: bool) -> QrCode {
        QrCode {
            id: format!("id-{}", code),
            user_id: "user-1".to_string(),
            short_code: code.to_string(),
            destination_url: destination.to_string(),
            title: None,
            design_config: None,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn resolver(lookup: Arc<dyn ShortCodeLookup>) -> Resolver {
        Resolver::new(lookup, ResolverSettings::default())
    }

    #[tokio::test]
    async fn test_active_code_resolves_to_exact_destination() {
        let destination = "https://example.com/path/?q=1#frag";
        let lookup = Arc::new(CountingLookup::with(vec![qr("Ab12Cd", destination, true)]));
        let result = resolver(lookup.clone()).resolve("Ab12Cd").await.unwrap();

        match result {
            Resolution::Destination(found) => {
                assert_eq!(found.destination_url, destination);
                assert_eq!(found.id, "id-Ab12Cd");
            }
            Resolution::NotFound => panic!("expected destination"),
        }
        assert_eq!(lookup.lookups(), 1);
    }

    #[tokio::test]
    async fn test_inactive_code_is_not_found() {
        let lookup = Arc::new(CountingLookup::with(vec![qr("Ab12Cd", "https://example.com", false)]));
        let result = resolver(lookup).resolve("Ab12Cd").await.unwrap();
        assert_eq!(result, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_missing_code_is_not_found() {
        let lookup = Arc::new(CountingLookup::default());
        let result = resolver(lookup.clone()).resolve("Zz99Yy").await.unwrap();
        assert_eq!(result, Resolution::NotFound);
        assert_eq!(lookup.lookups(), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let lookup = Arc::new(CountingLookup::with(vec![qr("Ab12Cd", "https://example.com", true)]));
        let result = resolver(lookup).resolve("ab12cd").await.unwrap();
        assert_eq!(result, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_dotted_segments_skip_storage() {
        let lookup = Arc::new(CountingLookup::with(vec![qr("Ab12Cd", "https://example.com", true)]));
        let resolver = resolver(lookup.clone());

        for segment in ["favicon.ico", "robots.txt", "app.js", "Ab12Cd.png", ".", "a.b"] {
            assert_eq!(resolver.resolve(segment).await.unwrap(), Resolution::NotFound);
        }
        assert_eq!(lookup.lookups(), 0);
    }

    #[tokio::test]
    async fn test_reserved_literal_without_dot_skips_storage() {
        let lookup = Arc::new(CountingLookup::default());
        let settings = ResolverSettings {
            reserved_paths: vec!["apple-touch-icon".to_string()],
            lookup_timeout: None,
        };
        let resolver = Resolver::new(lookup.clone(), settings);

        assert_eq!(
            resolver.resolve("apple-touch-icon").await.unwrap(),
            Resolution::NotFound
        );
        assert_eq!(lookup.lookups(), 0);
    }

    #[tokio::test]
    async fn test_empty_segment_skips_storage() {
        let lookup = Arc::new(CountingLookup::default());
        assert_eq!(resolver(lookup.clone()).resolve("").await.unwrap(), Resolution::NotFound);
        assert_eq!(lookup.lookups(), 0);
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let err = resolver(Arc::new(BrokenLookup)).resolve("Ab12Cd").await.unwrap_err();
        assert!(matches!(err, QrError::DatabaseOperation(_)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_lookup_timeout() {
        let settings = ResolverSettings {
            reserved_paths: Vec::new(),
            lookup_timeout: Some(Duration::from_millis(20)),
        };
        let resolver = Resolver::new(Arc::new(HangingLookup), settings);
        let err = resolver.resolve("Ab12Cd").await.unwrap_err();
        assert!(matches!(err, QrError::Timeout(_)));
    }
}
