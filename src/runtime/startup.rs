use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::analytics::{RecorderSettings, ScanRecorder, ScanSink};
use crate::api::IdentityConfig;
use crate::config::StaticConfig;
use crate::services::{AnalyticsService, QrService, Resolver, ResolverSettings};
use crate::storage::{SeaOrmStorage, ShortCodeLookup, StorageFactory};

/// 启动后共享给所有 worker 的组件
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub resolver: Resolver,
    pub recorder: ScanRecorder,
    pub qr_service: Arc<QrService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub identity: IdentityConfig,
    pub cors_origins: Vec<String>,
}

impl StartupContext {
    /// 基于已连接的存储装配各服务
    pub fn from_storage(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        let lookup: Arc<dyn ShortCodeLookup> = storage.clone();
        let sink: Arc<dyn ScanSink> = storage.clone();

        let resolver = Resolver::new(lookup, ResolverSettings::from(&config.redirect));
        let recorder = ScanRecorder::new(sink, RecorderSettings::from(&config.analytics));
        if !recorder.is_enabled() {
            warn!("Scan recording is disabled, redirects will not be logged");
        }

        Self {
            qr_service: Arc::new(QrService::new(storage.clone())),
            analytics_service: Arc::new(AnalyticsService::new(storage.clone(), &config.analytics)),
            storage,
            resolver,
            recorder,
            identity: IdentityConfig {
                user_header: config.auth.user_header.clone(),
            },
            cors_origins: config.server.cors_origins.clone(),
        }
    }
}

/// 连接数据库、执行迁移并装配服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::from_storage(storage, config);

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());
    Ok(context)
}
