//! Server mode
//!
//! 路由注册顺序：`/health` → `/api` → 跳转。跳转路由匹配任意单段路径，必须放最后。

use actix_cors::Cors;
use actix_web::http::Method;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use super::shutdown;
use super::startup::{StartupContext, prepare_server_startup};
use crate::api::services::{
    AppStartTime, RedirectService, analytics_routes, health_routes, qr_routes, redirect_routes,
};
use crate::config::StaticConfig;
use crate::errors::QrError;

/// 仪表盘 API 的 CORS
///
/// 未配置来源时使用默认的同源策略。
fn build_cors_middleware(origins: &[String], identity_header: &str) -> Cors {
    if origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default();
    if origins.iter().any(|o| o == "*") {
        // 任意来源时不允许携带凭证
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        cors = cors.supports_credentials();
    }

    cors.allowed_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ])
    .allowed_header("Content-Type")
    .allowed_header("Accept")
    .allowed_header(identity_header)
    .max_age(3600)
}

/// 注册全部 app_data 与路由
///
/// 服务器和集成测试共用。
pub fn configure_app(
    ctx: StartupContext,
    app_start_time: AppStartTime,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let cors = build_cors_middleware(&ctx.cors_origins, &ctx.identity.user_header);
        let json_config = web::JsonConfig::default()
            .limit(64 * 1024)
            .error_handler(|err, _req| QrError::validation(err.to_string()).into());

        cfg.app_data(web::Data::new(ctx.storage))
            .app_data(web::Data::new(ctx.resolver))
            .app_data(web::Data::new(ctx.recorder))
            .app_data(web::Data::new(ctx.qr_service))
            .app_data(web::Data::new(ctx.analytics_service))
            .app_data(web::Data::new(ctx.identity))
            .app_data(web::Data::new(app_start_time))
            .app_data(json_config)
            .service(health_routes())
            .service(
                web::scope("/api")
                    .wrap(cors)
                    .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
                    .service(qr_routes())
                    .service(analytics_routes()),
            )
            .service(redirect_routes())
            .default_service(web::to(RedirectService::handle_unmatched));
    }
}

/// Run the HTTP server
///
/// 调用前必须已初始化日志。
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = prepare_server_startup(config).await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    if config.server.cors_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin for the dashboard API");
    }

    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .configure(configure_app(startup.clone(), app_start_time.clone()))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown requested");
        }
    }

    shutdown::close_storage(db_for_shutdown).await;
    Ok(())
}
