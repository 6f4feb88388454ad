//! 跳转路径集成测试
//!
//! 使用内存替身（lookup / sink），覆盖跳转状态码、资源路径短路以及
//! 扫码写入失败不影响响应。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::Utc;

use qrlinker::analytics::{
    DeviceType, OsFamily, RecorderSettings, ScanDetail, ScanRecorder, ScanSink,
};
use qrlinker::api::services::{RedirectService, redirect_routes};
use qrlinker::errors::{QrError, Result};
use qrlinker::services::{Resolver, ResolverSettings};
use qrlinker::storage::{QrCode, ShortCodeLookup};

// =============================================================================
// 替身
// =============================================================================

#[derive(Default)]
struct MemoryLookup {
    codes: HashMap<String, QrCode>,
    calls: AtomicUsize,
}

impl MemoryLookup {
    fn with(codes: Vec<QrCode>) -> Self {
        Self {
            codes: codes.into_iter().map(|c| (c.short_code.clone(), c)).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ShortCodeLookup for MemoryLookup {
    async fn find_by_short_code(&self, code: &str) -> Result<Option<QrCode>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
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
        Err(QrError::database_connection("connection refused"))
    }

    async fn short_code_exists(&self, _code: &str) -> Result<bool> {
        Err(QrError::database_connection("connection refused"))
    }
}

#[derive(Default)]
struct CollectingSink {
    details: Mutex<Vec<ScanDetail>>,
}

#[async_trait]
impl ScanSink for CollectingSink {
    async fn insert_scan(&self, detail: ScanDetail) -> anyhow::Result<()> {
        self.details.lock().unwrap().push(detail);
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl ScanSink for FailingSink {
    async fn insert_scan(&self, _detail: ScanDetail) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("scan_events table is locked"))
    }
}

/// 写入很慢的 sink，完成后才记录
#[derive(Default)]
struct SlowSink {
    delay: Duration,
    details: Mutex<Vec<ScanDetail>>,
}

#[async_trait]
impl ScanSink for SlowSink {
    async fn insert_scan(&self, detail: ScanDetail) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        self.details.lock().unwrap().push(detail);
        Ok(())
    }
}

struct PanickingSink;

#[async_trait]
impl ScanSink for PanickingSink {
    async fn insert_scan(&self, _detail: ScanDetail) -> anyhow::Result<()> {
        panic!("sink exploded");
    }
}

fn qr(short_code: &str, destination: &str, is_active: bool) -> QrCode {
    QrCode {
        id: format!("id-{}", short_code),
        user_id: "owner".to_string(),
        short_code: short_code.to_string(),
        destination_url: destination.to_string(),
        title: None,
        design_config: None,
        is_active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn fixtures() -> Vec<QrCode> {
    vec![
        qr("Ab12Cd", "https://example.com/menu", true),
        qr("Off999", "https://example.com/old", false),
    ]
}

macro_rules! redirect_app {
    ($lookup:expr, $sink:expr) => {{
        let resolver = Resolver::new($lookup, ResolverSettings::default());
        let recorder = ScanRecorder::new($sink, RecorderSettings::default());
        test::init_service(
            App::new()
                .app_data(web::Data::new(resolver))
                .app_data(web::Data::new(recorder))
                .service(redirect_routes())
                .default_service(web::to(RedirectService::handle_unmatched)),
        )
        .await
    }};
}

async fn wait_for_scans(sink: &CollectingSink, expected: usize) -> Vec<ScanDetail> {
    for _ in 0..100 {
        {
            let details = sink.details.lock().unwrap();
            if details.len() >= expected {
                return details.clone();
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    sink.details.lock().unwrap().clone()
}

// =============================================================================
// 跳转
// =============================================================================

#[actix_web::test]
async fn test_active_code_redirects_and_records_scan() {
    let sink = Arc::new(CollectingSink::default());
    let app = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), sink.clone());

    let req = TestRequest::get()
        .uri("/Ab12Cd")
        .insert_header((
            "User-Agent",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148",
        ))
        .insert_header(("X-Forwarded-For", "203.0.113.9"))
        .insert_header(("Referer", "https://flyer.example.org/"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/menu"
    );

    let details = wait_for_scans(&sink, 1).await;
    assert_eq!(details.len(), 1);
    let scan = &details[0];
    assert_eq!(scan.qr_code_id, "id-Ab12Cd");
    assert_eq!(scan.device_type, DeviceType::Mobile);
    assert_eq!(scan.os, OsFamily::MacOS);
    assert_eq!(scan.ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(scan.referrer.as_deref(), Some("https://flyer.example.org/"));
    assert!(scan.city.is_none());
}

#[actix_web::test]
async fn test_head_request_redirects_without_recording() {
    let sink = Arc::new(CollectingSink::default());
    let app = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), sink.clone());

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/Ab12Cd")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/menu"
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sink.details.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_missing_headers_record_defaults() {
    let sink = Arc::new(CollectingSink::default());
    let app = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), sink.clone());

    let resp = test::call_service(&app, TestRequest::get().uri("/Ab12Cd").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let details = wait_for_scans(&sink, 1).await;
    let scan = &details[0];
    assert_eq!(scan.ip_address.as_deref(), Some("unknown"));
    assert_eq!(scan.device_type, DeviceType::Desktop);
    assert_eq!(scan.os, OsFamily::Other);
    assert!(scan.user_agent.is_none());
    assert!(scan.referrer.is_none());
}

// =============================================================================
// 404
// =============================================================================

#[actix_web::test]
async fn test_inactive_code_is_not_found_and_not_recorded() {
    let sink = Arc::new(CollectingSink::default());
    let app = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), sink.clone());

    let resp = test::call_service(&app, TestRequest::get().uri("/Off999").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    assert_eq!(body, "QR Code not found");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sink.details.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_unknown_code_is_not_found() {
    let app = redirect_app!(
        Arc::new(MemoryLookup::with(fixtures())),
        Arc::new(CollectingSink::default())
    );

    let resp = test::call_service(&app, TestRequest::get().uri("/zzzzzz").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(test::read_body(resp).await, "QR Code not found");
}

#[actix_web::test]
async fn test_lookup_is_case_sensitive() {
    let app = redirect_app!(
        Arc::new(MemoryLookup::with(fixtures())),
        Arc::new(CollectingSink::default())
    );

    let resp = test::call_service(&app, TestRequest::get().uri("/ab12cd").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_asset_paths_skip_lookup() {
    let lookup = Arc::new(MemoryLookup::with(fixtures()));
    let app = redirect_app!(lookup.clone(), Arc::new(CollectingSink::default()));

    for path in ["/favicon.ico", "/robots.txt", "/logo.png", "/Ab12Cd.html"] {
        let resp = test::call_service(&app, TestRequest::get().uri(path).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "path {}", path);
    }
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_multi_segment_path_is_not_found() {
    let lookup = Arc::new(MemoryLookup::with(fixtures()));
    let app = redirect_app!(lookup.clone(), Arc::new(CollectingSink::default()));

    let resp = test::call_service(&app, TestRequest::get().uri("/Ab12Cd/extra").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(test::read_body(resp).await, "QR Code not found");
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_root_is_liveness_probe() {
    let lookup = Arc::new(MemoryLookup::with(fixtures()));
    let app = redirect_app!(lookup.clone(), Arc::new(CollectingSink::default()));

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK");
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// 故障
// =============================================================================

#[actix_web::test]
async fn test_storage_failure_returns_generic_500() {
    let sink = Arc::new(CollectingSink::default());
    let app = redirect_app!(Arc::new(BrokenLookup), sink.clone());

    let resp = test::call_service(&app, TestRequest::get().uri("/Ab12Cd").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Internal Server Error");
    assert!(!String::from_utf8_lossy(&body).contains("connection refused"));
    assert!(sink.details.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_scan_failure_does_not_change_response() {
    let healthy = redirect_app!(
        Arc::new(MemoryLookup::with(fixtures())),
        Arc::new(CollectingSink::default())
    );
    let failing = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), Arc::new(FailingSink));

    let ok_resp = test::call_service(&healthy, TestRequest::get().uri("/Ab12Cd").to_request()).await;
    let bad_resp = test::call_service(&failing, TestRequest::get().uri("/Ab12Cd").to_request()).await;

    assert_eq!(ok_resp.status(), bad_resp.status());
    assert_eq!(
        ok_resp.headers().get("Location"),
        bad_resp.headers().get("Location")
    );
    assert_eq!(test::read_body(ok_resp).await, test::read_body(bad_resp).await);
}

#[actix_web::test]
async fn test_slow_sink_does_not_delay_redirect() {
    let sink = Arc::new(SlowSink {
        delay: Duration::from_secs(1),
        ..SlowSink::default()
    });
    let app = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), sink.clone());

    let started = Instant::now();
    let resp = test::call_service(&app, TestRequest::get().uri("/Ab12Cd").to_request()).await;
    let elapsed = started.elapsed();

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(elapsed < sink.delay, "redirect waited {:?} for the sink", elapsed);
    assert!(sink.details.lock().unwrap().is_empty());

    // 写入在响应之后完成
    let mut landed = false;
    for _ in 0..100 {
        if !sink.details.lock().unwrap().is_empty() {
            landed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(landed, "scan never reached the sink");
    assert_eq!(sink.details.lock().unwrap()[0].qr_code_id, "id-Ab12Cd");
}

#[actix_web::test]
async fn test_panicking_sink_does_not_break_redirect() {
    let app = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), Arc::new(PanickingSink));

    for _ in 0..3 {
        let resp = test::call_service(&app, TestRequest::get().uri("/Ab12Cd").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
    }
}

#[actix_web::test]
async fn test_each_redirect_records_one_scan() {
    let sink = Arc::new(CollectingSink::default());
    let app = redirect_app!(Arc::new(MemoryLookup::with(fixtures())), sink.clone());

    for _ in 0..3 {
        let resp = test::call_service(&app, TestRequest::get().uri("/Ab12Cd").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
    }
    let details = wait_for_scans(&sink, 3).await;
    assert_eq!(details.len(), 3);
}
