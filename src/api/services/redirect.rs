use actix_web::http::{Method, StatusCode};
use actix_web::http::header::{HeaderName, LOCATION, REFERER, USER_AGENT};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::analytics::{ScanRecorder, ScanRequestMeta};
use crate::services::{Resolution, Resolver};
use crate::storage::QrCode;
use crate::utils::ip::forwarded_for;

pub struct RedirectService;

impl RedirectService {
    /// 根路径：存活探测
    pub async fn handle_root() -> impl Responder {
        trace!("Received root request");
        HttpResponse::Ok()
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("OK")
    }

    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        resolver: web::Data<Resolver>,
        recorder: web::Data<ScanRecorder>,
    ) -> impl Responder {
        let segment = path.into_inner();

        match resolver.resolve(&segment).await {
            Ok(Resolution::Destination(qr)) => {
                // HEAD 是链接预检/监控，不算扫码
                if req.method() != Method::HEAD {
                    // 扫码写入在后台进行，响应不等待
                    let _ = recorder.record(&qr, Self::scan_meta(&req));
                }
                Self::finish_redirect(&qr)
            }
            Ok(Resolution::NotFound) => {
                debug!("No active QR code for path: {}", &segment);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Redirect lookup failed for {}: {}", &segment, e);
                Self::error_response()
            }
        }
    }

    /// 未匹配任何路由时的兜底
    pub async fn handle_unmatched() -> impl Responder {
        Self::not_found_response()
    }

    /// 同步阶段只拷贝原始 header
    fn scan_meta(req: &HttpRequest) -> ScanRequestMeta {
        let header = |name: HeaderName| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        };
        ScanRequestMeta {
            user_agent: header(USER_AGENT),
            ip_source: forwarded_for(req),
            referrer: header(REFERER),
        }
    }

    fn finish_redirect(qr: &QrCode) -> HttpResponse {
        HttpResponse::build(StatusCode::FOUND)
            .insert_header((LOCATION, qr.destination_url.as_str()))
            .finish()
    }

    #[inline]
    pub fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("QR Code not found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// Redirect 路由配置
///
/// 必须最后注册，否则 `/{code}` 会吞掉 `/health` 之类的单段路径。
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(RedirectService::handle_root))
        .route("/", web::head().to(RedirectService::handle_root))
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect))
}
