use std::sync::Arc;

use actix_web::{Responder, web};

use super::helpers::api_result;
use crate::api::UserIdentity;
use crate::services::AnalyticsService;

pub struct AnalyticsApi;

impl AnalyticsApi {
    /// 单个 QR 码的扫码统计
    pub async fn get_stats(
        user: UserIdentity,
        path: web::Path<String>,
        service: web::Data<Arc<AnalyticsService>>,
    ) -> impl Responder {
        api_result(service.get_stats(&path.into_inner(), user.id()).await)
    }
}

pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics").route("/{qr_id}", web::get().to(AnalyticsApi::get_stats))
}
