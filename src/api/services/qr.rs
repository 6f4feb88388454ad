//! QR 码管理接口（仪表盘使用）
//!
//! 所有操作都限定在调用方自己的 QR 码范围内。

use std::sync::Arc;

use actix_web::{Responder, web};
use tracing::info;

use super::helpers::api_result;
use super::types::{CreateQrBody, DeleteResult, UpdateQrBody};
use crate::api::UserIdentity;
use crate::services::{CreateQrRequest, QrService};

pub struct QrApi;

impl QrApi {
    pub async fn list(user: UserIdentity, service: web::Data<Arc<QrService>>) -> impl Responder {
        api_result(service.list(user.id()).await)
    }

    pub async fn create(
        user: UserIdentity,
        body: web::Json<CreateQrBody>,
        service: web::Data<Arc<QrService>>,
    ) -> impl Responder {
        let body = body.into_inner();
        let request = CreateQrRequest {
            destination_url: body.destination_url,
            title: body.title,
            design_config: body.design_config,
        };
        let result = service.create(user.id(), request).await;
        if let Ok(qr) = &result {
            info!("QR code {} created with short code {}", qr.id, qr.short_code);
        }
        api_result(result)
    }

    pub async fn get(
        user: UserIdentity,
        path: web::Path<String>,
        service: web::Data<Arc<QrService>>,
    ) -> impl Responder {
        api_result(service.get(&path.into_inner(), user.id()).await)
    }

    pub async fn update(
        user: UserIdentity,
        path: web::Path<String>,
        body: web::Json<UpdateQrBody>,
        service: web::Data<Arc<QrService>>,
    ) -> impl Responder {
        let id = path.into_inner();
        api_result(service.update(&id, user.id(), body.into_inner().into()).await)
    }

    pub async fn delete(
        user: UserIdentity,
        path: web::Path<String>,
        service: web::Data<Arc<QrService>>,
    ) -> impl Responder {
        let id = path.into_inner();
        let result = service.delete(&id, user.id()).await;
        if result.is_ok() {
            info!("QR code {} deleted", id);
        }
        api_result(result.map(|_| DeleteResult { success: true }))
    }
}

pub fn qr_routes() -> actix_web::Scope {
    web::scope("/qr")
        .route("", web::get().to(QrApi::list))
        .route("", web::post().to(QrApi::create))
        .route("/{id}", web::get().to(QrApi::get))
        .route("/{id}", web::put().to(QrApi::update))
        .route("/{id}", web::patch().to(QrApi::update))
        .route("/{id}", web::delete().to(QrApi::delete))
}
