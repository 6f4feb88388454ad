//! HTTP surface
//!
//! - `GET /`: liveness
//! - `GET /health`: readiness (storage ping)
//! - `GET /{code}`: short code redirect
//! - `/api/qr`, `/api/analytics`: dashboard JSON API

pub mod identity;
pub mod services;

pub use identity::{IdentityConfig, UserIdentity};
