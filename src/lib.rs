//! QR Linker - dynamic QR code service
//!
//! A printed QR code encodes a short URL (`https://host/{code}`). The code's
//! destination can be changed at any time without reprinting, and every scan
//! is recorded for the owner's dashboard.
//!
//! # Architecture
//! - `services`: short code resolution, generation and QR code management
//! - `analytics`: scan classification and non-blocking scan recording
//! - `storage`: SeaORM-backed persistence (SQLite / MySQL / PostgreSQL)
//! - `api`: HTTP handlers (redirect, health, dashboard JSON API)
//! - `config`: TOML + environment configuration
//! - `runtime`: startup wiring and the HTTP server
//! - `system`: logging

pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
