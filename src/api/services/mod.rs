pub mod analytics;
pub mod error_code;
pub mod health;
pub mod helpers;
pub mod qr;
pub mod redirect;
pub mod types;

pub use analytics::{AnalyticsApi, analytics_routes};
pub use error_code::ErrorCode;
pub use health::{AppStartTime, HealthService, health_routes};
pub use qr::{QrApi, qr_routes};
pub use redirect::{RedirectService, redirect_routes};
pub use types::ApiResponse;
