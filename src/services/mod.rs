pub mod analytics_service;
pub mod qr_service;
pub mod resolver;
pub mod short_code;

pub use analytics_service::AnalyticsService;
pub use qr_service::{CreateQrRequest, QrService};
pub use resolver::{Resolution, Resolver, ResolverSettings};
pub use short_code::{MAX_ATTEMPTS, ShortCodeGenerator};
