//! 服务启动与运行
//!
//! - `startup`: 组装存储和各服务
//! - `server`: 路由注册与 HTTP 服务器
//! - `shutdown`: 优雅关闭

pub mod server;
pub mod shutdown;
pub mod startup;

pub use server::{configure_app, run_server};
pub use startup::{StartupContext, prepare_server_startup};
