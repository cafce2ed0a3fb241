// API处理器模块
// 支付回调处理和示例服务的HTTP请求处理逻辑

pub mod health_handlers;
pub mod payment_handlers;
pub mod webhook_handlers;

// 重新导出处理器
pub use health_handlers::*;
pub use payment_handlers::*;
pub use webhook_handlers::*;
