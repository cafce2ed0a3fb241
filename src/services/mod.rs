// 服务层模块
// 网关客户端、HTTP传输、支付接口和回调验证

pub mod client;
pub mod payment_service;
pub mod transport;
pub mod webhook_service;

// 重新导出服务
pub use client::DuitkuClient;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
pub use webhook_service::{callback_signature, parse_and_verify};
