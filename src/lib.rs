// Duitku支付网关客户端
// 请求签名、接口调用和支付回调验证

//! Client for the Duitku payment gateway.
//!
//! ```no_run
//! use duitku::{DuitkuClient, DuitkuConfig};
//!
//! # async fn run() -> duitku::Result<()> {
//! let client = DuitkuClient::new(&DuitkuConfig::new("DXXXX", "your-api-key"))?;
//! let methods = client.get_payment_methods(10000).await?;
//! for method in methods {
//!     println!("{} {}", method.payment_method, method.payment_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Inbound callbacks are verified with [`DuitkuClient::parse_callback`] or,
//! inside an actix-web handler, with [`handlers::handle_callback`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use config::{DuitkuConfig, Environment};
pub use error::{DuitkuError, Result};
pub use models::{
    CallbackData, PaymentMethod, TransactionRequest, TransactionResponse,
    TransactionStatusResponse,
};
pub use services::{DuitkuClient, HttpTransport, ReqwestTransport, TransportResponse};
