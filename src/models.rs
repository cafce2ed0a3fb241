// Duitku 数据模型定义
// 包含支付方式、交易、回调等接口的请求和响应结构

mod callback;
pub mod constants;
mod payment_method;
mod transaction;

// 重新导出核心类型
pub use callback::*;
pub use constants::is_success_code;
pub use payment_method::*;
pub use transaction::*;

use serde::{Deserialize, Serialize};

/// 网关错误响应 (非200 HTTP状态时返回)
///
/// 兼容 `{code, message}` 与 `{responseCode, responseMessage}` 两种写法。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "responseCode", alias = "statusCode", default)]
    pub code: String,
    #[serde(alias = "responseMessage", alias = "statusMessage", alias = "Message", default)]
    pub message: String,
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// 示例服务的标准API响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 响应状态码
    pub code: i32,
    /// 响应消息
    pub message: String,
    /// 响应数据
    pub data: Option<T>,
    /// 响应时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "Success".to_string(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    /// 创建错误响应
    pub fn error(code: i32, message: &str) -> ApiResponse<()> {
        ApiResponse {
            code,
            message: message.to_string(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}
