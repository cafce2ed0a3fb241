// 错误类型定义
// 客户端所有操作统一返回 DuitkuError

use thiserror::Error;

/// 客户端操作结果类型
pub type Result<T> = std::result::Result<T, DuitkuError>;

/// Duitku客户端错误
///
/// 调用方可以按类别区分处理:
/// - 输入问题 ([`Validation`](Self::Validation), [`MissingFields`](Self::MissingFields)): 修正输入，不要重试
/// - 回调签名不一致 ([`InvalidSignature`](Self::InvalidSignature)): 拒绝该回调
/// - 网络问题 ([`Transport`](Self::Transport)): 由调用方决定是否重试
/// - 网关业务错误 ([`Api`](Self::Api)): 携带网关返回的代码和消息
/// - 响应格式错误 ([`Decoding`](Self::Decoding)): 本次调用失败
#[derive(Debug, Error)]
pub enum DuitkuError {
    /// 字段格式或取值不合法
    #[error("validation failed: {0}")]
    Validation(String),

    /// 必填字段缺失或为空
    #[error("missing required parameters: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// 回调签名校验失败
    #[error("invalid callback signature")]
    InvalidSignature,

    /// 网络、超时或连接失败
    #[error("transport error: {0}")]
    Transport(String),

    /// 网关返回非成功状态码
    #[error("API error: {code}: {message}")]
    Api {
        /// 网关状态码 (如 "01")
        code: String,
        /// 网关返回的消息
        message: String,
    },

    /// 响应体不是合法JSON或结构不符
    #[error("decoding error: {0}")]
    Decoding(String),
}

impl DuitkuError {
    /// 是否为调用方输入错误 (对应HTTP 400)
    ///
    /// `Decoding` 来自网关响应，不属于输入错误。
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DuitkuError::Validation(_) | DuitkuError::MissingFields(_) | DuitkuError::InvalidSignature
        )
    }

    /// 是否可以由调用方重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, DuitkuError::Transport(_))
    }

    /// 网关返回的错误代码
    pub fn api_code(&self) -> Option<&str> {
        match self {
            DuitkuError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DuitkuError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DuitkuError::Transport(format!("request timed out: {}", err))
        } else {
            DuitkuError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DuitkuError {
    fn from(err: serde_json::Error) -> Self {
        DuitkuError::Decoding(err.to_string())
    }
}
