// HTTP传输层
// 客户端只依赖 send(method, url, body) -> (status, body) 能力，默认实现基于reqwest

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use tokio::time::Duration;

use crate::error::{DuitkuError, Result};

/// 默认User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("duitku-rs/", env!("CARGO_PKG_VERSION"));

/// 原始HTTP响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP状态码
    pub status: u16,
    /// 响应体
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// 响应体文本 (非UTF-8字节会被替换)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP传输抽象
///
/// 实现方负责超时控制；网络错误和超时返回 [`DuitkuError::Transport`]。
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 发送JSON请求体
    async fn send(&self, method: Method, url: &str, body: Vec<u8>) -> Result<TransportResponse>;
}

/// 基于reqwest的传输实现
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 创建带超时设置的传输实例
    ///
    /// # Arguments
    /// * `timeout` - 单次请求超时时间
    ///
    /// # Returns
    /// * 传输实例
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| DuitkuError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// 使用调用方提供的reqwest客户端
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, method: Method, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse { status, body })
    }
}
