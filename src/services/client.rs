// Duitku API客户端
// 持有商户凭证和传输层，负责请求签名、发送JSON请求和解析响应

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::Duration;

use crate::config::{DuitkuConfig, Environment};
use crate::error::{DuitkuError, Result};
use crate::models::ErrorResponse;
use crate::services::transport::{HttpTransport, ReqwestTransport};
use crate::utils::crypto::{sign_md5, sign_sha256};

/// Duitku API客户端
///
/// 创建后不可变，可以 `clone` 后在多个任务间共享。
#[derive(Clone)]
pub struct DuitkuClient {
    merchant_code: String,
    api_key: String,
    environment: Environment,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    log_every_request_and_response: bool,
    log_target: String,
}

impl std::fmt::Debug for DuitkuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuitkuClient")
            .field("merchant_code", &self.merchant_code)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DuitkuClient {
    /// 创建使用默认reqwest传输的客户端
    ///
    /// # Arguments
    /// * `config` - 网关客户端配置
    ///
    /// # Returns
    /// * 客户端实例
    pub fn new(config: &DuitkuConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// 创建使用自定义传输层的客户端
    ///
    /// # Arguments
    /// * `config` - 网关客户端配置
    /// * `transport` - 调用方提供的HTTP传输实现
    ///
    /// # Returns
    /// * 客户端实例
    pub fn with_transport(config: &DuitkuConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            merchant_code: config.merchant_code.clone(),
            api_key: config.api_key.clone(),
            environment: config.environment,
            base_url: config.resolved_base_url().trim_end_matches('/').to_string(),
            transport,
            log_every_request_and_response: config.log_every_request_and_response,
            log_target: config.log_target.clone(),
        }
    }

    /// 覆盖API地址 (测试桩或代理)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn merchant_code(&self) -> &str {
        &self.merchant_code
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn log_target(&self) -> &str {
        &self.log_target
    }

    /// 生成SHA256签名 (字段后追加API密钥)
    pub(crate) fn create_signature_sha256(&self, fields: &[&str]) -> String {
        sign_sha256(&self.api_key, fields)
    }

    /// 生成MD5签名 (字段后追加API密钥)
    pub(crate) fn create_signature_md5(&self, fields: &[&str]) -> String {
        sign_md5(&self.api_key, fields)
    }

    /// 发送POST请求并解析响应
    ///
    /// 非200响应按错误信封解析为 [`DuitkuError::Api`]；
    /// 响应体无法解析时返回 [`DuitkuError::Decoding`]。
    ///
    /// # Arguments
    /// * `endpoint` - 相对API地址的路径
    /// * `body` - 请求体
    ///
    /// # Returns
    /// * 解析后的响应
    pub(crate) async fn do_request<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let payload = serde_json::to_vec(body)
            .map_err(|e| DuitkuError::Validation(format!("failed to encode request body: {}", e)))?;

        if self.log_every_request_and_response {
            log::info!(target: self.log_target(), "-=-=-=-= [DuitkuClient][do_request] -=-=-=-=");
            log::info!(target: self.log_target(), "Request method: POST");
            log::info!(target: self.log_target(), "Request url: {}", url);
            log::info!(target: self.log_target(), "Request body: {}", String::from_utf8_lossy(&payload));
        }

        let response = match self.transport.send(Method::POST, &url, payload).await {
            Ok(response) => response,
            Err(e) => {
                log::error!(target: self.log_target(), "Request to {} failed: {}", url, e);
                return Err(e);
            }
        };

        if self.log_every_request_and_response {
            log::info!(target: self.log_target(), "Response status code: {}", response.status);
            log::info!(target: self.log_target(), "Response body: {}", response.body_text());
            log::info!(target: self.log_target(), "-=-=-=-= [DuitkuClient][do_request] -=-=-=-=");
        }

        if !response.is_ok() {
            let error: ErrorResponse = serde_json::from_slice(&response.body).map_err(|e| {
                DuitkuError::Decoding(format!(
                    "error decoding error response (HTTP {}): {}",
                    response.status, e
                ))
            })?;

            log::warn!(
                target: self.log_target(),
                "{} returned HTTP {}: {}",
                endpoint,
                response.status,
                error
            );

            let code = if error.code.is_empty() {
                response.status.to_string()
            } else {
                error.code
            };
            return Err(DuitkuError::Api {
                code,
                message: error.message,
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| DuitkuError::Decoding(format!("error decoding response: {}", e)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
    use crate::services::transport::TransportResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录请求并返回固定响应的传输桩
    pub(crate) struct StubTransport {
        status: u16,
        body: String,
        pub(crate) requests: Mutex<Vec<(String, serde_json::Value)>>,
    }

    impl StubTransport {
        pub(crate) fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn last_request(&self) -> (String, serde_json::Value) {
            self.requests.lock().unwrap().last().cloned().expect("no request recorded")
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn send(&self, _method: Method, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
            let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
            self.requests.lock().unwrap().push((url.to_string(), json));
            Ok(TransportResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn send(&self, _method: Method, _url: &str, _body: Vec<u8>) -> Result<TransportResponse> {
            Err(DuitkuError::Transport("request timed out".to_string()))
        }
    }

    /// 按target收集日志记录的测试logger
    struct CaptureLogger;

    static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
    static CAPTURED: Mutex<Vec<(String, log::Level, String)>> = Mutex::new(Vec::new());

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED.lock().unwrap_or_else(|e| e.into_inner()).push((
                record.target().to_string(),
                record.level(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    pub(crate) fn install_capture_logger() {
        if log::set_logger(&CAPTURE_LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    }

    /// 指定target下已记录的 (级别, 消息)
    pub(crate) fn captured_records(target: &str) -> Vec<(log::Level, String)> {
        CAPTURED
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(t, _, _)| t == target)
            .map(|(_, level, message)| (*level, message.clone()))
            .collect()
    }

    pub(crate) fn test_config() -> DuitkuConfig {
        DuitkuConfig::new("DXXXX", "DXXXXCX80TZJ85Q70QCI")
    }

    #[test]
    fn test_new_client_base_url() {
        let client = DuitkuClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url(), SANDBOX_BASE_URL);
        assert_eq!(client.merchant_code(), "DXXXX");

        let mut config = test_config();
        config.environment = Environment::Production;
        let client = DuitkuClient::new(&config).unwrap();
        assert_eq!(client.base_url(), PRODUCTION_BASE_URL);
        assert_eq!(client.environment(), Environment::Production);

        let client = client.with_base_url("http://127.0.0.1:9090/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9090");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = DuitkuClient::new(&test_config()).unwrap();
        assert!(!format!("{:?}", client).contains("DXXXXCX80TZJ85Q70QCI"));
    }

    #[test]
    fn test_signature_helpers_append_api_key() {
        let mut config = test_config();
        config.api_key = "KEY1".to_string();
        let client = DuitkuClient::new(&config).unwrap();
        assert_eq!(
            client.create_signature_md5(&["DXXXX", "40000", "ORDER123"]),
            "b047e69ca36ca4f0c0171c4645f00683"
        );
        assert_eq!(
            client.create_signature_sha256(&["DXXXX", "40000", "ORDER123"]),
            "f3cec15d0f5ed2dca1e70e91b0a964e9b0aaeb7a1d027f73e819c963faf65078"
        );
    }

    #[tokio::test]
    async fn test_do_request_success() {
        let stub = StubTransport::new(200, r#"{"status":"ok"}"#);
        let client = DuitkuClient::with_transport(&test_config(), stub.clone())
            .with_base_url("http://stub");

        let value: serde_json::Value = client
            .do_request("/merchant/test", &serde_json::json!({"a": 1}))
            .await
            .unwrap();

        assert_eq!(value["status"], "ok");
        let (url, body) = stub.last_request();
        assert_eq!(url, "http://stub/merchant/test");
        assert_eq!(body["a"], 1);
    }

    #[tokio::test]
    async fn test_do_request_error_envelope() {
        let stub = StubTransport::new(401, r#"{"code":"401","message":"Wrong signature"}"#);
        let mut config = test_config();
        config.log_every_request_and_response = true;
        let client = DuitkuClient::with_transport(&config, stub);

        let err = client
            .do_request::<_, serde_json::Value>("merchant/test", &serde_json::json!({}))
            .await
            .unwrap_err();

        match err {
            DuitkuError::Api { code, message } => {
                assert_eq!(code, "401");
                assert_eq!(message, "Wrong signature");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_do_request_error_envelope_without_code_uses_http_status() {
        let stub = StubTransport::new(500, r#"{"Message":"An error has occurred."}"#);
        let client = DuitkuClient::with_transport(&test_config(), stub);

        let err = client
            .do_request::<_, serde_json::Value>("merchant/test", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.api_code(), Some("500"));
        assert_eq!(err.to_string(), "API error: 500: An error has occurred.");
    }

    #[tokio::test]
    async fn test_do_request_undecodable_bodies() {
        let stub = StubTransport::new(502, "<html>Bad Gateway</html>");
        let client = DuitkuClient::with_transport(&test_config(), stub);
        let err = client
            .do_request::<_, serde_json::Value>("merchant/test", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, DuitkuError::Decoding(ref msg) if msg.contains("HTTP 502")));

        let stub = StubTransport::new(200, "{invalid json");
        let client = DuitkuClient::with_transport(&test_config(), stub);
        let err = client
            .do_request::<_, serde_json::Value>("merchant/test", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, DuitkuError::Decoding(_)));
    }

    #[tokio::test]
    async fn test_request_dump_uses_configured_target() {
        install_capture_logger();
        let stub = StubTransport::new(200, r#"{"status":"ok"}"#);
        let mut config = test_config();
        config.log_every_request_and_response = true;
        config.log_target = "duitku-dump-test".to_string();
        let client = DuitkuClient::with_transport(&config, stub).with_base_url("http://stub");

        let _: serde_json::Value = client
            .do_request("merchant/test", &serde_json::json!({"a": 1}))
            .await
            .unwrap();

        let records = captured_records("duitku-dump-test");
        assert!(records.iter().any(|(_, m)| m == "Request url: http://stub/merchant/test"));
        assert!(records.iter().all(|(_, m)| !m.contains("DXXXXCX80TZJ85Q70QCI")));
    }

    #[tokio::test]
    async fn test_do_request_transport_failure() {
        let client = DuitkuClient::with_transport(&test_config(), Arc::new(FailingTransport));
        let err = client
            .do_request::<_, serde_json::Value>("merchant/test", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
