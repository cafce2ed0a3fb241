// 配置管理模块
// 负责加载和管理客户端及示例服务配置

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// 沙箱环境API地址
pub const SANDBOX_BASE_URL: &str = "https://sandbox.duitku.com/webapi/api";
/// 生产环境API地址
pub const PRODUCTION_BASE_URL: &str = "https://passport.duitku.com/webapi/api";
/// 默认请求超时时间 (秒)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// 默认日志target
pub const DEFAULT_LOG_TARGET: &str = "duitku";

/// 网关环境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// 沙箱环境
    Sandbox,
    /// 生产环境
    Production,
}

impl Environment {
    /// 获取环境对应的API地址
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

/// 应用程序配置结构
#[derive(Debug, Clone)]
pub struct Config {
    /// 网关客户端配置
    pub duitku: DuitkuConfig,
    /// 示例服务器配置
    pub server: ServerConfig,
}

/// 网关客户端配置
///
/// 包含API密钥，不实现序列化。
#[derive(Clone)]
pub struct DuitkuConfig {
    /// 商户代码
    pub merchant_code: String,
    /// 商户API密钥 (签名用，不会发送到网关)
    pub api_key: String,
    /// 网关环境
    pub environment: Environment,
    /// 请求超时时间 (秒)
    pub timeout: u64,
    /// 是否记录每一次请求和响应
    pub log_every_request_and_response: bool,
    /// 客户端日志使用的target
    pub log_target: String,
    /// 覆盖环境默认的API地址
    pub base_url: Option<String>,
}

// 手动实现，避免API密钥出现在日志中
impl std::fmt::Debug for DuitkuConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuitkuConfig")
            .field("merchant_code", &self.merchant_code)
            .field("api_key", &"***")
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .field("log_every_request_and_response", &self.log_every_request_and_response)
            .field("log_target", &self.log_target)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DuitkuConfig {
    /// 使用默认设置创建沙箱配置
    pub fn new(merchant_code: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            merchant_code: merchant_code.into(),
            api_key: api_key.into(),
            environment: Environment::Sandbox,
            timeout: DEFAULT_TIMEOUT_SECS,
            log_every_request_and_response: false,
            log_target: DEFAULT_LOG_TARGET.to_string(),
            base_url: None,
        }
    }

    /// 实际使用的API地址
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }
}

/// 示例服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 服务器监听地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 对外访问地址 (用于生成回调和跳转地址)
    pub public_url: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // 加载.env文件，忽略错误

        let sandbox: bool = env::var("DUITKU_SANDBOX")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .context("Invalid DUITKU_SANDBOX")?;

        Ok(Config {
            duitku: DuitkuConfig {
                merchant_code: env::var("DUITKU_MERCHANT_CODE")
                    .context("DUITKU_MERCHANT_CODE environment variable is required")?,
                api_key: env::var("DUITKU_API_KEY")
                    .context("DUITKU_API_KEY environment variable is required")?,
                environment: if sandbox {
                    Environment::Sandbox
                } else {
                    Environment::Production
                },
                timeout: env::var("DUITKU_TIMEOUT")
                    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse()
                    .context("Invalid DUITKU_TIMEOUT")?,
                log_every_request_and_response: env::var("DUITKU_LOG_REQUESTS")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .context("Invalid DUITKU_LOG_REQUESTS")?,
                log_target: env::var("DUITKU_LOG_TARGET")
                    .unwrap_or_else(|_| DEFAULT_LOG_TARGET.to_string()),
                base_url: env::var("DUITKU_BASE_URL").ok().filter(|s| !s.is_empty()),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Invalid SERVER_PORT")?,
                public_url: env::var("SERVER_PUBLIC_URL").ok().filter(|s| !s.is_empty()),
            },
        })
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.duitku.merchant_code.trim().is_empty() {
            anyhow::bail!("Merchant code cannot be empty");
        }

        if self.duitku.api_key.trim().is_empty() {
            anyhow::bail!("API key cannot be empty");
        }

        if self.duitku.timeout == 0 {
            anyhow::bail!("Request timeout cannot be 0");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 对外访问地址，未配置时使用绑定地址
    pub fn public_url(&self) -> String {
        self.server
            .public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.bind_address()))
            .trim_end_matches('/')
            .to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            duitku: DuitkuConfig::new("", ""),
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                public_url: None,
            },
        }
    }
}
