// 应用状态管理
// 示例服务共享的网关客户端和配置信息

use anyhow::{Context, Result};

use crate::config::Config;
use crate::services::DuitkuClient;

/// 应用全局状态
pub struct AppState {
    /// 网关客户端
    pub client: DuitkuClient,
    /// 应用配置
    pub config: Config,
}

impl AppState {
    /// 创建新的应用状态实例
    ///
    /// # Arguments
    /// * `config` - 应用配置
    ///
    /// # Returns
    /// * 应用状态实例
    pub fn new(config: Config) -> Result<Self> {
        let client = DuitkuClient::new(&config.duitku).context("Failed to create Duitku client")?;
        Ok(Self { client, config })
    }

    /// 使用已创建的客户端 (自定义传输或测试桩)
    pub fn with_client(client: DuitkuClient, config: Config) -> Self {
        Self { client, config }
    }
}
