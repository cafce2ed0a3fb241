// 健康检查API处理器
// 提供服务状态和网关环境信息

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;

use crate::config::Environment;
use crate::state::AppState;

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 版本信息
    pub version: String,
    /// 网关环境
    pub environment: Environment,
    /// 商户代码
    pub merchant_code: String,
    /// 当前时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// 基础健康检查
///
/// GET /health
///
/// 响应: HealthResponse
pub async fn health_check(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let health = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: data.client.environment(),
        merchant_code: data.client.merchant_code().to_string(),
        timestamp: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok().json(health))
}
