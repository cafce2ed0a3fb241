// 支付回调处理器
// 验证网关回调并交给业务处理函数，按结果返回 200 / 400 / 500

use std::collections::HashMap;
use std::future::Future;

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::models::CallbackData;
use crate::services::DuitkuClient;
use crate::state::AppState;

/// 处理成功时返回给网关的确认内容
pub const CALLBACK_ACK: &str = "OK";

/// 验证回调并调用业务处理函数
///
/// 验证失败返回400，业务处理失败返回500，均以错误文本作为响应体；
/// 成功返回200和固定确认内容。
///
/// # Arguments
/// * `client` - 网关客户端 (提供API密钥)
/// * `form` - 回调表单字段
/// * `handler` - 业务处理函数
///
/// # Returns
/// * HTTP响应
pub async fn handle_callback<F, Fut>(
    client: &DuitkuClient,
    form: &HashMap<String, String>,
    handler: F,
) -> HttpResponse
where
    F: FnOnce(CallbackData) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let callback = match client.parse_callback(form) {
        Ok(callback) => callback,
        Err(e) => {
            log::warn!(target: client.log_target(), "Rejected callback: {}", e);
            return HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(e.to_string());
        }
    };

    let order_id = callback.merchant_order_id.clone();
    if let Err(e) = handler(callback).await {
        log::error!(
            target: client.log_target(),
            "Callback handler failed for order {}: {:#}",
            order_id,
            e
        );
        return HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(e.to_string());
    }

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(CALLBACK_ACK)
}

/// 支付回调
///
/// POST /callback
///
/// 请求体: application/x-www-form-urlencoded 回调表单
/// 响应: "OK" 或错误文本
pub async fn duitku_callback(
    data: web::Data<AppState>,
    form: web::Form<HashMap<String, String>>,
) -> ActixResult<HttpResponse> {
    let response = handle_callback(&data.client, &form, |callback| async move {
        log::info!(
            "Received callback: OrderID={}, Amount={}, Status={}",
            callback.merchant_order_id,
            callback.amount,
            callback.result_code
        );

        if callback.is_successful() {
            log::info!("Payment successful for order {}", callback.merchant_order_id);
        } else {
            log::warn!(
                "Payment failed for order {} with code {}",
                callback.merchant_order_id,
                callback.result_code
            );
        }

        Ok(())
    })
    .await;

    Ok(response)
}
