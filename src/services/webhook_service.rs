// 支付回调验证服务
// 解析网关POST到商户回调地址的表单，检查必填字段并验证MD5签名

use std::collections::HashMap;

use crate::config::DEFAULT_LOG_TARGET;
use crate::error::{DuitkuError, Result};
use crate::models::CallbackData;
use crate::services::client::DuitkuClient;
use crate::utils::crypto::{sign_md5, signatures_match};

/// 计算回调签名
///
/// MD5(merchantCode + amount + merchantOrderId + apiKey)，
/// `amount` 使用表单中的原始字符串。
pub fn callback_signature(callback: &CallbackData, api_key: &str) -> String {
    sign_md5(
        api_key,
        &[&callback.merchant_code, &callback.amount, &callback.merchant_order_id],
    )
}

/// 解析并验证回调表单
///
/// 先检查必填字段，再验证签名。
///
/// # Arguments
/// * `form` - 回调表单字段
/// * `api_key` - 商户API密钥
///
/// # Returns
/// * 验证通过的回调数据
pub fn parse_and_verify(form: &HashMap<String, String>, api_key: &str) -> Result<CallbackData> {
    verify_form(form, api_key, DEFAULT_LOG_TARGET)
}

fn verify_form(
    form: &HashMap<String, String>,
    api_key: &str,
    log_target: &str,
) -> Result<CallbackData> {
    let callback = CallbackData::from_form(form);

    let missing = callback.missing_required_fields();
    if !missing.is_empty() {
        return Err(DuitkuError::MissingFields(missing));
    }

    let expected = callback_signature(&callback, api_key);
    if !signatures_match(&expected, &callback.signature) {
        log::warn!(
            target: log_target,
            "Invalid callback signature for order {} (reference {})",
            callback.merchant_order_id,
            callback.reference
        );
        return Err(DuitkuError::InvalidSignature);
    }

    Ok(callback)
}

impl DuitkuClient {
    /// 使用客户端的API密钥解析并验证回调表单
    ///
    /// # Arguments
    /// * `form` - 回调表单字段
    ///
    /// # Returns
    /// * 验证通过的回调数据
    pub fn parse_callback(&self, form: &HashMap<String, String>) -> Result<CallbackData> {
        let callback = verify_form(form, self.api_key(), self.log_target())?;

        log::info!(
            target: self.log_target(),
            "Verified callback for order {}: resultCode={} reference={}",
            callback.merchant_order_id,
            callback.result_code,
            callback.reference
        );

        Ok(callback)
    }

    /// 验证已解析回调数据的签名
    pub fn verify_callback_signature(&self, callback: &CallbackData) -> bool {
        let expected = callback_signature(callback, self.api_key());
        signatures_match(&expected, &callback.signature)
    }
}
