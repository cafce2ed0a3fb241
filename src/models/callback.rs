// 支付回调数据模型
// 网关以 application/x-www-form-urlencoded 格式POST到商户回调地址

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::constants::is_success_code;

/// 回调必填字段 (表单字段名)
pub const REQUIRED_CALLBACK_FIELDS: [&str; 5] =
    ["merchantCode", "amount", "merchantOrderId", "resultCode", "signature"];

/// 支付回调数据
///
/// 所有字段保留表单中的原始字符串，`amount` 不做数字转换，
/// 以保证签名按收到的表示重新计算。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CallbackData {
    pub merchant_code: String,
    pub amount: String,
    pub merchant_order_id: String,
    pub product_detail: String,
    pub additional_param: String,
    pub payment_code: String,
    pub result_code: String,
    pub merchant_user_id: String,
    pub reference: String,
    pub signature: String,
    pub publisher_order_id: String,
    /// ShopeePay用户哈希
    pub sp_user_hash: String,
    pub settlement_date: String,
    pub issuer_code: String,
}

impl CallbackData {
    /// 从表单字段构建回调数据，缺失的字段记为空字符串
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let field = |name: &str| form.get(name).cloned().unwrap_or_default();

        Self {
            merchant_code: field("merchantCode"),
            amount: field("amount"),
            merchant_order_id: field("merchantOrderId"),
            product_detail: field("productDetail"),
            additional_param: field("additionalParam"),
            payment_code: field("paymentCode"),
            result_code: field("resultCode"),
            merchant_user_id: field("merchantUserId"),
            reference: field("reference"),
            signature: field("signature"),
            publisher_order_id: field("publisherOrderId"),
            sp_user_hash: field("spUserHash"),
            settlement_date: field("settlementDate"),
            issuer_code: field("issuerCode"),
        }
    }

    /// 缺失或为空的必填字段
    pub fn missing_required_fields(&self) -> Vec<String> {
        let values = [
            &self.merchant_code,
            &self.amount,
            &self.merchant_order_id,
            &self.result_code,
            &self.signature,
        ];

        REQUIRED_CALLBACK_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// 支付是否成功 (resultCode == "00")
    pub fn is_successful(&self) -> bool {
        is_success_code(&self.result_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_form_extracts_all_fields() {
        let data = CallbackData::from_form(&form(&[
            ("merchantCode", "DXXXX"),
            ("amount", "40000"),
            ("merchantOrderId", "ORDER123"),
            ("productDetail", "Test Product"),
            ("paymentCode", "VC"),
            ("resultCode", "00"),
            ("merchantUserId", "user-1"),
            ("reference", "DEV123456789"),
            ("signature", "abc"),
            ("publisherOrderId", "PUB1"),
            ("spUserHash", "hash"),
            ("settlementDate", "2024-01-03"),
            ("issuerCode", "93600911"),
        ]));

        assert_eq!(data.merchant_code, "DXXXX");
        assert_eq!(data.amount, "40000");
        assert_eq!(data.payment_code, "VC");
        assert_eq!(data.merchant_user_id, "user-1");
        assert_eq!(data.publisher_order_id, "PUB1");
        assert_eq!(data.sp_user_hash, "hash");
        assert_eq!(data.settlement_date, "2024-01-03");
        assert_eq!(data.issuer_code, "93600911");
        assert_eq!(data.additional_param, "");
        assert!(data.missing_required_fields().is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let data = CallbackData::from_form(&form(&[
            ("merchantCode", "DXXXX"),
            ("merchantOrderId", "ORDER123"),
            ("signature", "d5df5a9d6807a8d7fae5b76e14c6bf4a"),
        ]));
        assert_eq!(data.missing_required_fields(), vec!["amount", "resultCode"]);
    }

    #[test]
    fn test_is_successful() {
        let mut data = CallbackData {
            result_code: "00".to_string(),
            ..Default::default()
        };
        assert!(data.is_successful());

        for code in ["01", "02", "0", ""] {
            data.result_code = code.to_string();
            assert!(!data.is_successful());
        }
    }

    #[test]
    fn test_deserialize_from_form_names() {
        let data: CallbackData = serde_json::from_str(
            r#"{"merchantCode":"DXXXX","amount":"40000","spUserHash":"h"}"#,
        )
        .unwrap();
        assert_eq!(data.sp_user_hash, "h");
        assert_eq!(data.result_code, "");
    }
}
