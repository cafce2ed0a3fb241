// 支付方式数据模型
// 定义支付方式查询接口的请求和响应结构

use serde::{Deserialize, Serialize};

use crate::models::constants::is_success_code;

/// 可用支付方式
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// 支付方式代码 (如 "VA")
    pub payment_method: String,
    /// 支付方式名称 (如 "MAYBANK VA")
    pub payment_name: String,
    /// 图标URL
    #[serde(default)]
    pub payment_image: String,
    /// 总手续费
    #[serde(default)]
    pub total_fee: String,
}

/// 支付方式查询响应
///
/// ```json
/// {
///   "paymentFee": [
///     {
///       "paymentMethod": "VA",
///       "paymentName": "MAYBANK VA",
///       "paymentImage": "https://images.duitku.com/hotlink-ok/VA.PNG",
///       "totalFee": "0"
///     }
///   ],
///   "responseCode": "00",
///   "responseMessage": "SUCCESS"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodResponse {
    #[serde(default)]
    pub payment_fee: Vec<PaymentMethod>,
    pub response_code: String,
    #[serde(default)]
    pub response_message: String,
}

impl PaymentMethodResponse {
    pub fn is_successful(&self) -> bool {
        is_success_code(&self.response_code)
    }
}

/// 支付方式查询请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPaymentMethodsRequest {
    /// 商户代码 (该接口字段名为全小写)
    #[serde(rename = "merchantcode")]
    pub merchant_code: String,
    /// 金额 (整数，印尼盾)
    pub amount: i64,
    /// 请求时间 `YYYY-MM-DD HH:MM:SS`
    pub datetime: String,
    /// SHA256(merchantCode + amount + datetime + apiKey)
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_payment_method_response() {
        let body = json!({
            "paymentFee": [
                {
                    "paymentMethod": "VA",
                    "paymentName": "MAYBANK VA",
                    "paymentImage": "https://images.duitku.com/hotlink-ok/VA.PNG",
                    "totalFee": "0"
                },
                {
                    "paymentMethod": "BT",
                    "paymentName": "PERMATA VA",
                    "paymentImage": "https://images.duitku.com/hotlink-ok/PERMATA.PNG",
                    "totalFee": "0"
                }
            ],
            "responseCode": "00",
            "responseMessage": "SUCCESS"
        });

        let response: PaymentMethodResponse = serde_json::from_value(body).unwrap();
        assert!(response.is_successful());
        assert_eq!(response.payment_fee.len(), 2);
        assert_eq!(response.payment_fee[1].payment_method, "BT");
        assert_eq!(response.payment_fee[1].payment_name, "PERMATA VA");
    }

    #[test]
    fn test_error_response_without_payment_fee() {
        let response: PaymentMethodResponse =
            serde_json::from_str(r#"{"responseCode":"01","responseMessage":"Invalid signature"}"#)
                .unwrap();
        assert!(!response.is_successful());
        assert!(response.payment_fee.is_empty());
    }

    #[test]
    fn test_request_wire_names() {
        let request = GetPaymentMethodsRequest {
            merchant_code: "DXXXX".to_string(),
            amount: 10000,
            datetime: "2024-01-02 03:04:05".to_string(),
            signature: "abc".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "merchantcode": "DXXXX",
                "amount": 10000,
                "datetime": "2024-01-02 03:04:05",
                "signature": "abc"
            })
        );
    }
}
