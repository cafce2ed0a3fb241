// 交易数据模型
// 定义创建交易、查询交易状态接口的请求和响应结构

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::models::constants::{is_success_code, status};
use crate::utils::validation::{validate_order_id, InputValidator};

/// 创建交易请求
///
/// 必填字段直接作为结构体字段；可选的嵌套结构各自独立为 `Option`，
/// 未设置时不出现在请求JSON中。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// 交易金额 (整数，印尼盾)
    pub payment_amount: i64,
    /// 商户订单号
    pub merchant_order_id: String,
    /// 商品描述
    pub product_details: String,
    /// 客户邮箱
    pub email: String,
    /// 支付方式代码，见 [`crate::models::constants::payment_method`]
    pub payment_method: String,
    /// 虚拟账户上显示的客户名称
    pub customer_va_name: String,
    /// 支付完成后跳转地址
    pub return_url: String,
    /// 异步回调地址
    pub callback_url: String,
    /// 有效期 (分钟)
    pub expiry_period: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_user_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_details: Option<Vec<ItemDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_detail: Option<CustomerDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_link: Option<AccountLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_detail: Option<CreditCardDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subscription: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_detail: Option<SubscriptionDetail>,
}

impl TransactionRequest {
    /// 检查必填字段和字段格式
    ///
    /// # Returns
    /// * 缺少必填字段时返回 `MissingFields`，格式不合法时返回 `Validation`
    pub fn validate(&self) -> Result<()> {
        let mut validator = InputValidator::new();

        validator.validate_required("merchantOrderId", &self.merchant_order_id);
        validator.validate_required("productDetails", &self.product_details);
        validator.validate_required("email", &self.email);
        validator.validate_required("paymentMethod", &self.payment_method);
        validator.validate_required("customerVaName", &self.customer_va_name);
        validator.validate_required("callbackUrl", &self.callback_url);
        validator.validate_required("returnUrl", &self.return_url);

        validator.validate_positive("paymentAmount", self.payment_amount);
        validator.validate_positive("expiryPeriod", i64::from(self.expiry_period));
        validator.validate_email_field("email", &self.email);
        validator.validate_url_field("callbackUrl", &self.callback_url);
        validator.validate_url_field("returnUrl", &self.return_url);

        if let Some(detail) = &self.subscription_detail {
            if !(1..=4).contains(&detail.frequency_type) {
                validator.add_error("subscriptionDetail.frequencyType", "must be between 1 and 4");
            }
        }

        validator.into_result()?;
        validate_order_id(&self.merchant_order_id)
    }
}

/// 客户详情
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}

/// 账单/收货地址
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    pub country_code: String,
}

/// 商品明细
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDetail {
    pub name: String,
    pub price: i64,
    pub quantity: i32,
}

/// 电子钱包账户绑定 (OVO / ShopeePay)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountLink {
    pub credential_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovo: Option<OvoDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopee: Option<ShopeeDetail>,
}

/// OVO支付明细
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OvoDetail {
    pub payment_details: Vec<OvoPaymentDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OvoPaymentDetail {
    /// 如 "CASH"
    pub payment_type: String,
    pub amount: i64,
}

/// ShopeePay支付明细
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShopeeDetail {
    pub use_coin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_id: Option<String>,
}

/// 信用卡收单设置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardDetail {
    pub acquirer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_whitelist: Option<Vec<String>>,
}

/// 信用卡订阅设置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetail {
    pub description: String,
    /// 见 [`crate::models::constants::frequency`]
    pub frequency_type: i32,
    pub frequency_interval: i32,
    pub total_no_of_cycles: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_run_date: Option<String>,
}

/// 已签名的创建交易请求 (实际发送的JSON)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransactionRequest<'a> {
    #[serde(flatten)]
    pub request: &'a TransactionRequest,
    pub merchant_code: String,
    /// MD5(merchantCode + merchantOrderId + paymentAmount + apiKey)
    pub signature: String,
}

/// 创建交易响应
///
/// ```json
/// {
///   "merchantCode": "DXXXX",
///   "reference": "DXXXXCX80TZJ85Q70QCI",
///   "paymentUrl": "https://sandbox.duitku.com/topup/topupdirectv2.aspx?ref=BCA7WZ7EIDXXXXWEC",
///   "vaNumber": "7007014001444348",
///   "qrString": "",
///   "amount": "40000",
///   "statusCode": "00",
///   "statusMessage": "SUCCESS"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    #[serde(default)]
    pub merchant_code: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub payment_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub va_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub qr_string: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
}

impl TransactionResponse {
    pub fn is_successful(&self) -> bool {
        is_success_code(&self.status_code)
    }
}

/// 查询交易状态请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckTransactionRequest {
    pub merchant_code: String,
    pub merchant_order_id: String,
    /// MD5(merchantCode + merchantOrderId + apiKey)
    pub signature: String,
}

/// 查询交易状态响应
///
/// ```json
/// {
///   "merchantOrderId": "abcde12345",
///   "reference": "DXXXXCX80TZJ85Q70QCI",
///   "amount": "100000",
///   "fee": "0.00",
///   "statusCode": "00",
///   "statusMessage": "SUCCESS"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusResponse {
    #[serde(default)]
    pub merchant_order_id: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub fee: String,
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
}

impl TransactionStatusResponse {
    /// 交易是否已支付成功
    pub fn is_successful(&self) -> bool {
        is_success_code(&self.status_code)
    }

    /// 交易是否仍在处理中
    pub fn is_pending(&self) -> bool {
        self.status_code == status::PENDING
    }

    /// 手续费 (十进制)
    pub fn fee_amount(&self) -> Option<Decimal> {
        Decimal::from_str(self.fee.trim()).ok()
    }
}

// 网关部分版本以数字返回金额，统一转为字符串保存原始表示
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
