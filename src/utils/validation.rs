// 数据验证工具函数
// 提供请求字段必填检查和格式检查功能

use regex::Regex;

use crate::error::{DuitkuError, Result};

/// 商户订单号最大长度
pub const MAX_ORDER_ID_LENGTH: usize = 50;

/// 验证邮箱地址格式
///
/// # Arguments
/// * `email` - 邮箱地址字符串
///
/// # Returns
/// * 邮箱是否有效
pub fn validate_email(email: &str) -> bool {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

/// 验证URL格式
///
/// # Arguments
/// * `url` - URL字符串
///
/// # Returns
/// * URL是否有效
pub fn validate_url(url: &str) -> bool {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$")
        .map(|re| re.is_match(url))
        .unwrap_or(false)
}

/// 验证商户订单号
///
/// # Arguments
/// * `order_id` - 商户订单号
///
/// # Returns
/// * 验证结果
pub fn validate_order_id(order_id: &str) -> Result<()> {
    if order_id.is_empty() {
        return Err(DuitkuError::MissingFields(vec!["merchantOrderId".to_string()]));
    }

    if order_id.chars().count() > MAX_ORDER_ID_LENGTH {
        return Err(DuitkuError::Validation(format!(
            "merchantOrderId too long (max {} characters)",
            MAX_ORDER_ID_LENGTH
        )));
    }

    Ok(())
}

/// 通用输入验证器
///
/// 先收集全部问题再统一返回: 有缺失字段时返回 `MissingFields`，
/// 否则有格式问题时返回 `Validation`。
#[derive(Debug, Default)]
pub struct InputValidator {
    missing: Vec<String>,
    errors: Vec<(String, String)>,
}

impl InputValidator {
    /// 创建新的验证器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加字段验证错误
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push((field.to_string(), message.to_string()));
    }

    /// 验证必填字段
    pub fn validate_required(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.missing.push(field.to_string());
        }
    }

    /// 验证正整数
    pub fn validate_positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.add_error(field, "must be greater than zero");
        }
    }

    /// 验证邮箱格式 (空值交给必填检查)
    pub fn validate_email_field(&mut self, field: &str, email: &str) {
        if !email.is_empty() && !validate_email(email) {
            self.add_error(field, "invalid email format");
        }
    }

    /// 验证URL格式 (空值交给必填检查)
    pub fn validate_url_field(&mut self, field: &str, url: &str) {
        if !url.is_empty() && !validate_url(url) {
            self.add_error(field, "invalid URL format");
        }
    }

    /// 检查是否有验证错误
    pub fn has_errors(&self) -> bool {
        !self.missing.is_empty() || !self.errors.is_empty()
    }

    /// 缺失的字段
    pub fn missing_fields(&self) -> &[String] {
        &self.missing
    }

    /// 转换为错误结果
    pub fn into_result(self) -> Result<()> {
        if !self.missing.is_empty() {
            return Err(DuitkuError::MissingFields(self.missing));
        }

        if !self.errors.is_empty() {
            let error_msg = self
                .errors
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DuitkuError::Validation(error_msg));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("customer@example.com"));
        assert!(validate_email("user.name+tag@domain.co.id"));

        assert!(!validate_email("invalid-email"));
        assert!(!validate_email("@domain.com"));
        assert!(!validate_email("user@"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/callback"));
        assert!(validate_url("http://localhost:8080/return?order_id=1"));

        assert!(!validate_url("example.com/callback"));
        assert!(!validate_url("ftp://example.com"));
    }

    #[test]
    fn test_validate_order_id() {
        assert!(validate_order_id("ORDER123").is_ok());
        assert!(matches!(
            validate_order_id(""),
            Err(DuitkuError::MissingFields(_))
        ));
        assert!(matches!(
            validate_order_id(&"A".repeat(51)),
            Err(DuitkuError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_fields_take_precedence() {
        let mut validator = InputValidator::new();
        validator.validate_required("email", "");
        validator.validate_required("returnUrl", "");
        validator.validate_positive("paymentAmount", 0);

        assert!(validator.has_errors());
        assert_eq!(validator.missing_fields(), ["email", "returnUrl"]);
        match validator.into_result() {
            Err(DuitkuError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["email".to_string(), "returnUrl".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_format_errors() {
        let mut validator = InputValidator::new();
        validator.validate_email_field("email", "invalid-email");
        validator.validate_url_field("callbackUrl", "not a url");
        validator.validate_url_field("returnUrl", "");

        match validator.into_result() {
            Err(DuitkuError::Validation(msg)) => {
                assert_eq!(msg, "email: invalid email format; callbackUrl: invalid URL format");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_valid_input() {
        let mut validator = InputValidator::new();
        validator.validate_required("email", "customer@example.com");
        validator.validate_positive("paymentAmount", 40000);
        assert!(!validator.has_errors());
        assert!(validator.into_result().is_ok());
    }
}
