// 支付服务
// 支付方式查询、创建交易、查询交易状态三个接口的请求构建和响应解析

use chrono::Local;

use crate::error::{DuitkuError, Result};
use crate::models::{
    CheckTransactionRequest, GetPaymentMethodsRequest, PaymentMethod, PaymentMethodResponse,
    SignedTransactionRequest, TransactionRequest, TransactionResponse, TransactionStatusResponse,
};
use crate::services::client::DuitkuClient;
use crate::utils::validation::validate_order_id;

/// 支付方式查询接口
pub const GET_PAYMENT_METHOD_ENDPOINT: &str = "merchant/paymentmethod/getpaymentmethod";
/// 创建交易接口
pub const INQUIRY_ENDPOINT: &str = "merchant/v2/inquiry";
/// 查询交易状态接口
pub const TRANSACTION_STATUS_ENDPOINT: &str = "merchant/transactionStatus";

/// 支付方式查询使用的时间格式
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl DuitkuClient {
    /// 查询指定金额可用的支付方式
    ///
    /// 请求时间取本机当前时间。
    ///
    /// # Arguments
    /// * `amount` - 金额 (印尼盾)
    ///
    /// # Returns
    /// * 可用支付方式列表
    pub async fn get_payment_methods(&self, amount: i64) -> Result<Vec<PaymentMethod>> {
        let datetime = Local::now().format(DATETIME_FORMAT).to_string();
        self.get_payment_methods_at(amount, &datetime).await
    }

    /// 使用指定请求时间查询可用支付方式
    ///
    /// # Arguments
    /// * `amount` - 金额 (印尼盾)
    /// * `datetime` - `YYYY-MM-DD HH:MM:SS` 格式的请求时间
    ///
    /// # Returns
    /// * 可用支付方式列表；网关返回非 "00" 时返回 `Api` 错误
    pub async fn get_payment_methods_at(
        &self,
        amount: i64,
        datetime: &str,
    ) -> Result<Vec<PaymentMethod>> {
        if amount <= 0 {
            return Err(DuitkuError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }

        let amount_str = amount.to_string();
        let signature =
            self.create_signature_sha256(&[self.merchant_code(), &amount_str, datetime]);

        let request = GetPaymentMethodsRequest {
            merchant_code: self.merchant_code().to_string(),
            amount,
            datetime: datetime.to_string(),
            signature,
        };

        let response: PaymentMethodResponse =
            self.do_request(GET_PAYMENT_METHOD_ENDPOINT, &request).await?;

        if !response.is_successful() {
            log::warn!(
                target: self.log_target(),
                "Error getting payment methods: {} ({})",
                response.response_message,
                response.response_code
            );
            return Err(DuitkuError::Api {
                code: response.response_code,
                message: response.response_message,
            });
        }

        log::debug!(
            target: self.log_target(),
            "Got {} payment methods for amount {}",
            response.payment_fee.len(),
            amount
        );

        Ok(response.payment_fee)
    }

    /// 创建交易
    ///
    /// 签名为 MD5(merchantCode + merchantOrderId + paymentAmount + apiKey)。
    /// 网关状态码非 "00" 视为失败。
    ///
    /// # Arguments
    /// * `request` - 创建交易请求
    ///
    /// # Returns
    /// * 网关返回的交易信息 (支付链接、虚拟账号、QRIS内容等)
    pub async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse> {
        request.validate()?;

        let amount_str = request.payment_amount.to_string();
        let signature = self.create_signature_md5(&[
            self.merchant_code(),
            &request.merchant_order_id,
            &amount_str,
        ]);

        let signed = SignedTransactionRequest {
            request,
            merchant_code: self.merchant_code().to_string(),
            signature,
        };

        let response: TransactionResponse = self.do_request(INQUIRY_ENDPOINT, &signed).await?;

        if !response.is_successful() {
            log::warn!(
                target: self.log_target(),
                "Error creating transaction {}: {} ({})",
                request.merchant_order_id,
                response.status_message,
                response.status_code
            );
            return Err(DuitkuError::Api {
                code: response.status_code,
                message: response.status_message,
            });
        }

        log::info!(
            target: self.log_target(),
            "Created transaction {} with reference {}",
            request.merchant_order_id,
            response.reference
        );

        Ok(response)
    }

    /// 查询交易状态
    ///
    /// 签名为 MD5(merchantCode + merchantOrderId + apiKey)。
    /// 待支付、已取消等状态都是正常结果，由调用方检查 `status_code`。
    ///
    /// # Arguments
    /// * `merchant_order_id` - 商户订单号
    ///
    /// # Returns
    /// * 交易状态
    pub async fn check_transaction(
        &self,
        merchant_order_id: &str,
    ) -> Result<TransactionStatusResponse> {
        validate_order_id(merchant_order_id)?;

        let signature = self.create_signature_md5(&[self.merchant_code(), merchant_order_id]);

        let request = CheckTransactionRequest {
            merchant_code: self.merchant_code().to_string(),
            merchant_order_id: merchant_order_id.to_string(),
            signature,
        };

        let response: TransactionStatusResponse =
            self.do_request(TRANSACTION_STATUS_ENDPOINT, &request).await?;

        log::debug!(
            target: self.log_target(),
            "Transaction {} status: {} ({})",
            merchant_order_id,
            response.status_message,
            response.status_code
        );

        Ok(response)
    }
}
