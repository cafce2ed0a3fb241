// 支付示例API处理器
// 支付表单、创建交易、用户返回页、交易状态查询和支付方式列表

use actix_web::{http::header, web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::constants::status;
use crate::models::{ApiResponse, CustomerDetail, ItemDetail, TransactionRequest};
use crate::state::AppState;
use crate::utils::qr_string_to_data_url;

/// 示例订单的联系电话
const EXAMPLE_PHONE_NUMBER: &str = "08123456789";
/// 示例订单的有效期 (分钟)
const EXAMPLE_EXPIRY_MINUTES: i32 = 60;

const PAGE_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; }
        .form-group { margin-bottom: 15px; }
        label { display: block; margin-bottom: 5px; }
        input, select { width: 100%; padding: 8px; box-sizing: border-box; }
        button, .btn { display: inline-block; background: #4CAF50; color: white; padding: 10px 15px; border: none; text-decoration: none; border-radius: 4px; cursor: pointer; }
        .card { border: 1px solid #ddd; border-radius: 4px; padding: 20px; margin-top: 20px; }
        .status { font-weight: bold; }
        .success { color: green; }
        .pending { color: orange; }
        .failed { color: red; }
"#;

/// 支付表单
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    /// 金额 (印尼盾)
    pub amount: i64,
    /// 支付方式代码
    pub payment_method: String,
    /// 客户邮箱
    pub email: String,
    /// 客户姓名
    pub name: String,
}

/// 订单查询参数
#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub order_id: String,
}

/// 支付方式查询参数
#[derive(Debug, Deserialize)]
pub struct AmountQuery {
    pub amount: i64,
}

/// 支付表单页面
///
/// GET /
pub async fn index() -> ActixResult<HttpResponse> {
    let body = r#"
        <h1>Duitku Payment Example</h1>
        <form action="/payment" method="post">
            <div class="form-group">
                <label for="amount">Amount (IDR)</label>
                <input type="number" id="amount" name="amount" value="10000" required>
            </div>
            <div class="form-group">
                <label for="payment_method">Payment Method</label>
                <select id="payment_method" name="payment_method" required>
                    <option value="BC">BCA Virtual Account</option>
                    <option value="M2">Mandiri Virtual Account</option>
                    <option value="BT">Permata Virtual Account</option>
                    <option value="I1">BNI Virtual Account</option>
                    <option value="BR">BRI Virtual Account</option>
                    <option value="OV">OVO</option>
                    <option value="SP">ShopeePay</option>
                    <option value="LA">LinkAja</option>
                    <option value="DA">DANA</option>
                    <option value="QR">QRIS</option>
                    <option value="VC">Credit Card</option>
                </select>
            </div>
            <div class="form-group">
                <label for="email">Email</label>
                <input type="email" id="email" name="email" value="customer@example.com" required>
            </div>
            <div class="form-group">
                <label for="name">Name</label>
                <input type="text" id="name" name="name" value="John Doe" required>
            </div>
            <button type="submit">Pay Now</button>
        </form>
    "#;

    Ok(html_page("Duitku Payment Example", body))
}

/// 创建交易
///
/// POST /payment
///
/// 请求体: PaymentForm (表单)
/// 响应: 303跳转到支付页面，或显示QRIS二维码/虚拟账号
pub async fn create_payment(
    data: web::Data<AppState>,
    form: web::Form<PaymentForm>,
) -> ActixResult<HttpResponse> {
    let form = form.into_inner();
    let order_id = format!("ORDER-{}", Uuid::new_v4().simple());
    let public_url = data.config.public_url();

    let request = TransactionRequest {
        payment_amount: form.amount,
        merchant_order_id: order_id.clone(),
        product_details: "Product from Duitku Rust example".to_string(),
        email: form.email.clone(),
        payment_method: form.payment_method,
        customer_va_name: form.name.clone(),
        return_url: format!("{}/return?{}", public_url, order_query(&order_id)),
        callback_url: format!("{}/callback", public_url),
        expiry_period: EXAMPLE_EXPIRY_MINUTES,
        phone_number: Some(EXAMPLE_PHONE_NUMBER.to_string()),
        customer_detail: Some(CustomerDetail {
            first_name: form.name,
            last_name: String::new(),
            email: form.email,
            phone_number: Some(EXAMPLE_PHONE_NUMBER.to_string()),
            billing_address: None,
            shipping_address: None,
        }),
        item_details: Some(vec![ItemDetail {
            name: "Example Product".to_string(),
            price: form.amount,
            quantity: 1,
        }]),
        ..Default::default()
    };

    let response = match data.client.create_transaction(&request).await {
        Ok(response) => response,
        Err(e) if e.is_validation() => {
            log::warn!("Invalid payment request {}: {}", order_id, e);
            return Ok(HttpResponse::BadRequest().body(e.to_string()));
        }
        Err(e) => {
            log::error!("Error creating transaction {}: {}", order_id, e);
            return Ok(HttpResponse::InternalServerError().body("Error creating transaction"));
        }
    };

    log::info!(
        "Created transaction {} (reference {})",
        order_id,
        response.reference
    );

    if let Some(payment_url) = &response.payment_url {
        return Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, payment_url.as_str()))
            .finish());
    }

    if let Some(qr_string) = &response.qr_string {
        let data_url = match qr_string_to_data_url(qr_string) {
            Ok(data_url) => data_url,
            Err(e) => {
                log::error!("Failed to render QR code for {}: {:#}", order_id, e);
                return Ok(HttpResponse::InternalServerError().body("Error rendering QR code"));
            }
        };

        let body = format!(
            r#"
        <h1>Scan to Pay</h1>
        <div class="card">
            <p>Order ID: {order}</p>
            <p>Amount: Rp {amount}</p>
            <img src="{data_url}" alt="QRIS">
            <p><a href="/check-status?{query}" class="btn">Check Payment Status</a></p>
        </div>
        "#,
            order = escape_html(&order_id),
            query = escape_html(&order_query(&order_id)),
            amount = escape_html(&response.amount),
            data_url = data_url,
        );
        return Ok(html_page("QRIS Payment", &body));
    }

    let va_number = response.va_number.as_deref().unwrap_or("-");
    let body = format!(
        r#"
        <h1>Complete Your Payment</h1>
        <div class="card">
            <p>Order ID: {order}</p>
            <p>Amount: Rp {amount}</p>
            <p>Virtual Account: {va}</p>
            <p><a href="/check-status?{query}" class="btn">Check Payment Status</a></p>
        </div>
        "#,
        order = escape_html(&order_id),
        query = escape_html(&order_query(&order_id)),
        amount = escape_html(&response.amount),
        va = escape_html(va_number),
    );
    Ok(html_page("Payment Instructions", &body))
}

/// 用户支付后返回页面
///
/// GET /return?order_id=
pub async fn payment_return(query: web::Query<OrderQuery>) -> ActixResult<HttpResponse> {
    let order_id = escape_html(&query.order_id);
    let body = format!(
        r#"
        <h1>Thank You</h1>
        <p>Your payment for order {order} is being processed.</p>
        <div class="card">
            <h2>Order Details</h2>
            <p>Order ID: {order}</p>
            <p>You can check the status of your payment below:</p>
            <a href="/check-status?{query}" class="btn">Check Payment Status</a>
        </div>
        <p><a href="/">Back to Home</a></p>
        "#,
        order = order_id,
        query = escape_html(&order_query(&query.order_id)),
    );

    Ok(html_page("Payment Return", &body))
}

/// 查询交易状态
///
/// GET /check-status?order_id=
pub async fn check_status(
    data: web::Data<AppState>,
    query: web::Query<OrderQuery>,
) -> ActixResult<HttpResponse> {
    if query.order_id.is_empty() {
        return Ok(HttpResponse::BadRequest().body("Order ID is required"));
    }

    let status = match data.client.check_transaction(&query.order_id).await {
        Ok(status) => status,
        Err(e) if e.is_validation() => {
            return Ok(HttpResponse::BadRequest().body(e.to_string()));
        }
        Err(e) => {
            log::error!("Error checking transaction {}: {}", query.order_id, e);
            return Ok(HttpResponse::InternalServerError().body("Error checking transaction status"));
        }
    };

    let body = format!(
        r#"
        <h1>Payment Status</h1>
        <div class="card">
            <h2>Order Details</h2>
            <p>Order ID: {order}</p>
            <p>Reference: {reference}</p>
            <p>Amount: Rp {amount}</p>
            <p>Status: <span class="status {class}">{message} ({code})</span></p>
        </div>
        <p><a href="/">Back to Home</a></p>
        "#,
        order = escape_html(&status.merchant_order_id),
        reference = escape_html(&status.reference),
        amount = escape_html(&status.amount),
        class = status_class(&status.status_code),
        message = escape_html(&status.status_message),
        code = escape_html(&status.status_code),
    );

    Ok(html_page("Payment Status", &body))
}

/// 查询可用支付方式
///
/// GET /api/payment-methods?amount=
///
/// 响应: ApiResponse<Vec<PaymentMethod>>
pub async fn list_payment_methods(
    data: web::Data<AppState>,
    query: web::Query<AmountQuery>,
) -> ActixResult<HttpResponse> {
    match data.client.get_payment_methods(query.amount).await {
        Ok(methods) => Ok(HttpResponse::Ok().json(ApiResponse::success(methods))),
        Err(e) if e.is_validation() => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(400, &e.to_string())))
        }
        Err(e) => {
            log::error!("Failed to get payment methods for amount {}: {}", query.amount, e);
            Ok(HttpResponse::BadGateway().json(ApiResponse::<()>::error(502, &e.to_string())))
        }
    }
}

/// 交易状态码对应的页面样式
fn status_class(status_code: &str) -> &'static str {
    match status_code {
        status::SUCCESS => "success",
        status::PENDING => "pending",
        _ => "failed",
    }
}

fn html_page(title: &str, body: &str) -> HttpResponse {
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <title>{}</title>\n    <style>{}</style>\n</head>\n<body>{}</body>\n</html>\n",
        escape_html(title),
        PAGE_STYLE,
        body
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// `order_id=<id>` 查询串，订单号按URL编码
fn order_query(order_id: &str) -> String {
    serde_urlencoded::to_string([("order_id", order_id)]).unwrap_or_default()
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
