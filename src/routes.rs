// 示例服务路由配置
// 支付表单、回调、状态查询和JSON接口

use actix_web::{web, Scope};

use crate::handlers::*;

/// 支付页面和回调路由
pub fn payment_routes() -> Scope {
    web::scope("")
        .route("/", web::get().to(index))
        .route("/payment", web::post().to(create_payment))
        .route("/callback", web::post().to(duitku_callback))
        .route("/return", web::get().to(payment_return))
        .route("/check-status", web::get().to(check_status))
        .route("/health", web::get().to(health_check))
        .service(api_routes())
}

/// JSON接口路由
fn api_routes() -> Scope {
    web::scope("/api").route("/payment-methods", web::get().to(list_payment_methods))
}
