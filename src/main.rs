// Duitku示例服务
// 演示创建交易、接收回调和查询交易状态

use std::io;
use std::io::Write;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use chrono::Local;
use log::info;

use duitku::config::Config;
use duitku::routes::payment_routes;
use duitku::state::AppState;

#[actix_web::main]
async fn main() -> Result<()> {
    // 初始化日志
    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    log_builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S %:z"),
                record.level(),
                record.args()
            )
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
        })
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;

    let bind_address = config.bind_address();
    info!(
        "Starting Duitku example on {} ({:?}, merchant {})",
        bind_address, config.duitku.environment, config.duitku.merchant_code
    );
    info!("Callback URL: {}/callback", config.public_url());

    let app_state = web::Data::new(AppState::new(config)?);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(payment_routes())
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("Server error")?;

    Ok(())
}
