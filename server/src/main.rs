//! MatMap 材料库存服务

use std::net::SocketAddr;
use std::sync::Arc;

use matmap_config::AppConfig;
use matmap_server::persistence::{self, SqliteMaterialRepository};
use matmap_server::routes;
use matmap_server::state::AppState;
use matmap_server::upload::UploadStore;
use matmap_telemetry::{LogFormat, init_tracing};
use secrecy::ExposeSecret;
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // 加载配置
    let config = AppConfig::load("config")?;

    // 初始化 tracing
    let format = if config.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(&config.telemetry.log_level, format);

    // 连接 SQLite 并建表
    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(config.database.url.expose_secret())
        .await?;
    persistence::ensure_schema(&pool).await?;
    info!("Database ready");

    // 上传目录
    let uploads = Arc::new(UploadStore::new(
        &config.upload.dir,
        &config.upload.public_base_url,
    ));
    uploads.ensure_dir().await?;

    let state = AppState {
        repo: Arc::new(SqliteMaterialRepository::new(pool)),
        uploads,
    };

    // 构建路由
    let app = routes::api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, app = %config.app_name, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received");
}
