pub mod config;
pub mod shutdown;
pub mod telemetry;

pub use config::AppConfig;

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use axum::Router;
use passin_api::{create_router, AppState};
use passin_core::{setup_schema, CheckInManager, DatabaseGateway};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use tracing::info;

/// 按配置连接数据库，`auto_migrate` 开启时创建缺失的表
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    if let Some(max_connections) = config.max_connections {
        options.max_connections(max_connections);
    }

    let db = Database::connect(options)
        .await
        .with_context(|| format!("Failed to connect to database {}", config.url))?;

    if config.auto_migrate {
        setup_schema(&db).await.context("Failed to create schema")?;
    }

    Ok(db)
}

/// 组装网关、管理器和路由
pub fn build_app(db: DatabaseConnection) -> Router {
    let gateway = Arc::new(DatabaseGateway::new(Arc::new(db)));
    let manager = Arc::new(CheckInManager::new(gateway));
    create_router(AppState::new(manager))
}

/// 启动 HTTP 服务，收到关闭信号后优雅退出
pub async fn run(config: AppConfig) -> Result<()> {
    let db = connect(&config.database).await?;
    let app = build_app(db);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = shutdown::wait_for_signal().await;
            info!(?signal, "Shutting down");
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
