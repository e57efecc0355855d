//! MCQ Generator - Rust Backend
//!
//! 使用 axum 框架构建的后端服务：接收主题，调用 Gemini 生成选择题并解析为结构化结果。

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod llm;
mod models;
mod services;
mod state;
mod utils;

use api::create_app;
use config::AppConfig;
use llm::{GeminiClient, GenerationClient};
use state::{create_shared_state, AppState};
use utils::mask_api_key;

/// 监听 Ctrl+C 以便优雅关闭
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

async fn serve(config: AppConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_app(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Server listening on: {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down.");
    Ok(())
}

// 生成客户端是阻塞式的，需在异步上下文之外创建和销毁，因此手动构建运行时
fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcq_generator=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MCQ Generator backend...");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    if config.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }
    info!(
        model = %config.model,
        base_url = %config.base_url,
        api_key = %mask_api_key(&config.api_key),
        origins = ?config.allowed_origins,
        "Configuration loaded"
    );

    // 进程级生成客户端，只创建一次
    let generator: Arc<dyn GenerationClient> = Arc::new(
        GeminiClient::new(&config.api_key, &config.base_url)
            .context("Failed to create Gemini client")?,
    );
    let state = create_shared_state(generator, config.model.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    runtime.block_on(serve(config, Arc::clone(&state)))?;

    // 先关闭运行时，再释放客户端
    drop(runtime);
    drop(state);
    Ok(())
}
