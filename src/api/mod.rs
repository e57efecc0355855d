//! API 路由模块

mod mcq;

pub use mcq::mcq_routes;

use axum::{http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// 创建所有 API 路由
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::new().merge(mcq_routes()).with_state(state)
}

/// 构建 CORS 配置
///
/// 携带凭证时不能使用通配符，方法与请求头按预检请求原样回显。
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// 组装完整应用：路由 + CORS + 请求追踪
pub fn create_app(state: Arc<AppState>, origins: &[String]) -> Router {
    create_api_routes(state)
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
}
