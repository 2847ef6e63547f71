use crate::{docs::ApiDoc, handlers, state::AppState};
use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

/// 创建 API 路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // API 文档
        .route("/docs/json", get(openapi_json))
        // 签到与胸牌
        .route("/attendees/:attendee_id/check-in", get(handlers::check_in))
        .route("/attendees/:attendee_id/badge", get(handlers::get_attendee_badge))
        // 活动
        .route("/events/:event_id", get(handlers::get_event))
        .route("/events/:event_id/attendees", get(handlers::get_event_attendees))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查
async fn health_check() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
