use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    middleware::{auth_middleware, log_errors, rate_limit},
    routes,
};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health));

    let protected_routes = Router::new()
        .route("/me", get(routes::session::me))
        .route("/me/certifications", get(routes::certification::my_certifications))
        .route("/dashboard/summary", get(routes::certification::dashboard_summary))
        .route("/reports/expiring", get(routes::certification::expiring_report))
        .route("/admin/users/role", put(routes::admin::update_role))
        .route("/admin/cache/invalidate", post(routes::admin::invalidate_cache))
        .route(
            "/admin/rate-limits/{identifier}",
            delete(routes::admin::reset_rate_limit),
        )
        // 应用认证中间件
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api = Router::new().merge(public_routes).merge(protected_routes);

    let base = state.config.api_base_uri.trim_matches('/');
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    // 添加日志中间件和限流中间件
    router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(axum::middleware::from_fn_with_state(state.clone(), rate_limit))
        .with_state(state)
}
