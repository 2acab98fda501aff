use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use super::client_ip;
use crate::{AppState, error::AppError, rate_limit::presets};

/// 解析调用方身份并把 `AuthSession` 存入请求扩展
///
/// 认证失败按IP计入 AUTH 限额，额度用尽后返回限流错误而不是未授权
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match state.auth.get_authenticated_user(req.headers()).await {
        Ok(session) => {
            tracing::debug!("Authenticated user {} as {}", session.user_id, session.role);
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Err(AppError::Unauthorized) => {
            let ip = client_ip(&req);
            state
                .limiter
                .require_rate_limit(&format!("auth:{}", ip), presets::AUTH)?;
            Err(AppError::Unauthorized)
        }
        Err(e) => Err(e),
    }
}
