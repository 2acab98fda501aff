use axum::{
    Extension, Json,
    extract::{Path, State},
};

use super::model::{
    InvalidateCacheRequest, InvalidateCacheResponse, ResetRateLimitResponse, UpdateRoleRequest,
    UpdateRoleResponse,
};
use crate::{
    AppState,
    auth::AuthSession,
    cache::keys,
    error::AppError,
    permissions::{Capability, authorize},
    rate_limit::presets,
    result::ApiResponse,
    utils::success_to_api_response,
};

#[axum::debug_handler]
pub async fn update_role(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<UpdateRoleResponse>>, AppError> {
    authorize(&session, Capability::PromoteUsers)?;
    state
        .limiter
        .require_rate_limit(&format!("admin:{}", session.user_id), presets::ADMIN)?;

    if req.user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id is required".into()));
    }

    if !state.users.update_role(&req.user_id, req.role).await? {
        return Err(AppError::NotFound(format!("user {} not found", req.user_id)));
    }

    // 角色变化会影响仪表盘统计和该用户的缓存数据
    state.cache.invalidate(keys::DASHBOARD_PREFIX);
    state.cache.invalidate(&keys::user_key(&req.user_id));

    tracing::info!(
        "User {} changed role of {} to {}",
        session.user_id,
        req.user_id,
        req.role
    );

    Ok(success_to_api_response(UpdateRoleResponse {
        user_id: req.user_id,
        role: req.role,
    }))
}

#[axum::debug_handler]
pub async fn invalidate_cache(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(req): Json<InvalidateCacheRequest>,
) -> Result<Json<ApiResponse<InvalidateCacheResponse>>, AppError> {
    authorize(&session, Capability::ManageSettings)?;
    state
        .limiter
        .require_rate_limit(&format!("admin:{}", session.user_id), presets::ADMIN)?;

    // 空字符串会匹配所有键
    if req.pattern.is_empty() {
        return Err(AppError::Validation("pattern must not be empty".into()));
    }

    let removed = state.cache.invalidate(&req.pattern);
    tracing::info!(
        "User {} invalidated {} cache entries matching {:?}",
        session.user_id,
        removed,
        req.pattern
    );

    Ok(success_to_api_response(InvalidateCacheResponse { removed }))
}

#[axum::debug_handler]
pub async fn reset_rate_limit(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(identifier): Path<String>,
) -> Result<Json<ApiResponse<ResetRateLimitResponse>>, AppError> {
    authorize(&session, Capability::ManageSettings)?;
    state
        .limiter
        .require_rate_limit(&format!("admin:{}", session.user_id), presets::ADMIN)?;

    state.limiter.reset(&identifier);
    tracing::info!("User {} reset rate limit for {}", session.user_id, identifier);

    Ok(success_to_api_response(ResetRateLimitResponse { identifier }))
}
