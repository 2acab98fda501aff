use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::Value;

use super::model::ExpiringQuery;
use crate::{
    AppState,
    auth::AuthSession,
    cache::{keys, ttl},
    error::AppError,
    permissions::{Capability, authorize},
    rate_limit::presets,
    result::ApiResponse,
    routes::to_cached_value,
    utils::success_to_api_response,
};

#[axum::debug_handler]
pub async fn dashboard_summary(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    authorize(&session, Capability::ViewAnalytics)?;
    state
        .limiter
        .require_rate_limit(&format!("read:{}", session.user_id), presets::READ)?;

    let certifications = state.certifications.clone();
    let summary = state
        .cache
        .get_or_compute(&keys::dashboard_summary_key(), ttl::MEDIUM, || async move {
            let summary = certifications.summary().await?;
            to_cached_value(summary)
        })
        .await?;

    Ok(success_to_api_response(summary))
}

#[axum::debug_handler]
pub async fn expiring_report(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    authorize(&session, Capability::ExportReports)?;
    let days = query.days()?;
    state
        .limiter
        .require_rate_limit(&format!("export:{}", session.user_id), presets::EXPORT)?;

    let certifications = state.certifications.clone();
    let rows = state
        .cache
        .get_or_compute(&keys::expiring_report_key(days), ttl::SHORT, || async move {
            let rows = certifications.expiring_within(days).await?;
            tracing::info!("Expiring report for {} days has {} rows", days, rows.len());
            to_cached_value(rows)
        })
        .await?;

    Ok(success_to_api_response(rows))
}

#[axum::debug_handler]
pub async fn my_certifications(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    authorize(&session, Capability::EditOwnCertifications)?;
    state
        .limiter
        .require_rate_limit(&format!("read:{}", session.user_id), presets::READ)?;

    let certifications = state.certifications.clone();
    let user_id = session.user_id.clone();
    let rows = state
        .cache
        .get_or_compute(
            &keys::user_certifications_key(&session.user_id),
            ttl::REALTIME,
            || async move {
                let rows = certifications.list_for_user(&user_id).await?;
                to_cached_value(rows)
            },
        )
        .await?;

    Ok(success_to_api_response(rows))
}
