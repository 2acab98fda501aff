use axum::{Extension, Json};

use super::model::MeResponse;
use crate::{auth::AuthSession, result::ApiResponse, utils::success_to_api_response};

#[axum::debug_handler]
pub async fn me(Extension(session): Extension<AuthSession>) -> Json<ApiResponse<MeResponse>> {
    success_to_api_response(MeResponse::from(session))
}
