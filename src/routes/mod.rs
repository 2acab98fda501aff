pub mod admin;
pub mod certification;
pub mod session;

use serde::Serialize;

use crate::error::AppError;

/// 将响应数据序列化后放入共享 JSON 缓存
pub(crate) fn to_cached_value<T: Serialize>(value: T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}
