use serde::{Deserialize, Serialize};

use crate::permissions::Role;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRoleResponse {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct InvalidateCacheRequest {
    pub pattern: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvalidateCacheResponse {
    pub removed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetRateLimitResponse {
    pub identifier: String,
}
