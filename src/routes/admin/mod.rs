mod handler;
mod model;

pub use handler::{invalidate_cache, reset_rate_limit, update_role};
pub use model::{
    InvalidateCacheRequest, InvalidateCacheResponse, ResetRateLimitResponse, UpdateRoleRequest,
    UpdateRoleResponse,
};
