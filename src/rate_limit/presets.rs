use std::time::Duration;

use super::RateLimitConfig;

const MINUTE: Duration = Duration::from_secs(60);

/// 认证失败或重复认证
pub const AUTH: RateLimitConfig = RateLimitConfig {
    window: MINUTE,
    max_requests: 5,
};

pub const MUTATION: RateLimitConfig = RateLimitConfig {
    window: MINUTE,
    max_requests: 30,
};

pub const EXPORT: RateLimitConfig = RateLimitConfig {
    window: MINUTE,
    max_requests: 5,
};

pub const READ: RateLimitConfig = RateLimitConfig {
    window: MINUTE,
    max_requests: 100,
};

pub const ADMIN: RateLimitConfig = RateLimitConfig {
    window: MINUTE,
    max_requests: 50,
};
