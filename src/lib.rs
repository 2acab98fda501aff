use std::sync::Arc;

use auth::{AuthGuard, IdentityProvider};
use cache::TtlCache;
use config::Config;
use database::{CertificationStore, UserStore};
use rate_limit::RateLimiter;

pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod permissions;
pub mod rate_limit;
pub mod result;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: AuthGuard,
    pub limiter: Arc<RateLimiter>,
    pub cache: Arc<TtlCache<serde_json::Value>>,
    pub users: Arc<dyn UserStore>,
    pub certifications: Arc<dyn CertificationStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        identity: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserStore>,
        certifications: Arc<dyn CertificationStore>,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit_max_identifiers));

        Self {
            auth: AuthGuard::new(identity, users.clone()),
            limiter,
            cache: Arc::new(TtlCache::new()),
            users,
            certifications,
            config,
        }
    }
}
