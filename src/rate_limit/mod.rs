// 限流模块
// 进程内滑动窗口限流，按标识记录每次放行的请求时间，窗口内计数精确
// 状态仅在本进程内有效，多实例部署时各实例预算互相独立

pub mod presets;

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::AppError;

/// 单个标识两次清理历史记录之间的最短间隔
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

#[derive(Debug)]
struct RateLimitRecord {
    timestamps: VecDeque<Instant>,
    last_cleanup: Instant,
}

impl RateLimitRecord {
    fn new(now: Instant) -> Self {
        Self {
            timestamps: VecDeque::new(),
            last_cleanup: now,
        }
    }

    fn count_within(&self, now: Instant, window: Duration) -> usize {
        self.timestamps
            .iter()
            .filter(|t| now.duration_since(**t) < window)
            .count()
    }

    fn prune_if_due(&mut self, now: Instant, window: Duration) {
        if now.duration_since(self.last_cleanup) > CLEANUP_INTERVAL {
            self.timestamps.retain(|t| now.duration_since(*t) < window);
            self.last_cleanup = now;
        }
    }
}

pub struct RateLimiter {
    records: Mutex<LruCache<String, RateLimitRecord>>,
}

impl RateLimiter {
    /// `max_identifiers` 限制同时跟踪的标识数量，满额时淘汰最久未访问的标识
    pub fn new(max_identifiers: usize) -> Self {
        let cap = NonZeroUsize::new(max_identifiers).unwrap_or(NonZeroUsize::MIN);
        Self {
            records: Mutex::new(LruCache::new(cap)),
        }
    }

    /// 为 `identifier` 记录一次请求并返回是否放行
    ///
    /// 被拒绝的请求不会记录，持续重试不会推迟窗口重置
    pub fn check(&self, identifier: &str, config: RateLimitConfig) -> bool {
        let now = Instant::now();
        let mut records = self.records.lock();
        let record =
            records.get_or_insert_mut(identifier.to_string(), || RateLimitRecord::new(now));

        record.prune_if_due(now, config.window);

        if record.count_within(now, config.window) >= config.max_requests as usize {
            tracing::warn!(
                identifier,
                max_requests = config.max_requests,
                window_ms = config.window.as_millis() as u64,
                "rate limit exceeded"
            );
            return false;
        }

        record.timestamps.push_back(now);
        true
    }

    pub fn get_remaining(&self, identifier: &str, config: RateLimitConfig) -> u32 {
        let now = Instant::now();
        let records = self.records.lock();
        let used = records
            .peek(identifier)
            .map(|record| record.count_within(now, config.window))
            .unwrap_or(0);

        (config.max_requests as usize).saturating_sub(used) as u32
    }

    pub fn reset(&self, identifier: &str) {
        self.records.lock().pop(identifier);
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// 当前跟踪的标识数量
    pub fn tracked(&self) -> usize {
        self.records.lock().len()
    }

    pub fn require_rate_limit(
        &self,
        identifier: &str,
        config: RateLimitConfig,
    ) -> Result<(), AppError> {
        if self.check(identifier, config) {
            return Ok(());
        }

        Err(AppError::RateLimitExceeded {
            remaining: 0,
            reset_at: reset_estimate(config.window),
        })
    }
}

fn reset_estimate(window: Duration) -> String {
    let window = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::zero());
    (chrono::Utc::now() + window).to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const CONFIG: RateLimitConfig = RateLimitConfig {
        window: Duration::from_millis(60_000),
        max_requests: 3,
    };

    #[tokio::test(start_paused = true)]
    async fn allows_up_to_max_then_denies_until_window_rolls() {
        let limiter = RateLimiter::new(100);

        let results: Vec<bool> = (0..3).map(|_| limiter.check("u1", CONFIG)).collect();
        assert_eq!(results, vec![true, true, true]);
        assert!(!limiter.check("u1", CONFIG));

        advance(Duration::from_millis(60_001)).await;
        assert!(limiter.check("u1", CONFIG));
    }

    #[tokio::test(start_paused = true)]
    async fn request_exactly_one_window_old_no_longer_counts() {
        let limiter = RateLimiter::new(100);
        for _ in 0..3 {
            assert!(limiter.check("u1", CONFIG));
        }

        advance(Duration::from_millis(59_999)).await;
        assert!(!limiter.check("u1", CONFIG));

        advance(Duration::from_millis(1)).await;
        assert!(limiter.check("u1", CONFIG));
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_tracks_successful_checks() {
        let limiter = RateLimiter::new(100);
        assert_eq!(limiter.get_remaining("u1", CONFIG), 3);

        limiter.check("u1", CONFIG);
        limiter.check("u1", CONFIG);
        assert_eq!(limiter.get_remaining("u1", CONFIG), 1);

        limiter.check("u1", CONFIG);
        limiter.check("u1", CONFIG);
        assert_eq!(limiter.get_remaining("u1", CONFIG), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn denied_attempts_are_not_recorded() {
        let limiter = RateLimiter::new(100);
        for _ in 0..3 {
            limiter.check("u1", CONFIG);
        }

        advance(Duration::from_secs(30)).await;
        for _ in 0..10 {
            assert!(!limiter.check("u1", CONFIG));
        }

        advance(Duration::from_millis(30_001)).await;
        assert_eq!(limiter.get_remaining("u1", CONFIG), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn identifiers_have_independent_budgets() {
        let limiter = RateLimiter::new(100);
        for _ in 0..4 {
            limiter.check("u1", CONFIG);
        }

        assert_eq!(limiter.get_remaining("u1", CONFIG), 0);
        assert_eq!(limiter.get_remaining("u2", CONFIG), 3);
        assert!(limiter.check("u2", CONFIG));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_and_clear_drop_state() {
        let limiter = RateLimiter::new(100);
        for _ in 0..3 {
            limiter.check("u1", CONFIG);
            limiter.check("u2", CONFIG);
        }

        limiter.reset("u1");
        assert!(limiter.check("u1", CONFIG));
        assert!(!limiter.check("u2", CONFIG));

        limiter.clear();
        assert_eq!(limiter.tracked(), 0);
        assert!(limiter.check("u2", CONFIG));
    }

    #[tokio::test(start_paused = true)]
    async fn prunes_history_after_cleanup_interval() {
        let limiter = RateLimiter::new(100);
        let short = RateLimitConfig {
            window: Duration::from_secs(1),
            max_requests: 100,
        };
        for _ in 0..50 {
            limiter.check("u1", short);
        }

        advance(CLEANUP_INTERVAL + Duration::from_secs(1)).await;
        limiter.check("u1", short);

        let records = limiter.records.lock();
        assert_eq!(records.peek("u1").map(|r| r.timestamps.len()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn evicts_least_recently_seen_identifier_at_capacity() {
        let limiter = RateLimiter::new(2);
        for _ in 0..3 {
            limiter.check("a", CONFIG);
        }
        limiter.check("b", CONFIG);
        limiter.check("a", CONFIG);
        limiter.check("c", CONFIG);

        assert_eq!(limiter.tracked(), 2);
        assert_eq!(limiter.get_remaining("b", CONFIG), 3);
        assert_eq!(limiter.get_remaining("a", CONFIG), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn require_rate_limit_reports_reset_time() {
        let limiter = RateLimiter::new(100);
        for _ in 0..3 {
            limiter.require_rate_limit("u1", CONFIG).unwrap();
        }

        match limiter.require_rate_limit("u1", CONFIG) {
            Err(AppError::RateLimitExceeded {
                remaining,
                reset_at,
            }) => {
                assert_eq!(remaining, 0);
                let reset = chrono::DateTime::parse_from_rfc3339(&reset_at).unwrap();
                assert!(reset > chrono::Utc::now());
            }
            other => panic!("expected rate limit error, got {:?}", other),
        }
    }
}
