// 缓存模块
// 进程内 TTL 缓存，用于避免重复计算聚合查询

pub mod keys;
pub mod ttl;

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// 两次全量清理过期条目之间的最短间隔
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    last_sweep: Instant,
}

/// 按条目 TTL 过期的键值缓存
///
/// 过期条目惰性删除：读取命中时删除，或由读取触发的全量清理删除
/// 全量清理每个 [`SWEEP_INTERVAL`] 最多执行一次
pub struct TtlCache<V> {
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock();

        if now.duration_since(state.last_sweep) > SWEEP_INTERVAL {
            let before = state.entries.len();
            state.entries.retain(|_, entry| entry.expires_at > now);
            state.last_sweep = now;
            tracing::debug!(removed = before - state.entries.len(), "cache sweep");
        }

        let expired = match state.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            state.entries.remove(key);
        }
        None
    }

    /// 写入缓存，覆盖 `key` 已有的条目
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.state.lock().entries.insert(key.into(), entry);
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn delete(&self, key: &str) {
        self.state.lock().entries.remove(key);
    }

    /// 删除所有包含 `pattern` 的键
    ///
    /// 这是子串匹配：`"user:1"` 也会删除 `"user:10:profile"`
    /// 需要精确命名空间时在末尾带上分隔符，例如 `"user:1:"`
    pub fn invalidate(&self, pattern: &str) -> usize {
        let mut state = self.state.lock();
        let before = state.entries.len();
        state.entries.retain(|key, _| !key.contains(pattern));
        let removed = before - state.entries.len();
        tracing::debug!(pattern, removed, "cache invalidated");
        removed
    }

    pub fn clear(&self) {
        self.state.lock().entries.clear();
    }

    /// 条目数量，包含尚未清理的过期条目
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 返回 `key` 的缓存值，未命中时执行 `compute` 并按 `ttl` 缓存结果
    ///
    /// `compute` 的错误原样返回且不缓存，下次调用会重新计算
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = compute().await?;
        self.set(key, value.clone(), ttl);
        Ok(value)
    }
}
