// 数据库模块
// 包含数据库实体定义、存储接口与 Postgres 实现

pub mod models;
pub mod repositories;

use async_trait::async_trait;

use crate::permissions::Role;

pub use models::certification::{CertificationEntity, DashboardSummary};
pub use models::user::UserEntity;
pub use repositories::{PgCertificationStore, PgUserStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Other(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // 连接层故障，数据库暂不可用
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Other(err.to_string()),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserEntity>, StoreError>;

    /// 用户不存在时返回 `false`
    async fn update_role(&self, user_id: &str, role: Role) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CertificationStore: Send + Sync {
    async fn summary(&self) -> Result<DashboardSummary, StoreError>;

    async fn expiring_within(&self, days: u32) -> Result<Vec<CertificationEntity>, StoreError>;

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<CertificationEntity>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_are_unavailable() {
        for err in [sqlx::Error::PoolTimedOut, sqlx::Error::PoolClosed] {
            assert!(matches!(StoreError::from(err), StoreError::Unavailable(_)));
        }
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            StoreError::from(sqlx::Error::Io(io)),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn query_and_decode_failures_are_not_unavailable() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Other(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::ColumnNotFound("role".into())),
            StoreError::Other(_)
        ));
    }
}
