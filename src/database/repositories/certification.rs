use async_trait::async_trait;
use sqlx::PgPool;

use super::EXPIRING_SOON_DAYS;
use crate::database::{CertificationEntity, CertificationStore, DashboardSummary, StoreError};

/// 证书存储库实现
#[derive(Clone)]
pub struct PgCertificationStore {
    pool: PgPool,
}

impl PgCertificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CertificationStore for PgCertificationStore {
    async fn summary(&self) -> Result<DashboardSummary, StoreError> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE expires_at IS NULL OR expires_at > NOW()) AS active,
                COUNT(*) FILTER (
                    WHERE expires_at > NOW()
                      AND expires_at <= NOW() + make_interval(days => $1)
                ) AS expiring_soon,
                COUNT(*) FILTER (WHERE expires_at <= NOW()) AS expired
            FROM certifications
            "#,
        )
        .bind(EXPIRING_SOON_DAYS)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Computed dashboard summary: {:?}", summary);
        Ok(summary)
    }

    async fn expiring_within(&self, days: u32) -> Result<Vec<CertificationEntity>, StoreError> {
        let rows = sqlx::query_as::<_, CertificationEntity>(
            r#"
            SELECT id, user_id, name, issuer, expires_at
            FROM certifications
            WHERE expires_at > NOW()
              AND expires_at <= NOW() + make_interval(days => $1)
            ORDER BY expires_at ASC
            "#,
        )
        .bind(days as i32)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<CertificationEntity>, StoreError> {
        let rows = sqlx::query_as::<_, CertificationEntity>(
            r#"
            SELECT id, user_id, name, issuer, expires_at
            FROM certifications
            WHERE user_id = $1
            ORDER BY expires_at ASC NULLS LAST
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
