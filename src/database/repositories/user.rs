use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::{StoreError, UserEntity, UserStore};
use crate::permissions::Role;

/// 用户存储库实现
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserEntity>, StoreError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user {}: {:?}", user_id, e);
            e
        })?;

        Ok(user)
    }

    async fn update_role(&self, user_id: &str, role: Role) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET role = $2
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;

        tracing::info!("Updated role for user {} to {}", user_id, role);
        Ok(result.rows_affected() > 0)
    }
}
