// 认证模块
// 将请求凭证解析为应用内的用户身份

mod identity;

pub use identity::{IdentityProvider, JwtIdentityProvider};

use std::sync::Arc;

use axum::http::HeaderMap;
use serde::Serialize;

use crate::database::UserStore;
use crate::error::AppError;
use crate::permissions::{self, Capability, Role};

/// 单次请求内的调用方身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSession {
    pub user_id: String,
    pub role: Role,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct AuthGuard {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserStore>,
}

impl AuthGuard {
    pub fn new(identity: Arc<dyn IdentityProvider>, users: Arc<dyn UserStore>) -> Self {
        Self { identity, users }
    }

    pub async fn get_verified_auth(&self, headers: &HeaderMap) -> Result<String, AppError> {
        self.identity
            .subject(headers)
            .await
            .ok_or(AppError::Unauthorized)
    }

    pub async fn get_authenticated_user(
        &self,
        headers: &HeaderMap,
    ) -> Result<AuthSession, AppError> {
        let user_id = self.get_verified_auth(headers).await?;

        let user = self.users.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!("Verified subject {} has no user record", user_id);
            AppError::Unauthorized
        })?;

        Ok(AuthSession {
            user_id: user.id,
            role: Role::from_name(user.role.as_deref()),
            email: user.email,
        })
    }

    pub async fn require_role(
        &self,
        headers: &HeaderMap,
        allowed: &[Role],
    ) -> Result<AuthSession, AppError> {
        let session = self.get_authenticated_user(headers).await?;
        if !allowed.contains(&session.role) {
            tracing::info!(
                "User {} with role {} rejected, allowed roles: {:?}",
                session.user_id,
                session.role,
                allowed
            );
            return Err(AppError::Forbidden);
        }
        Ok(session)
    }

    pub async fn require_capability(
        &self,
        headers: &HeaderMap,
        capability: Capability,
    ) -> Result<AuthSession, AppError> {
        let session = self.get_authenticated_user(headers).await?;
        permissions::authorize(&session, capability)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{StoreError, UserEntity};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// 直接把 `x-subject` 请求头当作已验证的主体
    struct HeaderIdentity;

    #[async_trait]
    impl IdentityProvider for HeaderIdentity {
        async fn subject(&self, headers: &HeaderMap) -> Option<String> {
            headers
                .get("x-subject")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        }
    }

    struct FixedUsers(HashMap<String, UserEntity>);

    #[async_trait]
    impl UserStore for FixedUsers {
        async fn find_by_id(&self, user_id: &str) -> Result<Option<UserEntity>, StoreError> {
            Ok(self.0.get(user_id).cloned())
        }

        async fn update_role(&self, _user_id: &str, _role: Role) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    struct DownUsers;

    #[async_trait]
    impl UserStore for DownUsers {
        async fn find_by_id(&self, _user_id: &str) -> Result<Option<UserEntity>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn update_role(&self, _user_id: &str, _role: Role) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    fn guard() -> AuthGuard {
        let users = [("admin", Some("Admin")), ("alice", Some("User")), ("ghost", Some("Wizard"))]
            .into_iter()
            .map(|(id, role)| {
                (
                    id.to_string(),
                    UserEntity {
                        id: id.to_string(),
                        email: Some(format!("{}@example.com", id)),
                        role: role.map(str::to_string),
                    },
                )
            })
            .collect();
        AuthGuard::new(Arc::new(HeaderIdentity), Arc::new(FixedUsers(users)))
    }

    fn as_subject(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-subject", id.parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn verified_auth_requires_a_subject() {
        let guard = guard();
        assert!(matches!(
            guard.get_verified_auth(&HeaderMap::new()).await,
            Err(AppError::Unauthorized)
        ));
        assert_eq!(guard.get_verified_auth(&as_subject("anyone")).await.unwrap(), "anyone");
    }

    #[tokio::test]
    async fn subject_without_record_is_unauthorized() {
        assert!(matches!(
            guard().get_authenticated_user(&as_subject("nobody")).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn resolves_session_from_record() {
        let session = guard().get_authenticated_user(&as_subject("admin")).await.unwrap();
        assert_eq!(
            session,
            AuthSession {
                user_id: "admin".into(),
                role: Role::Admin,
                email: Some("admin@example.com".into()),
            }
        );
    }

    #[tokio::test]
    async fn unknown_stored_role_resolves_to_user() {
        let session = guard().get_authenticated_user(&as_subject("ghost")).await.unwrap();
        assert_eq!(session.role, Role::User);
    }

    #[tokio::test]
    async fn require_role_admits_members_only() {
        let guard = guard();
        assert!(guard.require_role(&as_subject("admin"), &[Role::Admin]).await.is_ok());
        assert!(matches!(
            guard.require_role(&as_subject("alice"), &[Role::Admin]).await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            guard.require_role(&HeaderMap::new(), &[Role::Admin]).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn require_capability_consults_the_permission_table() {
        let guard = guard();
        assert!(guard
            .require_capability(&as_subject("admin"), Capability::ViewAuditLog)
            .await
            .is_ok());
        assert!(matches!(
            guard
                .require_capability(&as_subject("alice"), Capability::ViewAuditLog)
                .await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_unavailable() {
        let guard = AuthGuard::new(Arc::new(HeaderIdentity), Arc::new(DownUsers));
        assert!(matches!(
            guard.get_authenticated_user(&as_subject("admin")).await,
            Err(AppError::BackingStoreUnavailable(_))
        ));
    }
}
