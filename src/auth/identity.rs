use async_trait::async_trait;
use axum::http::HeaderMap;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::utils::verify_token;

/// 提供调用方已验证的主体ID
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 请求未携带凭证或凭证校验失败时返回 `None`
    async fn subject(&self, headers: &HeaderMap) -> Option<String>;
}

/// 校验使用共享密钥签名的 HS256 Bearer 令牌
pub struct JwtIdentityProvider {
    secret: String,
}

impl JwtIdentityProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn subject(&self, headers: &HeaderMap) -> Option<String> {
        let bearer = headers.typed_get::<Authorization<Bearer>>()?;

        match verify_token(bearer.token(), &self.secret) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::generate_token;
    use axum::http::{HeaderValue, header};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[tokio::test]
    async fn yields_subject_for_valid_token() {
        let (token, _) = generate_token("u1", "secret", chrono::Duration::hours(1)).unwrap();
        let provider = JwtIdentityProvider::new("secret");

        let subject = provider.subject(&headers_with(&format!("Bearer {}", token))).await;
        assert_eq!(subject.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn rejects_missing_malformed_and_forged_credentials() {
        let provider = JwtIdentityProvider::new("secret");
        let (forged, _) = generate_token("u1", "other", chrono::Duration::hours(1)).unwrap();

        assert_eq!(provider.subject(&HeaderMap::new()).await, None);
        assert_eq!(provider.subject(&headers_with("Basic dTE6cHc=")).await, None);
        assert_eq!(provider.subject(&headers_with("Bearer not-a-jwt")).await, None);
        assert_eq!(
            provider
                .subject(&headers_with(&format!("Bearer {}", forged)))
                .await,
            None
        );
    }
}
