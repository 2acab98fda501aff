use serde::Serialize;

use crate::auth::AuthSession;
use crate::permissions::{Permissions, permissions_for};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub session: AuthSession,
    pub permissions: Permissions,
}

impl From<AuthSession> for MeResponse {
    fn from(session: AuthSession) -> Self {
        let permissions = permissions_for(session.role);
        Self {
            session,
            permissions,
        }
    }
}
