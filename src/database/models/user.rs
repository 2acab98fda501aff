use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户数据库实体
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserEntity {
    pub id: String,
    pub email: Option<String>,
    /// 原始角色字符串，未知值按最低权限处理
    pub role: Option<String>,
}
