use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 证书数据库实体
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificationEntity {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub issuer: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// 仪表盘汇总统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DashboardSummary {
    pub total: i64,
    pub active: i64,
    pub expiring_soon: i64,
    pub expired: i64,
}
