mod certification;
mod user;

pub use certification::PgCertificationStore;
pub use user::PgUserStore;

/// 仪表盘中“即将过期”的天数阈值
pub const EXPIRING_SOON_DAYS: i32 = 30;
