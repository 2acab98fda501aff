use std::time::Duration;

pub const REALTIME: Duration = Duration::from_millis(30_000);
pub const SHORT: Duration = Duration::from_millis(60_000);
pub const MEDIUM: Duration = Duration::from_millis(300_000);
pub const LONG: Duration = Duration::from_millis(900_000);
pub const VERY_LONG: Duration = Duration::from_millis(3_600_000);
