mod handler;
mod model;

pub use handler::{dashboard_summary, expiring_report, my_certifications};
pub use model::{DEFAULT_EXPIRING_DAYS, ExpiringQuery, MAX_EXPIRING_DAYS};
