use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_EXPIRING_DAYS: u32 = 30;
pub const MAX_EXPIRING_DAYS: u32 = 365;

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<u32>,
}

impl ExpiringQuery {
    pub fn days(&self) -> Result<u32, AppError> {
        match self.days.unwrap_or(DEFAULT_EXPIRING_DAYS) {
            days @ 1..=MAX_EXPIRING_DAYS => Ok(days),
            other => Err(AppError::Validation(format!(
                "days must be between 1 and {}, got {}",
                MAX_EXPIRING_DAYS, other
            ))),
        }
    }
}
