pub mod certification;
pub mod user;
