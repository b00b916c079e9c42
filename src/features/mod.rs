pub mod reports;
pub mod uploads;
