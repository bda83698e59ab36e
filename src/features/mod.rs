pub mod system;
pub mod uploads;
