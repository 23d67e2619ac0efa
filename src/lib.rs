pub mod config;
pub mod error;
pub mod eto;
pub mod tick;
pub mod units;
pub mod watering;
pub mod weather;
