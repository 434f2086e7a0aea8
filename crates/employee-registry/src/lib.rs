pub mod config;
pub mod employees;
pub mod error;
pub mod telemetry;
