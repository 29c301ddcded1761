pub mod config;
pub mod error;
pub mod sources;
pub mod telemetry;
pub mod workflows;
