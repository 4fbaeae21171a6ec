//! HTTP handlers for the blueprint service.

pub mod analysis;
pub mod health;

pub use analysis::analyze;
pub use health::{endpoint_status, health_check, preflight, readiness_check};
