//! Shared library modules providing error types, telemetry initialization, and URI templates.

pub mod errors;
pub mod telemetry;
pub mod uri_template;
