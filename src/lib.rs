#![deny(missing_docs)]

//! Core library for the student records HTTP service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Store mutation counters.
pub mod metrics;
/// In-memory record store and service.
pub mod records;
