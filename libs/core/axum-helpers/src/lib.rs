//! # Axum Helpers
//!
//! Shared utilities for the catalog HTTP services.
//!
//! ## Modules
//!
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`middleware`]**: security headers
//! - **[`audit`]**: audit logging for mutating endpoints

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod server;

pub use audit::{extract_ip_from_headers, extract_user_agent, AuditEvent, AuditOutcome};
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use server::{
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
    HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};
