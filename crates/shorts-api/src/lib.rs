//! Axum HTTP API server.
//!
//! This crate provides:
//! - Script, storyboard and asset generation endpoints
//! - Reference image upload and static serving of generated files
//! - Request id, logging and security header middleware
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use extract::ApiJson;
pub use routes::create_router;
pub use state::AppState;
