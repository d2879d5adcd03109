//! Minimal HTTP info service for DevOps course environments.
//!
//! Exposes two read-only endpoints:
//!
//! - `GET /`: service metadata, host facts, uptime, and echoed request
//!   attributes
//! - `GET /health`: liveness status and uptime, cheap enough for frequent
//!   polling
//!
//! Every response body is JSON. Unmatched routes, rejected methods, and
//! panics are normalized into a uniform `{error, message}` envelope by a
//! single boundary layer, so clients never see a raw error page.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error types and the JSON error envelope
//! - [`host`]: Host fact queries behind a swappable provider trait
//! - [`api`]: HTTP handlers and router assembly

pub mod api;
pub mod config;
pub mod error;
pub mod host;

pub use config::Config;
pub use error::{Result, ServiceError};
