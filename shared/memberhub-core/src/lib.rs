//! Memberhub Core - Shared service infrastructure
//!
//! This crate provides:
//! - Standard service trait the memberhub services implement
//! - Error handling utilities
//! - Configuration management

pub mod config;
pub mod error;
pub mod service;

pub use config::{ServiceConfig, StoreBackend};
pub use error::{HubError, Result};
pub use service::{DependencyStatus, HealthStatus, HubService, MicroserviceRuntime, ReadinessStatus};
