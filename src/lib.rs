//! PhoneFinder - find host users by their stored phone number.
//!
//! This library provides an admin-only HTTP endpoint that normalizes a
//! phone number and returns every user whose stored phone is the same
//! number, whatever format either was written in.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (user ids, canonical numbers, regions)
//! - **models**: User records and the lookup request/response shapes
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **phone**: Phone number normalization
//! - **client**: HTTP client for the host provisioning API
//! - **directory**: User directories and the lazy user scan
//! - **services**: The lookup itself
//! - **server**: axum router, admin guard and graceful shutdown
//! - **metrics**: Lookup and host request counters

pub mod client;
pub mod config;
pub mod directory;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod phone;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use client::HostClient;
pub use config::{Config, DirectorySource};
pub use directory::{InMemoryUserDirectory, UserDirectory, UserPage};
pub use error::{ConfigError, DirectoryError, HandlerError, NormalizationError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{LookupQuery, LookupResponse, MatchResult, UserRecord};
pub use phone::{LibPhoneNormalizer, PhoneNormalizer};
pub use server::{router, AppState};
pub use services::{LookupService, PhoneLookupHandler};
