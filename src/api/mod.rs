//! Twitter API module.
//!
//! This module provides:
//! - HTTP client for the Twitter REST API
//! - OAuth 1.0a request signing and credential modes
//! - Mute and timeline endpoints
//! - API response types

pub mod auth;
pub mod client;
pub mod mutes;
pub mod routes;
pub mod timelines;
pub mod types;

pub use auth::{Authentication, AuthenticationKind, ClientCredentials, UserCredentials};
pub use client::{ClientOptions, TwitterApi, API_BASE, UPLOAD_URL};
pub use types::*;
