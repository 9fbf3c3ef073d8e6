//! Shared library for the datasource service.
//!
//! This crate provides the error taxonomy, configuration, HTTP helpers and the
//! basic-auth gate used by the service handler.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;

pub use auth::{basic_credentials, parse_basic_auth, require_basic_auth, BasicCredentials};
pub use config::Config;
pub use error::{Error, Result};
pub use http::{error_response, error_to_response, json_response, ApiResponse};
