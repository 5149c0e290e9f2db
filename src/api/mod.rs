//! Synology web API client and types.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiRequest, Credentials};
pub use error::ApiErrorCode;
