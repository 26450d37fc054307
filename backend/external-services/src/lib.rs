//! Outbound HTTP transport and logging for the SmartRoute connector service.

pub mod logger;
pub mod service;

pub use service::{call_gateway_api, ApiClientError, Response};
