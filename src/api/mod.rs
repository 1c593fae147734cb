//! Backend transport
//!
//! The seam between the dashboards and HTTP. Everything above this module
//! deals in [`ApiRequest`] / [`ApiResponse`]; the reqwest-backed
//! [`HttpTransport`] is the only place that touches the network.

pub(crate) mod client;
pub mod error;
pub mod request;
#[cfg(test)]
pub mod scripted;

pub use client::{HttpTransport, resolve_url};
pub use error::ApiError;
pub use request::{ApiRequest, ApiResponse};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Base URL that relative request paths are joined onto.
    fn base_url(&self) -> &str;

    /// Sends one request, exactly once. Any HTTP status is a successful send;
    /// only failures to get a response at all are errors.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}
