//! Price history provider interface.

use async_trait::async_trait;
use std::fmt;

use crate::models::PriceBar;

/// Errors from a price history provider. Request timeouts surface as
/// `Request` like any other transport failure.
#[derive(Debug)]
pub enum ProviderError {
    /// Transport-level failure (connection, timeout, bad status).
    Request(String),
    /// Provider answered with an API-level error object.
    Api { code: String, description: String },
    /// Payload did not match the expected shape.
    Malformed(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Request(msg) => write!(f, "request failed: {}", msg),
            ProviderError::Api { code, description } => {
                write!(f, "provider error {}: {}", code, description)
            }
            ProviderError::Malformed(msg) => write!(f, "malformed payload: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch chronological price history for a symbol.
    ///
    /// `period` and `interval` use the provider's own syntax (e.g.
    /// "3mo" / "1d"). An empty result is not an error; the caller
    /// decides whether it is usable.
    async fn fetch_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, ProviderError>;
}
