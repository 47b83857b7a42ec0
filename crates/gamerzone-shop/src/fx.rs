//! # FX Quote Client
//!
//! Fetches the USD/CLP reference quote shown on the home screen.
//!
//! Strictly decorative: prices, totals, and checkout never depend on this
//! quote. Failures surface as `Transient` and callers render a placeholder
//! instead of blocking anything.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use gamerzone_core::{CoreError, CoreResult};

/// Default quote endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://cl.dolarapi.com/v1/cotizaciones/usd";

/// Configuration for the FX quote client.
#[derive(Debug, Clone)]
pub struct FxConfig {
    /// Quote endpoint URL.
    pub endpoint: String,

    /// Request timeout.
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl FxConfig {
    /// Points the client at a different endpoint (tests, mirrors).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FxConfig {
    fn default() -> Self {
        FxConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// One USD/CLP quote as the API reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FxQuote {
    #[serde(default)]
    pub moneda: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub compra: f64,
    #[serde(default)]
    pub venta: f64,
    #[serde(default)]
    pub casa: String,
    #[serde(default)]
    pub fecha: String,
}

/// HTTP client for the quote endpoint.
#[derive(Debug, Clone)]
pub struct FxClient {
    client: reqwest::Client,
    config: FxConfig,
}

impl FxClient {
    /// Creates a client with the given configuration.
    pub fn new(config: FxConfig) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Transient(e.to_string()))?;

        Ok(FxClient { client, config })
    }

    /// Fetches the current USD quote.
    ///
    /// ## Errors
    /// * `Transient` - Network failure, non-success status, or a body that
    ///   does not parse
    pub async fn usd_quote(&self) -> CoreResult<FxQuote> {
        debug!(endpoint = %self.config.endpoint, "Fetching USD quote");

        let response = self
            .client
            .get(&self.config.endpoint)
            .send()
            .await
            .map_err(|e| CoreError::Transient(e.to_string()))?
            .error_for_status()
            .map_err(|e| CoreError::Transient(e.to_string()))?;

        let quote: FxQuote = response
            .json()
            .await
            .map_err(|e| CoreError::Transient(e.to_string()))?;

        debug!(venta = quote.venta, fecha = %quote.fecha, "Got USD quote");
        Ok(quote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
