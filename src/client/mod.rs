pub mod futures;
pub mod margin;
pub mod market;
pub mod trading;
pub mod user_stream;
pub mod withdraw;

use crate::core::config::BinanceConfig;
use crate::core::errors::BinanceError;
use crate::core::kernel::{Endpoints, HmacSigner, ReqwestRest, RestClient, RestConfig, Signer};
use std::sync::Arc;

pub use trading::OrderRequest;

/// One authenticated session against the venue.
///
/// Holds the immutable credential pair and a reusable transport carrying the
/// fixed session headers. Safe to share across sequential calls from one
/// logical owner; each dispatch builds its own parameter set, so independent
/// signed calls never share mutable state.
pub struct BinanceClient<R: RestClient = ReqwestRest> {
    rest: R,
    config: BinanceConfig,
}

impl BinanceClient<ReqwestRest> {
    /// Build a session and verify the transport with one liveness probe.
    ///
    /// Fails with [`BinanceError::Connectivity`] if the probe cannot
    /// complete, so a dead transport is caught at construction rather than
    /// on first use.
    pub async fn connect(config: BinanceConfig) -> Result<Self, BinanceError> {
        Self::connect_with(config, RestConfig::default()).await
    }

    /// Like [`Self::connect`] but with caller-supplied transport options.
    pub async fn connect_with(
        config: BinanceConfig,
        rest_config: RestConfig,
    ) -> Result<Self, BinanceError> {
        let client = Self::build(config, rest_config)?;
        client
            .ping()
            .await
            .map_err(|e| BinanceError::Connectivity(e.to_string()))?;
        Ok(client)
    }

    /// Assemble the transport without probing it.
    pub fn build(config: BinanceConfig, rest_config: RestConfig) -> Result<Self, BinanceError> {
        let mut endpoints = if config.testnet {
            Endpoints::testnet()
        } else {
            Endpoints::mainnet()
        };
        if let Some(base) = config.base_url.clone() {
            endpoints = endpoints.with_api_base(base);
        }

        let signer: Option<Arc<dyn Signer>> = if config.has_credentials() {
            Some(Arc::new(HmacSigner::new(config.secret_key().to_string())))
        } else {
            None
        };

        let rest = ReqwestRest::new(endpoints, rest_config, config.api_key(), signer)?;
        Ok(Self { rest, config })
    }
}

impl<R: RestClient> BinanceClient<R> {
    /// Create a session over an existing transport (dependency injection;
    /// used by tests with a scripted transport). Performs no probe.
    pub fn with_rest(rest: R, config: BinanceConfig) -> Self {
        Self { rest, config }
    }

    pub fn rest(&self) -> &R {
        &self.rest
    }

    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }

    /// Check if authentication is available for signed endpoints
    pub fn can_authenticate(&self) -> bool {
        self.config.has_credentials()
    }
}
