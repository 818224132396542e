/*
[INPUT]:  Credentials, network choice or a prepared ApiConfig
[OUTPUT]: REST, margin, swap and streaming clients sharing one config
[POS]:    Entry point - client construction
[UPDATE]: When adding client kinds or constructor options
*/

use std::sync::Arc;

use crate::config::{ApiConfig, ClientConfig, NetworkSelector};
use crate::http::{
    BinanceApiAsyncMarginRestClient, BinanceApiAsyncRestClient, BinanceApiMarginRestClient,
    BinanceApiRestClient, BinanceApiSwapRestClient, Result,
};
use crate::ws::{BinanceApiWebSocketClient, shared_transport};

/// Builds clients that all share one immutable [`ApiConfig`]
#[derive(Debug, Clone)]
pub struct BinanceApiClientFactory {
    config: Arc<ApiConfig>,
    client_config: ClientConfig,
}

impl BinanceApiClientFactory {
    /// Unauthenticated factory against production
    pub fn new() -> Self {
        Self::from_parts(None, None, NetworkSelector::Production)
    }

    pub fn with_credentials(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::from_parts(
            Some(api_key.into()),
            Some(secret.into()),
            NetworkSelector::Production,
        )
    }

    pub fn with_credentials_and_network(
        api_key: impl Into<String>,
        secret: impl Into<String>,
        use_test_network: bool,
    ) -> Self {
        let network = if use_test_network {
            NetworkSelector::Test
        } else {
            NetworkSelector::Production
        };
        Self::from_parts(Some(api_key.into()), Some(secret.into()), network)
    }

    /// Use a prepared config, e.g. one with a custom domain
    pub fn from_config(config: ApiConfig) -> Self {
        Self::from_shared(Arc::new(config), ClientConfig::default())
    }

    /// Resolve credentials and network from `BINANCE_*` variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ApiConfig::from_env()?))
    }

    pub fn with_client_config(mut self, client_config: ClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    fn from_parts(
        api_key: Option<String>,
        secret: Option<String>,
        network: NetworkSelector,
    ) -> Self {
        Self::from_config(ApiConfig::new(api_key, secret, network))
    }

    fn from_shared(config: Arc<ApiConfig>, client_config: ClientConfig) -> Self {
        Self {
            config,
            client_config,
        }
    }

    pub fn config(&self) -> &Arc<ApiConfig> {
        &self.config
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    pub fn new_rest_client(&self) -> BinanceApiRestClient {
        BinanceApiRestClient::with_client_config(self.config.clone(), &self.client_config)
    }

    pub fn new_async_rest_client(&self) -> BinanceApiAsyncRestClient {
        BinanceApiAsyncRestClient::with_client_config(self.config.clone(), &self.client_config)
    }

    pub fn new_margin_rest_client(&self) -> BinanceApiMarginRestClient {
        BinanceApiMarginRestClient::with_client_config(self.config.clone(), &self.client_config)
    }

    pub fn new_async_margin_rest_client(&self) -> BinanceApiAsyncMarginRestClient {
        BinanceApiAsyncMarginRestClient::with_client_config(
            self.config.clone(),
            &self.client_config,
        )
    }

    pub fn new_swap_rest_client(&self) -> BinanceApiSwapRestClient {
        BinanceApiSwapRestClient::with_client_config(self.config.clone(), &self.client_config)
    }

    /// Streaming client wired to the process-wide transport
    pub fn new_web_socket_client(&self) -> BinanceApiWebSocketClient {
        BinanceApiWebSocketClient::new(shared_transport(), self.config.clone())
    }
}

impl Default for BinanceApiClientFactory {
    fn default() -> Self {
        Self::new()
    }
}
