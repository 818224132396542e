/*
[INPUT]:  API key, secret, network selector or explicit base domain
[OUTPUT]: Immutable ApiConfig with derived REST/stream/asset-info URLs
[POS]:    Config layer - canonical resolver for every client
[UPDATE]: When URL construction rules or domains change
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http::{BinanceApiError, Result};

/// Base domain for production URLs.
pub const BASE_DOMAIN: &str = "binance.com";

/// Base domain for test network URLs.
pub const TEST_NET_BASE_DOMAIN: &str = "testnet.binance.vision";

const ENV_API_KEY: &str = "BINANCE_API_KEY";
const ENV_API_SECRET: &str = "BINANCE_API_SECRET";
const ENV_NETWORK: &str = "BINANCE_NETWORK";
const ENV_BASE_DOMAIN: &str = "BINANCE_BASE_DOMAIN";

/// Backend environment a client talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkSelector {
    #[default]
    Production,
    Test,
    Custom,
}

impl NetworkSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkSelector::Production => "production",
            NetworkSelector::Test => "test",
            NetworkSelector::Custom => "custom",
        }
    }
}

impl fmt::Display for NetworkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkSelector {
    type Err = BinanceApiError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "mainnet" => Ok(NetworkSelector::Production),
            "test" | "testnet" => Ok(NetworkSelector::Test),
            "custom" => Ok(NetworkSelector::Custom),
            other => Err(BinanceApiError::Config(format!(
                "unknown network selector: {other}"
            ))),
        }
    }
}

/// Credentials, network and base domain shared by all clients of a factory.
///
/// The value is immutable once built. URLs are derived on every call.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    api_key: Option<String>,
    secret: Option<String>,
    network: NetworkSelector,
    base_domain: String,
}

impl ApiConfig {
    /// Resolve the base domain from a network selector.
    ///
    /// `Test` maps to [`TEST_NET_BASE_DOMAIN`]. `Production` maps to [`BASE_DOMAIN`].
    /// `Custom` carries no domain here, so the domain defaults to [`BASE_DOMAIN`]
    /// while the selector stays `Custom` (REST resolves to `https://binance.com`).
    /// Use [`ApiConfig::with_custom_domain`] for an explicit host.
    pub fn new(api_key: Option<String>, secret: Option<String>, network: NetworkSelector) -> Self {
        let base_domain = match network {
            NetworkSelector::Test => TEST_NET_BASE_DOMAIN,
            NetworkSelector::Production | NetworkSelector::Custom => BASE_DOMAIN,
        };

        Self {
            api_key,
            secret,
            network,
            base_domain: base_domain.to_string(),
        }
    }

    /// Use an explicit base domain. The domain is taken verbatim.
    pub fn with_custom_domain(
        api_key: Option<String>,
        secret: Option<String>,
        base_domain: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            secret,
            network: NetworkSelector::Custom,
            base_domain: base_domain.into(),
        }
    }

    /// Load from `BINANCE_API_KEY`, `BINANCE_API_SECRET`, `BINANCE_NETWORK`
    /// and `BINANCE_BASE_DOMAIN`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = non_empty(ENV_API_KEY);
        let secret = non_empty(ENV_API_SECRET);

        if let Some(domain) = non_empty(ENV_BASE_DOMAIN) {
            return Ok(Self::with_custom_domain(api_key, secret, domain.trim()));
        }

        let network = match non_empty(ENV_NETWORK) {
            Some(value) => value.parse()?,
            None => NetworkSelector::Production,
        };
        Ok(Self::new(api_key, secret, network))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn network(&self) -> NetworkSelector {
        self.network
    }

    /// Root hostname (e.g. `binance.com`) all URLs derive from
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// True when both key and secret are present and non-empty
    pub fn has_credentials(&self) -> bool {
        matches!(
            (self.api_key(), self.secret()),
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty()
        )
    }

    /// REST API base URL.
    ///
    /// Only production gets the `api.` subdomain; test and custom hosts are used as-is.
    pub fn rest_base_url(&self) -> String {
        match self.network {
            NetworkSelector::Production => format!("https://api.{}", self.base_domain),
            NetworkSelector::Test | NetworkSelector::Custom => {
                format!("https://{}", self.base_domain)
            }
        }
    }

    /// Streaming API base URL.
    pub fn stream_base_url(&self) -> String {
        match self.network {
            NetworkSelector::Production => format!("wss://stream.{}:9443/ws", self.base_domain),
            NetworkSelector::Test | NetworkSelector::Custom => {
                format!("wss://{}/ws", self.base_domain)
            }
        }
    }

    /// Asset info base URL.
    pub fn asset_info_base_url(&self) -> String {
        format!("https://{}/", self.base_domain)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(None, None, NetworkSelector::Production)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(stringify!(ApiConfig))
            .field("api_key", &self.api_key)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("network", &self.network)
            .field("base_domain", &self.base_domain)
            .finish()
    }
}
