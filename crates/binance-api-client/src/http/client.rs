/*
[INPUT]:  Shared ApiConfig, HTTP tuning, endpoint path + params + security level
[OUTPUT]: Decoded JSON responses or mapped BinanceApiError
[POS]:    HTTP layer - core request pipeline shared by all REST facades
[UPDATE]: When adding connection options or changing response handling
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::Credential;
use crate::config::{ApiConfig, ClientConfig};
use crate::http::{BinanceApiError, QueryParams, RequestSigner, Result};
use crate::types::ErrorResponse;

pub(crate) const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const USER_AGENT: &str = concat!("binance-api-client/", env!("CARGO_PKG_VERSION"));

/// Authentication required by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    /// Public market data
    None,
    /// `X-MBX-APIKEY` header only (user streams, some market data)
    ApiKey,
    /// API key header plus HMAC signature (TRADE / USER_DATA)
    Signed,
}

/// Build the pooled reqwest client used by a REST facade.
pub(crate) fn build_http_client(client_config: &ClientConfig) -> Client {
    match Client::builder()
        .timeout(client_config.timeout)
        .connect_timeout(client_config.connect_timeout)
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            warn!(error = %err, "http client build failed, using reqwest defaults");
            Client::new()
        }
    }
}

/// Request pipeline behind every REST facade
#[derive(Debug, Clone)]
pub(crate) struct RestCore {
    http_client: Client,
    config: Arc<ApiConfig>,
    base_url: String,
    asset_info_base_url: String,
    recv_window: Option<u64>,
    timeout: Duration,
}

impl RestCore {
    pub(crate) fn new(config: Arc<ApiConfig>, client_config: &ClientConfig) -> Self {
        let base_url = config.rest_base_url();
        let asset_info_base_url = config.asset_info_base_url();
        Self::with_base_urls(config, client_config, base_url, asset_info_base_url)
    }

    pub(crate) fn with_base_urls(
        config: Arc<ApiConfig>,
        client_config: &ClientConfig,
        base_url: impl Into<String>,
        asset_info_base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client: build_http_client(client_config),
            config,
            base_url: base_url.into(),
            asset_info_base_url: asset_info_base_url.into(),
            recv_window: client_config.recv_window,
            timeout: client_config.timeout,
        }
    }

    pub(crate) fn config(&self) -> &Arc<ApiConfig> {
        &self.config
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        security: Security,
    ) -> Result<T> {
        self.send(Method::GET, path, params, security).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        security: Security,
    ) -> Result<T> {
        self.send(Method::POST, path, params, security).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        security: Security,
    ) -> Result<T> {
        self.send(Method::PUT, path, params, security).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        security: Security,
    ) -> Result<T> {
        self.send(Method::DELETE, path, params, security).await
    }

    /// GET against the asset-info host instead of the REST host
    pub(crate) async fn get_asset_info<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = join_url(&self.asset_info_base_url, path, "")?;
        debug!(method = "GET", path, "binance asset info request");
        self.send_json(self.http_client.get(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
        security: Security,
    ) -> Result<T> {
        let query = params.encode();
        let (query, api_key) = match security {
            Security::None => (query, None),
            Security::ApiKey => (query, Some(self.api_key()?.to_string())),
            Security::Signed => {
                let signer = RequestSigner::new(self.credential()?, self.recv_window);
                let signed = signer.sign_query(&query, signer.timestamp());
                (signed, Some(signer.api_key().to_string()))
            }
        };

        let url = join_url(&self.base_url, path, &query)?;
        debug!(method = %method, path, security = ?security, "binance request");

        let mut builder = self.http_client.request(method, url);
        if let Some(api_key) = api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        self.send_json(builder).await
    }

    /// Send a prepared request and decode the JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|err| transport_error(err, self.timeout))?;
        decode_response(response, self.timeout).await
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or(BinanceApiError::MissingCredentials)
    }

    fn credential(&self) -> Result<Credential> {
        Credential::from_config(&self.config).ok_or(BinanceApiError::MissingCredentials)
    }
}

/// Join `path` onto `base` and attach an already-encoded query
pub(crate) fn join_url(base: &str, path: &str, query: &str) -> Result<Url> {
    let mut url = Url::parse(base)?.join(path)?;
    if !query.is_empty() {
        url.set_query(Some(query));
    }
    Ok(url)
}

/// A reqwest failure, with timeouts reported against the configured limit
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> BinanceApiError {
    if err.is_timeout() {
        BinanceApiError::Timeout {
            duration: timeout.as_secs(),
        }
    } else {
        BinanceApiError::Http(err)
    }
}

pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
    timeout: Duration,
) -> Result<T> {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    let body = response
        .bytes()
        .await
        .map_err(|err| transport_error(err, timeout))?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }
    Err(error_from_response(status, retry_after, &body))
}

/// Map a non-2xx response to the error taxonomy
pub(crate) fn error_from_response(
    status: StatusCode,
    retry_after: Option<u64>,
    body: &[u8],
) -> BinanceApiError {
    // 418 is the IP ban that follows ignored 429s
    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::IM_A_TEAPOT {
        let retry_after = retry_after.unwrap_or(0);
        warn!(status = status.as_u16(), retry_after, "binance rate limit hit");
        return BinanceApiError::RateLimit { retry_after };
    }

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(payload) => {
            warn!(
                status = status.as_u16(),
                code = payload.code,
                message = %payload.msg,
                "binance api error"
            );
            BinanceApiError::Api {
                code: payload.code,
                message: payload.msg,
            }
        }
        Err(_) => {
            let body = String::from_utf8_lossy(body).to_string();
            warn!(status = status.as_u16(), bytes = body.len(), "binance http error");
            BinanceApiError::api_error(status, body)
        }
    }
}
