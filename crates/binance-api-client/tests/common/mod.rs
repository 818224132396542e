/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-api-client tests

#![allow(dead_code)]

use std::sync::Arc;

use binance_api_client::{
    ApiConfig, BinanceApiAsyncMarginRestClient, BinanceApiAsyncRestClient, ClientConfig,
    Credential, NetworkSelector,
};
use tokio::runtime::Runtime;
use wiremock::{MockServer, Request};

/// Key/secret pair from the exchange's signing documentation
pub const TEST_API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
pub const TEST_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock server driven by its own runtime, for exercising blocking clients
/// from a thread that is not inside any runtime.
pub fn setup_blocking_mock_server() -> (Runtime, MockServer) {
    let runtime = Runtime::new().expect("test runtime");
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

pub fn authenticated_config() -> Arc<ApiConfig> {
    Arc::new(ApiConfig::new(
        Some(TEST_API_KEY.to_string()),
        Some(TEST_SECRET.to_string()),
        NetworkSelector::Production,
    ))
}

pub fn anonymous_config() -> Arc<ApiConfig> {
    Arc::new(ApiConfig::default())
}

pub fn spot_client(server: &MockServer, config: Arc<ApiConfig>) -> BinanceApiAsyncRestClient {
    let base = server.uri();
    BinanceApiAsyncRestClient::with_base_urls(
        config,
        &ClientConfig::default(),
        &base,
        &format!("{base}/"),
    )
}

pub fn margin_client(
    server: &MockServer,
    config: Arc<ApiConfig>,
) -> BinanceApiAsyncMarginRestClient {
    BinanceApiAsyncMarginRestClient::with_base_url(config, &ClientConfig::default(), &server.uri())
}

/// Matches requests whose `signature` param is the HMAC of the rest of the query
pub fn has_valid_signature(request: &Request) -> bool {
    let Some(query) = request.url.query() else {
        return false;
    };
    let Some((payload, signature)) = query.rsplit_once("&signature=") else {
        return false;
    };
    Credential::new(TEST_API_KEY, TEST_SECRET).sign(payload) == signature
}

pub fn has_timestamp(request: &Request) -> bool {
    request.url.query_pairs().any(|(key, _)| key == "timestamp")
}
