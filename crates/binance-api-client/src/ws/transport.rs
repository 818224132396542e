/*
[INPUT]:  First access from any thread
[OUTPUT]: Process-wide HTTP transport shared by streaming clients
[POS]:    WebSocket layer - listen-key lifecycle over one pooled client
[UPDATE]: When changing transport tuning or listen-key endpoints
*/

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::{Client, Method};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::http::client::{
    API_KEY_HEADER, build_http_client, decode_response, join_url, transport_error,
};
use crate::http::{QueryParams, Result};
use crate::types::{EmptyResponse, ListenKey};

const USER_DATA_STREAM_PATH: &str = "/api/v3/userDataStream";

static SHARED_TRANSPORT: OnceLock<Arc<SharedTransport>> = OnceLock::new();

/// Process-wide transport, built on first call and kept until exit
pub fn shared_transport() -> Arc<SharedTransport> {
    SHARED_TRANSPORT
        .get_or_init(|| {
            info!("initializing shared binance transport");
            Arc::new(SharedTransport::new(&ClientConfig::default()))
        })
        .clone()
}

/// Connection-pooled HTTP client behind every streaming client
#[derive(Debug)]
pub struct SharedTransport {
    http_client: Client,
    timeout: Duration,
}

impl SharedTransport {
    fn new(client_config: &ClientConfig) -> Self {
        Self {
            http_client: build_http_client(client_config),
            timeout: client_config.timeout,
        }
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub(crate) async fn start_user_data_stream(
        &self,
        rest_base_url: &str,
        api_key: &str,
    ) -> Result<String> {
        let key: ListenKey = self
            .listen_key_request(Method::POST, rest_base_url, api_key, "")
            .await?;
        Ok(key.listen_key)
    }

    pub(crate) async fn keep_alive_user_data_stream(
        &self,
        rest_base_url: &str,
        api_key: &str,
        listen_key: &str,
    ) -> Result<()> {
        let query = listen_key_query(listen_key);
        let _: EmptyResponse = self
            .listen_key_request(Method::PUT, rest_base_url, api_key, &query)
            .await?;
        Ok(())
    }

    pub(crate) async fn close_user_data_stream(
        &self,
        rest_base_url: &str,
        api_key: &str,
        listen_key: &str,
    ) -> Result<()> {
        let query = listen_key_query(listen_key);
        let _: EmptyResponse = self
            .listen_key_request(Method::DELETE, rest_base_url, api_key, &query)
            .await?;
        Ok(())
    }

    async fn listen_key_request<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        rest_base_url: &str,
        api_key: &str,
        query: &str,
    ) -> Result<T> {
        let url = join_url(rest_base_url, USER_DATA_STREAM_PATH, query)?;
        debug!(method = %method, path = USER_DATA_STREAM_PATH, "binance listen key request");
        let response = self
            .http_client
            .request(method, url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|err| transport_error(err, self.timeout))?;
        decode_response(response, self.timeout).await
    }
}

fn listen_key_query(listen_key: &str) -> String {
    QueryParams::new().with("listenKey", listen_key).encode()
}
