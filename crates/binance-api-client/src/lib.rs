/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Binance client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod factory;
pub mod http;
pub mod types;
pub mod ws;

pub use auth::Credential;

pub use config::{ApiConfig, BASE_DOMAIN, ClientConfig, NetworkSelector, TEST_NET_BASE_DOMAIN};

pub use factory::BinanceApiClientFactory;

// Re-export commonly used types from http
pub use http::{
    BinanceApiAsyncMarginRestClient,
    BinanceApiAsyncRestClient,
    BinanceApiError,
    BinanceApiMarginRestClient,
    BinanceApiRestClient,
    BinanceApiSwapRestClient,
    QueryParams,
    RequestSigner,
    Result,
    Security,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    BinanceApiWebSocketClient,
    SharedTransport,
    StreamEvent,
    StreamSubscription,
    parse_event,
    shared_transport,
};
