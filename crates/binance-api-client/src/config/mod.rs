/*
[INPUT]:  Credentials, network selection, HTTP tuning knobs
[OUTPUT]: Resolved ApiConfig and ClientConfig values
[POS]:    Config layer - network/base-URL resolution shared by every client
[UPDATE]: When adding networks, URL rules or tuning options
*/

pub mod api;
pub mod client;

pub use api::{ApiConfig, BASE_DOMAIN, NetworkSelector, TEST_NET_BASE_DOMAIN};
pub use client::ClientConfig;
