/*
[INPUT]:  API key and secret from ApiConfig
[OUTPUT]: Credential able to sign Binance request payloads
[POS]:    Auth layer - HMAC SHA256 request authentication
[UPDATE]: When signing scheme or key handling changes
*/

pub mod credential;

pub use credential::Credential;
