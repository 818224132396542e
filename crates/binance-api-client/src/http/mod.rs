/*
[INPUT]:  Shared ApiConfig and HTTP tuning
[OUTPUT]: Async and blocking REST facades over the Binance API
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod blocking;
pub(crate) mod client;
pub mod error;
pub mod margin;
pub mod query;
pub mod signature;
pub mod spot;
pub mod swap;

pub use error::{BinanceApiError, Result};
pub use query::QueryParams;
pub use signature::RequestSigner;

pub use blocking::{BinanceApiMarginRestClient, BinanceApiRestClient};
pub use client::Security;
pub use margin::BinanceApiAsyncMarginRestClient;
pub use spot::BinanceApiAsyncRestClient;
pub use swap::BinanceApiSwapRestClient;
