/*
[INPUT]:  Stream base URL, symbols and listen keys
[OUTPUT]: Real-time market data and user-data updates
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod client;
pub mod message;
pub mod transport;

pub use client::{BinanceApiWebSocketClient, StreamSubscription};
pub use message::{
    AccountUpdateEvent, AggTradeEvent, BalanceUpdateEvent, BookTickerEvent, Candle,
    CandlestickEvent, DepthEvent, EventBalance, OrderTradeUpdateEvent, StreamEvent, TickerEvent,
    parse_event,
};
pub use transport::{SharedTransport, shared_transport};
