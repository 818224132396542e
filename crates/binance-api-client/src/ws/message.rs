/*
[INPUT]:  Raw stream payload text
[OUTPUT]: Parsed StreamEvent values
[POS]:    WebSocket layer - stream event model and decoding
[UPDATE]: When adding new event types or changing payload format
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{
    CandlestickInterval, ExecutionType, OrderBookEntry, OrderSide, OrderStatus, OrderType,
    TimeInForce,
};

/// Diff. depth update (`depthUpdate`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthEvent {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "U")]
    pub first_update_id: i64,
    #[serde(rename = "u")]
    pub final_update_id: i64,
    #[serde(rename = "b")]
    pub bids: Vec<OrderBookEntry>,
    #[serde(rename = "a")]
    pub asks: Vec<OrderBookEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(rename = "t")]
    pub open_time: i64,
    #[serde(rename = "T")]
    pub close_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "i")]
    pub interval: CandlestickInterval,
    #[serde(rename = "f")]
    pub first_trade_id: i64,
    #[serde(rename = "L")]
    pub last_trade_id: i64,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "n")]
    pub number_of_trades: i64,
    /// Closed bar
    #[serde(rename = "x")]
    pub is_final: bool,
    #[serde(rename = "q")]
    pub quote_asset_volume: Decimal,
    #[serde(rename = "V")]
    pub taker_buy_base_asset_volume: Decimal,
    #[serde(rename = "Q")]
    pub taker_buy_quote_asset_volume: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickEvent {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "k")]
    pub candle: Candle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggTradeEvent {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "a")]
    pub agg_trade_id: i64,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "q")]
    pub qty: Decimal,
    #[serde(rename = "f")]
    pub first_trade_id: i64,
    #[serde(rename = "l")]
    pub last_trade_id: i64,
    #[serde(rename = "T")]
    pub trade_time: i64,
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
}

/// Rolling 24h statistics (`24hrTicker`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerEvent {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "p")]
    pub price_change: Decimal,
    #[serde(rename = "P")]
    pub price_change_percent: Decimal,
    #[serde(rename = "w")]
    pub weighted_avg_price: Decimal,
    #[serde(rename = "c")]
    pub last_price: Decimal,
    #[serde(rename = "Q")]
    pub last_qty: Decimal,
    #[serde(rename = "b")]
    pub best_bid_price: Decimal,
    #[serde(rename = "B")]
    pub best_bid_qty: Decimal,
    #[serde(rename = "a")]
    pub best_ask_price: Decimal,
    #[serde(rename = "A")]
    pub best_ask_qty: Decimal,
    #[serde(rename = "o")]
    pub open_price: Decimal,
    #[serde(rename = "h")]
    pub high_price: Decimal,
    #[serde(rename = "l")]
    pub low_price: Decimal,
    #[serde(rename = "v")]
    pub volume: Decimal,
    #[serde(rename = "q")]
    pub quote_volume: Decimal,
    #[serde(rename = "O")]
    pub open_time: i64,
    #[serde(rename = "C")]
    pub close_time: i64,
    #[serde(rename = "n")]
    pub count: i64,
}

/// Best bid/ask update; this payload carries no event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookTickerEvent {
    #[serde(rename = "u")]
    pub update_id: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "b")]
    pub best_bid_price: Decimal,
    #[serde(rename = "B")]
    pub best_bid_qty: Decimal,
    #[serde(rename = "a")]
    pub best_ask_price: Decimal,
    #[serde(rename = "A")]
    pub best_ask_qty: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBalance {
    #[serde(rename = "a")]
    pub asset: String,
    #[serde(rename = "f")]
    pub free: Decimal,
    #[serde(rename = "l")]
    pub locked: Decimal,
}

/// Balances changed by an account event (`outboundAccountPosition`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdateEvent {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "u")]
    pub last_update_time: i64,
    #[serde(rename = "B")]
    pub balances: Vec<EventBalance>,
}

/// Deposit, withdrawal or transfer (`balanceUpdate`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceUpdateEvent {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "a")]
    pub asset: String,
    #[serde(rename = "d")]
    pub balance_delta: Decimal,
    #[serde(rename = "T")]
    pub clear_time: i64,
}

/// Order lifecycle update (`executionReport`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTradeUpdateEvent {
    #[serde(rename = "E")]
    pub event_time: i64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "c")]
    pub client_order_id: String,
    #[serde(rename = "S")]
    pub side: OrderSide,
    #[serde(rename = "o")]
    pub order_type: OrderType,
    #[serde(rename = "f")]
    pub time_in_force: TimeInForce,
    #[serde(rename = "q")]
    pub original_quantity: Decimal,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "x")]
    pub execution_type: ExecutionType,
    #[serde(rename = "X")]
    pub order_status: OrderStatus,
    #[serde(rename = "r")]
    pub reject_reason: String,
    #[serde(rename = "i")]
    pub order_id: i64,
    #[serde(rename = "l")]
    pub last_executed_quantity: Decimal,
    #[serde(rename = "z")]
    pub cumulative_filled_quantity: Decimal,
    #[serde(rename = "L")]
    pub last_executed_price: Decimal,
    #[serde(rename = "n")]
    pub commission: Decimal,
    #[serde(rename = "N", default)]
    pub commission_asset: Option<String>,
    #[serde(rename = "T")]
    pub transaction_time: i64,
    /// -1 when the update is not a fill
    #[serde(rename = "t")]
    pub trade_id: i64,
    #[serde(rename = "m")]
    pub is_maker: bool,
}

/// Everything a stream subscription can deliver
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    DepthUpdate(DepthEvent),
    Candlestick(CandlestickEvent),
    AggTrade(AggTradeEvent),
    Ticker(TickerEvent),
    AllMarketTickers(Vec<TickerEvent>),
    BookTicker(BookTickerEvent),
    AccountUpdate(AccountUpdateEvent),
    BalanceUpdate(BalanceUpdateEvent),
    OrderTradeUpdate(OrderTradeUpdateEvent),
    /// Unrecognized payload, kept verbatim
    Other(String),
}

impl StreamEvent {
    /// Short name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::DepthUpdate(_) => "depthUpdate",
            StreamEvent::Candlestick(_) => "kline",
            StreamEvent::AggTrade(_) => "aggTrade",
            StreamEvent::Ticker(_) => "24hrTicker",
            StreamEvent::AllMarketTickers(_) => "allMarketTickers",
            StreamEvent::BookTicker(_) => "bookTicker",
            StreamEvent::AccountUpdate(_) => "outboundAccountPosition",
            StreamEvent::BalanceUpdate(_) => "balanceUpdate",
            StreamEvent::OrderTradeUpdate(_) => "executionReport",
            StreamEvent::Other(_) => "other",
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            StreamEvent::DepthUpdate(event) => Some(&event.symbol),
            StreamEvent::Candlestick(event) => Some(&event.symbol),
            StreamEvent::AggTrade(event) => Some(&event.symbol),
            StreamEvent::Ticker(event) => Some(&event.symbol),
            StreamEvent::BookTicker(event) => Some(&event.symbol),
            StreamEvent::OrderTradeUpdate(event) => Some(&event.symbol),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "e")]
enum TaggedEvent {
    #[serde(rename = "depthUpdate")]
    DepthUpdate(DepthEvent),
    #[serde(rename = "kline")]
    Candlestick(CandlestickEvent),
    #[serde(rename = "aggTrade")]
    AggTrade(AggTradeEvent),
    #[serde(rename = "24hrTicker")]
    Ticker(TickerEvent),
    #[serde(rename = "outboundAccountPosition")]
    AccountUpdate(AccountUpdateEvent),
    #[serde(rename = "balanceUpdate")]
    BalanceUpdate(BalanceUpdateEvent),
    #[serde(rename = "executionReport")]
    OrderTradeUpdate(OrderTradeUpdateEvent),
}

const KNOWN_EVENT_TYPES: &[&str] = &[
    "depthUpdate",
    "kline",
    "aggTrade",
    "24hrTicker",
    "outboundAccountPosition",
    "balanceUpdate",
    "executionReport",
];

impl From<TaggedEvent> for StreamEvent {
    fn from(event: TaggedEvent) -> Self {
        match event {
            TaggedEvent::DepthUpdate(event) => StreamEvent::DepthUpdate(event),
            TaggedEvent::Candlestick(event) => StreamEvent::Candlestick(event),
            TaggedEvent::AggTrade(event) => StreamEvent::AggTrade(event),
            TaggedEvent::Ticker(event) => StreamEvent::Ticker(event),
            TaggedEvent::AccountUpdate(event) => StreamEvent::AccountUpdate(event),
            TaggedEvent::BalanceUpdate(event) => StreamEvent::BalanceUpdate(event),
            TaggedEvent::OrderTradeUpdate(event) => StreamEvent::OrderTradeUpdate(event),
        }
    }
}

/// Decode one stream payload.
///
/// Unrecognized shapes decode to `StreamEvent::Other`. Errors are reserved
/// for invalid JSON and for recognized events whose fields do not match.
pub fn parse_event(text: &str) -> Result<StreamEvent, serde_json::Error> {
    let mut value: Value = serde_json::from_str(text)?;

    // combined-stream envelope: {"stream": "...", "data": {...}}
    if value.get("stream").is_some()
        && let Some(data) = value.get_mut("data")
    {
        value = data.take();
    }

    match &value {
        Value::Array(_) => Ok(StreamEvent::AllMarketTickers(serde_json::from_value(value)?)),
        Value::Object(map) => match map.get("e").and_then(Value::as_str) {
            Some(tag) if KNOWN_EVENT_TYPES.contains(&tag) => {
                Ok(serde_json::from_value::<TaggedEvent>(value)?.into())
            }
            Some(_) => Ok(StreamEvent::Other(text.to_string())),
            None if ["u", "s", "b", "a"].iter().all(|key| map.contains_key(*key)) => {
                Ok(StreamEvent::BookTicker(serde_json::from_value(value)?))
            }
            None => Ok(StreamEvent::Other(text.to_string())),
        },
        _ => Ok(StreamEvent::Other(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_parse_depth_update() {
        let raw = r#"{"e":"depthUpdate","E":123456789,"s":"BNBBTC","U":157,"u":160,
            "b":[["0.0024","10"]],"a":[["0.0026","100"]]}"#;
        match parse_event(raw).unwrap() {
            StreamEvent::DepthUpdate(event) => {
                assert_eq!(event.symbol, "BNBBTC");
                assert_eq!(event.first_update_id, 157);
                assert_eq!(event.final_update_id, 160);
                assert_eq!(event.bids[0].price(), dec("0.0024"));
                assert_eq!(event.asks[0].qty(), dec("100"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_kline() {
        let raw = r#"{"e":"kline","E":123456789,"s":"BNBBTC","k":{
            "t":123400000,"T":123460000,"s":"BNBBTC","i":"1m","f":100,"L":200,
            "o":"0.0010","c":"0.0020","h":"0.0025","l":"0.0015","v":"1000",
            "n":100,"x":false,"q":"1.0000","V":"500","Q":"0.500","B":"123456"}}"#;
        match parse_event(raw).unwrap() {
            StreamEvent::Candlestick(event) => {
                assert_eq!(event.candle.interval, CandlestickInterval::OneMinute);
                assert_eq!(event.candle.high, dec("0.0025"));
                assert!(!event.candle.is_final);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_agg_trade() {
        let raw = r#"{"e":"aggTrade","E":123456789,"s":"BNBBTC","a":12345,"p":"0.001",
            "q":"100","f":100,"l":105,"T":123456785,"m":true,"M":true}"#;
        match parse_event(raw).unwrap() {
            StreamEvent::AggTrade(event) => {
                assert_eq!(event.agg_trade_id, 12345);
                assert!(event.is_buyer_maker);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    fn ticker_json(symbol: &str) -> String {
        format!(
            r#"{{"e":"24hrTicker","E":123456789,"s":"{symbol}","p":"0.0015","P":"250.00",
            "w":"0.0018","x":"0.0009","c":"0.0025","Q":"10","b":"0.0024","B":"10",
            "a":"0.0026","A":"100","o":"0.0010","h":"0.0025","l":"0.0010","v":"10000",
            "q":"18","O":0,"C":86400000,"F":0,"L":18150,"n":18151}}"#
        )
    }

    #[test]
    fn test_parse_ticker() {
        match parse_event(&ticker_json("BNBBTC")).unwrap() {
            StreamEvent::Ticker(event) => {
                assert_eq!(event.last_price, dec("0.0025"));
                assert_eq!(event.count, 18151);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_all_market_tickers() {
        let raw = format!("[{},{}]", ticker_json("BNBBTC"), ticker_json("ETHBTC"));
        match parse_event(&raw).unwrap() {
            StreamEvent::AllMarketTickers(events) => {
                assert_eq!(events.len(), 2);
                assert_eq!(events[1].symbol, "ETHBTC");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_book_ticker_without_event_type() {
        let raw = r#"{"u":400900217,"s":"BNBUSDT","b":"25.35190000","B":"31.21000000",
            "a":"25.36520000","A":"40.66000000"}"#;
        let event = parse_event(raw).unwrap();
        assert_eq!(event.kind(), "bookTicker");
        assert_eq!(event.symbol(), Some("BNBUSDT"));
    }

    #[test]
    fn test_parse_account_and_balance_updates() {
        let raw = r#"{"e":"outboundAccountPosition","E":1564034571105,"u":1564034571073,
            "B":[{"a":"ETH","f":"10000.000000","l":"0.000000"}]}"#;
        match parse_event(raw).unwrap() {
            StreamEvent::AccountUpdate(event) => {
                assert_eq!(event.balances[0].asset, "ETH");
                assert_eq!(event.balances[0].free, dec("10000"));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let raw = r#"{"e":"balanceUpdate","E":1573200697110,"a":"BTC",
            "d":"100.00000000","T":1573200697068}"#;
        match parse_event(raw).unwrap() {
            StreamEvent::BalanceUpdate(event) => assert_eq!(event.balance_delta, dec("100")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_execution_report() {
        let raw = r#"{"e":"executionReport","E":1499405658658,"s":"ETHBTC",
            "c":"mUvoqJxFIILMdfAW5iGSOW","S":"BUY","o":"LIMIT","f":"GTC",
            "q":"1.00000000","p":"0.10264410","P":"0.00000000","F":"0.00000000",
            "g":-1,"C":"","x":"NEW","X":"NEW","r":"NONE","i":4293153,
            "l":"0.00000000","z":"0.00000000","L":"0.00000000","n":"0","N":null,
            "T":1499405658657,"t":-1,"I":8641984,"w":true,"m":false,"M":false,
            "O":1499405658657,"Z":"0.00000000","Y":"0.00000000","Q":"0.00000000"}"#;
        match parse_event(raw).unwrap() {
            StreamEvent::OrderTradeUpdate(event) => {
                assert_eq!(event.side, OrderSide::Buy);
                assert_eq!(event.execution_type, ExecutionType::New);
                assert_eq!(event.order_status, OrderStatus::New);
                assert_eq!(event.commission_asset, None);
                assert_eq!(event.trade_id, -1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_combined_stream_envelope_is_unwrapped() {
        let raw = format!(r#"{{"stream":"bnbbtc@ticker","data":{}}}"#, ticker_json("BNBBTC"));
        assert_eq!(parse_event(&raw).unwrap().kind(), "24hrTicker");
    }

    #[test]
    fn test_unknown_payloads_are_other() {
        let event = parse_event(r#"{"e":"listenKeyExpired","E":1576653824250}"#).unwrap();
        assert!(matches!(event, StreamEvent::Other(_)));

        let event = parse_event(r#"{"result":null,"id":1}"#).unwrap();
        assert!(matches!(event, StreamEvent::Other(_)));
    }

    #[test]
    fn test_malformed_known_event_is_error() {
        assert!(parse_event(r#"{"e":"aggTrade","s":"BNBBTC"}"#).is_err());
        assert!(parse_event("not json").is_err());
    }
}
