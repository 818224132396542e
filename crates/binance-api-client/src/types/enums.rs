/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! impl_display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Limit,
    Market,
    StopLoss,
    StopLossLimit,
    TakeProfit,
    TakeProfitLimit,
    LimitMaker,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
            OrderType::StopLoss => "STOP_LOSS",
            OrderType::StopLossLimit => "STOP_LOSS_LIMIT",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            OrderType::LimitMaker => "LIMIT_MAKER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "GTC")]
    Gtc,
    #[serde(rename = "IOC")]
    Ioc,
    #[serde(rename = "FOK")]
    Fok,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    PendingCancel,
    Rejected,
    Expired,
    ExpiredInMatch,
}

/// Response detail level for `POST /api/v3/order`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewOrderResponseType {
    Ack,
    Result,
    Full,
}

impl NewOrderResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewOrderResponseType::Ack => "ACK",
            NewOrderResponseType::Result => "RESULT",
            NewOrderResponseType::Full => "FULL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SymbolStatus {
    PreTrading,
    Trading,
    PostTrading,
    EndOfDay,
    Halt,
    AuctionMatch,
    Break,
}

/// Execution report transition (`x` in `executionReport`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionType {
    New,
    Canceled,
    Replaced,
    Rejected,
    Trade,
    Expired,
    TradePrevention,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandlestickInterval {
    #[serde(rename = "1s")]
    OneSecond,
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    HalfHourly,
    #[serde(rename = "1h")]
    Hourly,
    #[serde(rename = "2h")]
    TwoHourly,
    #[serde(rename = "4h")]
    FourHourly,
    #[serde(rename = "6h")]
    SixHourly,
    #[serde(rename = "8h")]
    EightHourly,
    #[serde(rename = "12h")]
    TwelveHourly,
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "3d")]
    ThreeDaily,
    #[serde(rename = "1w")]
    Weekly,
    #[serde(rename = "1M")]
    Monthly,
}

impl CandlestickInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandlestickInterval::OneSecond => "1s",
            CandlestickInterval::OneMinute => "1m",
            CandlestickInterval::ThreeMinutes => "3m",
            CandlestickInterval::FiveMinutes => "5m",
            CandlestickInterval::FifteenMinutes => "15m",
            CandlestickInterval::HalfHourly => "30m",
            CandlestickInterval::Hourly => "1h",
            CandlestickInterval::TwoHourly => "2h",
            CandlestickInterval::FourHourly => "4h",
            CandlestickInterval::SixHourly => "6h",
            CandlestickInterval::EightHourly => "8h",
            CandlestickInterval::TwelveHourly => "12h",
            CandlestickInterval::Daily => "1d",
            CandlestickInterval::ThreeDaily => "3d",
            CandlestickInterval::Weekly => "1w",
            CandlestickInterval::Monthly => "1M",
        }
    }
}

/// Automatic borrow/repay behavior of a margin order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SideEffectType {
    NoSideEffect,
    MarginBuy,
    AutoRepay,
}

impl SideEffectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SideEffectType::NoSideEffect => "NO_SIDE_EFFECT",
            SideEffectType::MarginBuy => "MARGIN_BUY",
            SideEffectType::AutoRepay => "AUTO_REPAY",
        }
    }
}

/// Direction of a spot <-> cross-margin transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    MainToMargin,
    MarginToMain,
}

impl TransferType {
    /// Numeric code expected by `/sapi/v1/margin/transfer`
    pub fn code(&self) -> u8 {
        match self {
            TransferType::MainToMargin => 1,
            TransferType::MarginToMain => 2,
        }
    }
}

/// How liquidity is removed from a swap pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquidityOperationType {
    Single,
    Combination,
}

impl LiquidityOperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiquidityOperationType::Single => "SINGLE",
            LiquidityOperationType::Combination => "COMBINATION",
        }
    }
}

impl_display_as_str!(
    OrderSide,
    OrderType,
    TimeInForce,
    NewOrderResponseType,
    CandlestickInterval,
    SideEffectType,
    LiquidityOperationType,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        let side = serde_json::to_string(&OrderSide::Sell).unwrap();
        assert_eq!(side.trim_matches('"'), OrderSide::Sell.as_str());

        let order_type = serde_json::to_string(&OrderType::StopLossLimit).unwrap();
        assert_eq!(order_type.trim_matches('"'), OrderType::StopLossLimit.as_str());

        let interval = serde_json::to_string(&CandlestickInterval::Monthly).unwrap();
        assert_eq!(interval.trim_matches('"'), "1M");
    }

    #[test]
    fn test_order_status_parses_exchange_values() {
        let status: OrderStatus = serde_json::from_str(r#""PARTIALLY_FILLED""#).unwrap();
        assert_eq!(status, OrderStatus::PartiallyFilled);
    }

    #[test]
    fn test_transfer_codes() {
        assert_eq!(TransferType::MainToMargin.code(), 1);
        assert_eq!(TransferType::MarginToMain.code(), 2);
    }
}
