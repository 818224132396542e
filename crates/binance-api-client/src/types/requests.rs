/*
[INPUT]:  Order parameters chosen by the caller
[OUTPUT]: Typed request structs encoded to Binance query parameters
[POS]:    Data layer - request definitions for signed endpoints
[UPDATE]: When API parameters change or new requests added
*/

use rust_decimal::Decimal;

use super::enums::{NewOrderResponseType, OrderSide, OrderType, SideEffectType, TimeInForce};
use crate::http::QueryParams;

/// Order placement request for `POST /api/v3/order`
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub time_in_force: Option<TimeInForce>,
    pub quantity: Option<Decimal>,
    pub quote_order_qty: Option<Decimal>,
    pub price: Option<Decimal>,
    pub new_client_order_id: Option<String>,
    pub stop_price: Option<Decimal>,
    pub iceberg_qty: Option<Decimal>,
    pub new_order_resp_type: Option<NewOrderResponseType>,
}

impl NewOrder {
    pub fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            time_in_force: None,
            quantity: None,
            quote_order_qty: None,
            price: None,
            new_client_order_id: None,
            stop_price: None,
            iceberg_qty: None,
            new_order_resp_type: None,
        }
    }

    pub fn limit_buy(
        symbol: impl Into<String>,
        time_in_force: TimeInForce,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::limit(symbol, OrderSide::Buy, time_in_force, quantity, price)
    }

    pub fn limit_sell(
        symbol: impl Into<String>,
        time_in_force: TimeInForce,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self::limit(symbol, OrderSide::Sell, time_in_force, quantity, price)
    }

    pub fn market_buy(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::market(symbol, OrderSide::Buy, quantity)
    }

    pub fn market_sell(symbol: impl Into<String>, quantity: Decimal) -> Self {
        Self::market(symbol, OrderSide::Sell, quantity)
    }

    fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        time_in_force: TimeInForce,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        let mut order = Self::new(symbol, side, OrderType::Limit);
        order.time_in_force = Some(time_in_force);
        order.quantity = Some(quantity);
        order.price = Some(price);
        order
    }

    fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        let mut order = Self::new(symbol, side, OrderType::Market);
        order.quantity = Some(quantity);
        order
    }

    pub fn new_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub fn stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn iceberg_qty(mut self, iceberg_qty: Decimal) -> Self {
        self.iceberg_qty = Some(iceberg_qty);
        self
    }

    pub fn new_order_resp_type(mut self, resp_type: NewOrderResponseType) -> Self {
        self.new_order_resp_type = Some(resp_type);
        self
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("symbol", &self.symbol)
            .with("side", self.side)
            .with("type", self.order_type)
            .with_opt("timeInForce", self.time_in_force)
            .with_decimal_opt("quantity", self.quantity)
            .with_decimal_opt("quoteOrderQty", self.quote_order_qty)
            .with_decimal_opt("price", self.price)
            .with_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .with_decimal_opt("stopPrice", self.stop_price)
            .with_decimal_opt("icebergQty", self.iceberg_qty)
            .with_opt("newOrderRespType", self.new_order_resp_type)
    }
}

/// Cross or isolated margin order for `POST /sapi/v1/margin/order`
#[derive(Debug, Clone, PartialEq)]
pub struct MarginNewOrder {
    pub order: NewOrder,
    pub side_effect_type: Option<SideEffectType>,
    pub is_isolated: Option<bool>,
}

impl MarginNewOrder {
    pub fn side_effect_type(mut self, side_effect_type: SideEffectType) -> Self {
        self.side_effect_type = Some(side_effect_type);
        self
    }

    pub fn isolated(mut self, is_isolated: bool) -> Self {
        self.is_isolated = Some(is_isolated);
        self
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        let is_isolated = self
            .is_isolated
            .map(|value| if value { "TRUE" } else { "FALSE" });
        self.order
            .to_query()
            .with_opt("sideEffectType", self.side_effect_type)
            .with_opt("isIsolated", is_isolated)
    }
}

impl From<NewOrder> for MarginNewOrder {
    fn from(order: NewOrder) -> Self {
        Self {
            order,
            side_effect_type: None,
            is_isolated: None,
        }
    }
}

/// Identifies an order either by exchange id or by client order id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatusRequest {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub orig_client_order_id: Option<String>,
}

impl OrderStatusRequest {
    pub fn by_order_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
        }
    }

    pub fn by_client_order_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
        }
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("symbol", &self.symbol)
            .with_opt("orderId", self.order_id)
            .with_opt("origClientOrderId", self.orig_client_order_id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderRequest {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub orig_client_order_id: Option<String>,
    /// Client id assigned to the cancel itself
    pub new_client_order_id: Option<String>,
}

impl CancelOrderRequest {
    pub fn by_order_id(symbol: impl Into<String>, order_id: i64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            new_client_order_id: None,
        }
    }

    pub fn by_client_order_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            new_client_order_id: None,
        }
    }

    pub fn new_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("symbol", &self.symbol)
            .with_opt("orderId", self.order_id)
            .with_opt("origClientOrderId", self.orig_client_order_id.as_deref())
            .with_opt("newClientOrderId", self.new_client_order_id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllOrdersRequest {
    pub symbol: String,
    pub order_id: Option<i64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
}

impl AllOrdersRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            start_time: None,
            end_time: None,
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn from_order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("symbol", &self.symbol)
            .with_opt("orderId", self.order_id)
            .with_opt("startTime", self.start_time)
            .with_opt("endTime", self.end_time)
            .with_opt("limit", self.limit)
    }
}
