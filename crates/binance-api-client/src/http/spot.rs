/*
[INPUT]:  Symbols, order requests and ApiConfig credentials
[OUTPUT]: Spot market data, account data and order results
[POS]:    HTTP layer - asynchronous spot REST client
[UPDATE]: When adding spot endpoints or changing parameters
*/

use std::sync::Arc;

use crate::config::{ApiConfig, ClientConfig};
use crate::http::client::{RestCore, Security};
use crate::http::{QueryParams, Result};
use crate::types::{
    Account, AggTrade, AllOrdersRequest, Asset, BookTicker, CancelOrderRequest,
    CancelOrderResponse, Candlestick, CandlestickInterval, EmptyResponse, ExchangeInfo,
    ListenKey, MyTrade, NewOrder, NewOrderResponse, Order, OrderBook, OrderStatusRequest,
    ServerTime, TickerPrice, TickerStatistics, Trade,
};

const USER_DATA_STREAM_PATH: &str = "/api/v3/userDataStream";

/// Asynchronous spot REST client
#[derive(Debug, Clone)]
pub struct BinanceApiAsyncRestClient {
    core: RestCore,
}

impl BinanceApiAsyncRestClient {
    /// Create a client with default HTTP tuning
    pub fn new(config: Arc<ApiConfig>) -> Self {
        Self::with_client_config(config, &ClientConfig::default())
    }

    pub fn with_client_config(config: Arc<ApiConfig>, client_config: &ClientConfig) -> Self {
        Self {
            core: RestCore::new(config, client_config),
        }
    }

    /// Point the client at explicit hosts instead of the config-derived ones
    pub fn with_base_urls(
        config: Arc<ApiConfig>,
        client_config: &ClientConfig,
        rest_base_url: &str,
        asset_info_base_url: &str,
    ) -> Self {
        Self {
            core: RestCore::with_base_urls(config, client_config, rest_base_url, asset_info_base_url),
        }
    }

    /// Configuration shared with the factory that built this client
    pub fn config(&self) -> &Arc<ApiConfig> {
        self.core.config()
    }

    // ### General endpoints

    /// GET /api/v3/ping
    pub async fn ping(&self) -> Result<()> {
        let _: EmptyResponse = self
            .core
            .get("/api/v3/ping", QueryParams::new(), Security::None)
            .await?;
        Ok(())
    }

    /// GET /api/v3/time
    pub async fn get_server_time(&self) -> Result<i64> {
        let time: ServerTime = self
            .core
            .get("/api/v3/time", QueryParams::new(), Security::None)
            .await?;
        Ok(time.server_time)
    }

    /// GET /api/v3/exchangeInfo
    pub async fn get_exchange_info(&self) -> Result<ExchangeInfo> {
        self.core
            .get("/api/v3/exchangeInfo", QueryParams::new(), Security::None)
            .await
    }

    /// All supported assets, served by the asset-info host
    ///
    /// GET {asset_info_base_url}assetWithdraw/getAllAsset.html
    pub async fn get_all_assets(&self) -> Result<Vec<Asset>> {
        self.core
            .get_asset_info("assetWithdraw/getAllAsset.html")
            .await
    }

    // ### Market data endpoints

    /// GET /api/v3/depth?symbol={symbol}&limit={limit}
    pub async fn get_order_book(&self, symbol: &str, limit: Option<u32>) -> Result<OrderBook> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with_opt("limit", limit);
        self.core.get("/api/v3/depth", params, Security::None).await
    }

    /// Recent trades
    ///
    /// GET /api/v3/trades?symbol={symbol}&limit={limit}
    pub async fn get_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<Trade>> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with_opt("limit", limit);
        self.core.get("/api/v3/trades", params, Security::None).await
    }

    /// Compressed/aggregate trades
    ///
    /// GET /api/v3/aggTrades
    pub async fn get_agg_trades(
        &self,
        symbol: &str,
        from_id: Option<i64>,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<AggTrade>> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with_opt("fromId", from_id)
            .with_opt("startTime", start_time)
            .with_opt("endTime", end_time)
            .with_opt("limit", limit);
        self.core.get("/api/v3/aggTrades", params, Security::None).await
    }

    /// GET /api/v3/klines
    pub async fn get_candlestick_bars(
        &self,
        symbol: &str,
        interval: CandlestickInterval,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Vec<Candlestick>> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with("interval", interval)
            .with_opt("limit", limit)
            .with_opt("startTime", start_time)
            .with_opt("endTime", end_time);
        self.core.get("/api/v3/klines", params, Security::None).await
    }

    /// GET /api/v3/ticker/24hr?symbol={symbol}
    pub async fn get_24hr_price_statistics(&self, symbol: &str) -> Result<TickerStatistics> {
        let params = QueryParams::new().with("symbol", symbol);
        self.core
            .get("/api/v3/ticker/24hr", params, Security::None)
            .await
    }

    /// GET /api/v3/ticker/price?symbol={symbol}
    pub async fn get_price(&self, symbol: &str) -> Result<TickerPrice> {
        let params = QueryParams::new().with("symbol", symbol);
        self.core
            .get("/api/v3/ticker/price", params, Security::None)
            .await
    }

    /// Latest price of every symbol
    pub async fn get_all_prices(&self) -> Result<Vec<TickerPrice>> {
        self.core
            .get("/api/v3/ticker/price", QueryParams::new(), Security::None)
            .await
    }

    /// Best bid/ask of every symbol
    pub async fn get_book_tickers(&self) -> Result<Vec<BookTicker>> {
        self.core
            .get("/api/v3/ticker/bookTicker", QueryParams::new(), Security::None)
            .await
    }

    // ### Account endpoints (signed)

    /// POST /api/v3/order
    pub async fn new_order(&self, order: NewOrder) -> Result<NewOrderResponse> {
        self.core
            .post("/api/v3/order", order.to_query(), Security::Signed)
            .await
    }

    /// Validate an order without sending it to the matching engine
    ///
    /// POST /api/v3/order/test
    pub async fn new_order_test(&self, order: NewOrder) -> Result<()> {
        let _: EmptyResponse = self
            .core
            .post("/api/v3/order/test", order.to_query(), Security::Signed)
            .await?;
        Ok(())
    }

    /// GET /api/v3/order
    pub async fn get_order_status(&self, request: OrderStatusRequest) -> Result<Order> {
        self.core
            .get("/api/v3/order", request.to_query(), Security::Signed)
            .await
    }

    /// DELETE /api/v3/order
    pub async fn cancel_order(&self, request: CancelOrderRequest) -> Result<CancelOrderResponse> {
        self.core
            .delete("/api/v3/order", request.to_query(), Security::Signed)
            .await
    }

    /// GET /api/v3/openOrders?symbol={symbol}
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Result<Vec<Order>> {
        let params = QueryParams::new().with_opt("symbol", symbol);
        self.core
            .get("/api/v3/openOrders", params, Security::Signed)
            .await
    }

    /// GET /api/v3/allOrders
    pub async fn get_all_orders(&self, request: AllOrdersRequest) -> Result<Vec<Order>> {
        self.core
            .get("/api/v3/allOrders", request.to_query(), Security::Signed)
            .await
    }

    /// GET /api/v3/account
    pub async fn get_account(&self) -> Result<Account> {
        self.core
            .get("/api/v3/account", QueryParams::new(), Security::Signed)
            .await
    }

    /// GET /api/v3/myTrades?symbol={symbol}&limit={limit}
    pub async fn get_my_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<MyTrade>> {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with_opt("limit", limit);
        self.core
            .get("/api/v3/myTrades", params, Security::Signed)
            .await
    }

    // ### User data stream endpoints (API key)

    /// Open a user data stream and return its listen key
    pub async fn start_user_data_stream(&self) -> Result<String> {
        let key: ListenKey = self
            .core
            .post(USER_DATA_STREAM_PATH, QueryParams::new(), Security::ApiKey)
            .await?;
        Ok(key.listen_key)
    }

    /// Extend a listen key by 60 minutes
    pub async fn keep_alive_user_data_stream(&self, listen_key: &str) -> Result<()> {
        let params = QueryParams::new().with("listenKey", listen_key);
        let _: EmptyResponse = self
            .core
            .put(USER_DATA_STREAM_PATH, params, Security::ApiKey)
            .await?;
        Ok(())
    }

    pub async fn close_user_data_stream(&self, listen_key: &str) -> Result<()> {
        let params = QueryParams::new().with("listenKey", listen_key);
        let _: EmptyResponse = self
            .core
            .delete(USER_DATA_STREAM_PATH, params, Security::ApiKey)
            .await?;
        Ok(())
    }
}
