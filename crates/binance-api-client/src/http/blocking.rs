/*
[INPUT]:  Async REST clients and a private tokio runtime
[OUTPUT]: Synchronous spot and margin REST facades
[POS]:    HTTP layer - blocking wrappers for callers without an async runtime
[UPDATE]: When async client surfaces change
*/

use std::future::Future;
use std::sync::{Arc, OnceLock};

use rust_decimal::Decimal;
use tokio::runtime::{Builder, Handle, Runtime};

use crate::config::{ApiConfig, ClientConfig};
use crate::http::{
    BinanceApiAsyncMarginRestClient, BinanceApiAsyncRestClient, BinanceApiError, Result,
};
use crate::types::{
    Account, AggTrade, AllOrdersRequest, Asset, BookTicker, CancelOrderRequest,
    CancelOrderResponse, Candlestick, CandlestickInterval, ExchangeInfo, MarginAccount,
    MarginNewOrder, MarginTransaction, MyTrade, NewOrder, NewOrderResponse, Order, OrderBook,
    OrderStatusRequest, TickerPrice, TickerStatistics, Trade, TransferType,
};

/// Current-thread runtime created on first blocking call.
///
/// Calls from inside another tokio runtime fail with [`BinanceApiError::Runtime`].
#[derive(Debug, Default)]
pub(crate) struct BlockingRuntime {
    runtime: OnceLock<Runtime>,
}

impl BlockingRuntime {
    pub(crate) fn block_on<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.runtime()?.block_on(future)
    }

    fn runtime(&self) -> Result<&Runtime> {
        if Handle::try_current().is_ok() {
            return Err(BinanceApiError::Runtime(
                "blocking client called from inside an async runtime".into(),
            ));
        }
        if let Some(runtime) = self.runtime.get() {
            return Ok(runtime);
        }
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| BinanceApiError::Runtime(err.to_string()))?;
        // a racing initializer wins; ours is dropped here
        Ok(self.runtime.get_or_init(|| runtime))
    }
}

/// Synchronous spot REST client
#[derive(Debug)]
pub struct BinanceApiRestClient {
    inner: BinanceApiAsyncRestClient,
    runtime: BlockingRuntime,
}

impl BinanceApiRestClient {
    pub fn new(config: Arc<ApiConfig>) -> Self {
        Self::from_async(BinanceApiAsyncRestClient::new(config))
    }

    pub fn with_client_config(config: Arc<ApiConfig>, client_config: &ClientConfig) -> Self {
        Self::from_async(BinanceApiAsyncRestClient::with_client_config(config, client_config))
    }

    pub fn from_async(inner: BinanceApiAsyncRestClient) -> Self {
        Self {
            inner,
            runtime: BlockingRuntime::default(),
        }
    }

    pub fn config(&self) -> &Arc<ApiConfig> {
        self.inner.config()
    }

    pub fn ping(&self) -> Result<()> {
        self.runtime.block_on(self.inner.ping())
    }

    pub fn get_server_time(&self) -> Result<i64> {
        self.runtime.block_on(self.inner.get_server_time())
    }

    pub fn get_exchange_info(&self) -> Result<ExchangeInfo> {
        self.runtime.block_on(self.inner.get_exchange_info())
    }

    pub fn get_all_assets(&self) -> Result<Vec<Asset>> {
        self.runtime.block_on(self.inner.get_all_assets())
    }

    pub fn get_order_book(&self, symbol: &str, limit: Option<u32>) -> Result<OrderBook> {
        self.runtime.block_on(self.inner.get_order_book(symbol, limit))
    }

    pub fn get_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<Trade>> {
        self.runtime.block_on(self.inner.get_trades(symbol, limit))
    }

    pub fn get_agg_trades(
        &self,
        symbol: &str,
        from_id: Option<i64>,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<AggTrade>> {
        self.runtime.block_on(
            self.inner
                .get_agg_trades(symbol, from_id, start_time, end_time, limit),
        )
    }

    pub fn get_candlestick_bars(
        &self,
        symbol: &str,
        interval: CandlestickInterval,
        limit: Option<u32>,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Vec<Candlestick>> {
        self.runtime.block_on(
            self.inner
                .get_candlestick_bars(symbol, interval, limit, start_time, end_time),
        )
    }

    pub fn get_24hr_price_statistics(&self, symbol: &str) -> Result<TickerStatistics> {
        self.runtime
            .block_on(self.inner.get_24hr_price_statistics(symbol))
    }

    pub fn get_price(&self, symbol: &str) -> Result<TickerPrice> {
        self.runtime.block_on(self.inner.get_price(symbol))
    }

    pub fn get_all_prices(&self) -> Result<Vec<TickerPrice>> {
        self.runtime.block_on(self.inner.get_all_prices())
    }

    pub fn get_book_tickers(&self) -> Result<Vec<BookTicker>> {
        self.runtime.block_on(self.inner.get_book_tickers())
    }

    pub fn new_order(&self, order: NewOrder) -> Result<NewOrderResponse> {
        self.runtime.block_on(self.inner.new_order(order))
    }

    pub fn new_order_test(&self, order: NewOrder) -> Result<()> {
        self.runtime.block_on(self.inner.new_order_test(order))
    }

    pub fn get_order_status(&self, request: OrderStatusRequest) -> Result<Order> {
        self.runtime.block_on(self.inner.get_order_status(request))
    }

    pub fn cancel_order(&self, request: CancelOrderRequest) -> Result<CancelOrderResponse> {
        self.runtime.block_on(self.inner.cancel_order(request))
    }

    pub fn get_open_orders(&self, symbol: Option<&str>) -> Result<Vec<Order>> {
        self.runtime.block_on(self.inner.get_open_orders(symbol))
    }

    pub fn get_all_orders(&self, request: AllOrdersRequest) -> Result<Vec<Order>> {
        self.runtime.block_on(self.inner.get_all_orders(request))
    }

    pub fn get_account(&self) -> Result<Account> {
        self.runtime.block_on(self.inner.get_account())
    }

    pub fn get_my_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<MyTrade>> {
        self.runtime.block_on(self.inner.get_my_trades(symbol, limit))
    }

    pub fn start_user_data_stream(&self) -> Result<String> {
        self.runtime.block_on(self.inner.start_user_data_stream())
    }

    pub fn keep_alive_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.keep_alive_user_data_stream(listen_key))
    }

    pub fn close_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.close_user_data_stream(listen_key))
    }
}

/// Synchronous cross-margin REST client
#[derive(Debug)]
pub struct BinanceApiMarginRestClient {
    inner: BinanceApiAsyncMarginRestClient,
    runtime: BlockingRuntime,
}

impl BinanceApiMarginRestClient {
    pub fn new(config: Arc<ApiConfig>) -> Self {
        Self::from_async(BinanceApiAsyncMarginRestClient::new(config))
    }

    pub fn with_client_config(config: Arc<ApiConfig>, client_config: &ClientConfig) -> Self {
        Self::from_async(BinanceApiAsyncMarginRestClient::with_client_config(
            config,
            client_config,
        ))
    }

    pub fn from_async(inner: BinanceApiAsyncMarginRestClient) -> Self {
        Self {
            inner,
            runtime: BlockingRuntime::default(),
        }
    }

    pub fn config(&self) -> &Arc<ApiConfig> {
        self.inner.config()
    }

    pub fn get_account(&self) -> Result<MarginAccount> {
        self.runtime.block_on(self.inner.get_account())
    }

    pub fn get_open_orders(&self, symbol: Option<&str>) -> Result<Vec<Order>> {
        self.runtime.block_on(self.inner.get_open_orders(symbol))
    }

    pub fn new_order(&self, order: MarginNewOrder) -> Result<NewOrderResponse> {
        self.runtime.block_on(self.inner.new_order(order))
    }

    pub fn cancel_order(&self, request: CancelOrderRequest) -> Result<CancelOrderResponse> {
        self.runtime.block_on(self.inner.cancel_order(request))
    }

    pub fn get_order_status(&self, request: OrderStatusRequest) -> Result<Order> {
        self.runtime.block_on(self.inner.get_order_status(request))
    }

    pub fn get_my_trades(&self, symbol: &str) -> Result<Vec<MyTrade>> {
        self.runtime.block_on(self.inner.get_my_trades(symbol))
    }

    pub fn transfer(
        &self,
        asset: &str,
        amount: Decimal,
        transfer_type: TransferType,
    ) -> Result<MarginTransaction> {
        self.runtime
            .block_on(self.inner.transfer(asset, amount, transfer_type))
    }

    pub fn borrow(&self, asset: &str, amount: Decimal) -> Result<MarginTransaction> {
        self.runtime.block_on(self.inner.borrow(asset, amount))
    }

    pub fn repay(&self, asset: &str, amount: Decimal) -> Result<MarginTransaction> {
        self.runtime.block_on(self.inner.repay(asset, amount))
    }

    pub fn start_user_data_stream(&self) -> Result<String> {
        self.runtime.block_on(self.inner.start_user_data_stream())
    }

    pub fn keep_alive_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.keep_alive_user_data_stream(listen_key))
    }

    pub fn close_user_data_stream(&self, listen_key: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.close_user_data_stream(listen_key))
    }
}
