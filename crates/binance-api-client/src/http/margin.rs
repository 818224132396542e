/*
[INPUT]:  Margin order requests, assets and amounts
[OUTPUT]: Cross-margin account data, orders and transaction ids
[POS]:    HTTP layer - asynchronous margin REST client (/sapi/v1/margin)
[UPDATE]: When adding margin endpoints or changing parameters
*/

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::{ApiConfig, ClientConfig};
use crate::http::client::{RestCore, Security};
use crate::http::{QueryParams, Result};
use crate::types::{
    CancelOrderRequest, CancelOrderResponse, EmptyResponse, ListenKey, MarginAccount,
    MarginNewOrder, MarginTransaction, MyTrade, NewOrderResponse, Order, OrderStatusRequest,
    TransferType,
};

const MARGIN_USER_DATA_STREAM_PATH: &str = "/sapi/v1/userDataStream";

/// Asynchronous cross-margin REST client
#[derive(Debug, Clone)]
pub struct BinanceApiAsyncMarginRestClient {
    core: RestCore,
}

impl BinanceApiAsyncMarginRestClient {
    pub fn new(config: Arc<ApiConfig>) -> Self {
        Self::with_client_config(config, &ClientConfig::default())
    }

    pub fn with_client_config(config: Arc<ApiConfig>, client_config: &ClientConfig) -> Self {
        Self {
            core: RestCore::new(config, client_config),
        }
    }

    pub fn with_base_url(
        config: Arc<ApiConfig>,
        client_config: &ClientConfig,
        rest_base_url: &str,
    ) -> Self {
        let asset_info_base_url = config.asset_info_base_url();
        Self {
            core: RestCore::with_base_urls(config, client_config, rest_base_url, asset_info_base_url),
        }
    }

    pub fn config(&self) -> &Arc<ApiConfig> {
        self.core.config()
    }

    /// GET /sapi/v1/margin/account
    pub async fn get_account(&self) -> Result<MarginAccount> {
        self.core
            .get("/sapi/v1/margin/account", QueryParams::new(), Security::Signed)
            .await
    }

    /// GET /sapi/v1/margin/openOrders?symbol={symbol}
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Result<Vec<Order>> {
        let params = QueryParams::new().with_opt("symbol", symbol);
        self.core
            .get("/sapi/v1/margin/openOrders", params, Security::Signed)
            .await
    }

    /// POST /sapi/v1/margin/order
    pub async fn new_order(&self, order: MarginNewOrder) -> Result<NewOrderResponse> {
        self.core
            .post("/sapi/v1/margin/order", order.to_query(), Security::Signed)
            .await
    }

    /// DELETE /sapi/v1/margin/order
    pub async fn cancel_order(&self, request: CancelOrderRequest) -> Result<CancelOrderResponse> {
        self.core
            .delete("/sapi/v1/margin/order", request.to_query(), Security::Signed)
            .await
    }

    /// GET /sapi/v1/margin/order
    pub async fn get_order_status(&self, request: OrderStatusRequest) -> Result<Order> {
        self.core
            .get("/sapi/v1/margin/order", request.to_query(), Security::Signed)
            .await
    }

    /// GET /sapi/v1/margin/myTrades?symbol={symbol}
    pub async fn get_my_trades(&self, symbol: &str) -> Result<Vec<MyTrade>> {
        let params = QueryParams::new().with("symbol", symbol);
        self.core
            .get("/sapi/v1/margin/myTrades", params, Security::Signed)
            .await
    }

    /// Move funds between the spot and cross-margin wallets
    ///
    /// POST /sapi/v1/margin/transfer
    pub async fn transfer(
        &self,
        asset: &str,
        amount: Decimal,
        transfer_type: TransferType,
    ) -> Result<MarginTransaction> {
        let params = QueryParams::new()
            .with("asset", asset)
            .with_decimal("amount", amount)
            .with("type", transfer_type.code());
        self.core
            .post("/sapi/v1/margin/transfer", params, Security::Signed)
            .await
    }

    /// POST /sapi/v1/margin/loan
    pub async fn borrow(&self, asset: &str, amount: Decimal) -> Result<MarginTransaction> {
        self.core
            .post("/sapi/v1/margin/loan", asset_amount(asset, amount), Security::Signed)
            .await
    }

    /// POST /sapi/v1/margin/repay
    pub async fn repay(&self, asset: &str, amount: Decimal) -> Result<MarginTransaction> {
        self.core
            .post("/sapi/v1/margin/repay", asset_amount(asset, amount), Security::Signed)
            .await
    }

    // ### Margin user data stream (API key)

    pub async fn start_user_data_stream(&self) -> Result<String> {
        let key: ListenKey = self
            .core
            .post(MARGIN_USER_DATA_STREAM_PATH, QueryParams::new(), Security::ApiKey)
            .await?;
        Ok(key.listen_key)
    }

    pub async fn keep_alive_user_data_stream(&self, listen_key: &str) -> Result<()> {
        let params = QueryParams::new().with("listenKey", listen_key);
        let _: EmptyResponse = self
            .core
            .put(MARGIN_USER_DATA_STREAM_PATH, params, Security::ApiKey)
            .await?;
        Ok(())
    }

    pub async fn close_user_data_stream(&self, listen_key: &str) -> Result<()> {
        let params = QueryParams::new().with("listenKey", listen_key);
        let _: EmptyResponse = self
            .core
            .delete(MARGIN_USER_DATA_STREAM_PATH, params, Security::ApiKey)
            .await?;
        Ok(())
    }
}

fn asset_amount(asset: &str, amount: Decimal) -> QueryParams {
    QueryParams::new()
        .with("asset", asset)
        .with_decimal("amount", amount)
}
