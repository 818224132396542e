/*
[INPUT]:  Pool ids, assets and quantities
[OUTPUT]: Liquidity pool data, quotes and swap records
[POS]:    HTTP layer - synchronous liquidity-swap REST client (/sapi/v1/bswap)
[UPDATE]: When adding bswap endpoints or changing parameters
*/

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::{ApiConfig, ClientConfig};
use crate::http::blocking::BlockingRuntime;
use crate::http::client::{RestCore, Security};
use crate::http::{QueryParams, Result};
use crate::types::{
    Liquidity, LiquidityOperationRecord, LiquidityOperationType, Pool, SwapQuote, SwapRecord,
    SwapResponse,
};

/// Synchronous client for the liquidity-swap endpoints
#[derive(Debug)]
pub struct BinanceApiSwapRestClient {
    core: RestCore,
    runtime: BlockingRuntime,
}

impl BinanceApiSwapRestClient {
    pub fn new(config: Arc<ApiConfig>) -> Self {
        Self::with_client_config(config, &ClientConfig::default())
    }

    pub fn with_client_config(config: Arc<ApiConfig>, client_config: &ClientConfig) -> Self {
        Self {
            core: RestCore::new(config, client_config),
            runtime: BlockingRuntime::default(),
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
            runtime: BlockingRuntime::default(),
        }
    }

    pub fn config(&self) -> &Arc<ApiConfig> {
        self.core.config()
    }

    /// GET /sapi/v1/bswap/pools
    pub fn list_all_swap_pools(&self) -> Result<Vec<Pool>> {
        self.runtime.block_on(self.core.get(
            "/sapi/v1/bswap/pools",
            QueryParams::new(),
            Security::ApiKey,
        ))
    }

    /// GET /sapi/v1/bswap/liquidity?poolId={pool_id}
    pub fn get_pool_liquidity_info(&self, pool_id: i64) -> Result<Vec<Liquidity>> {
        let params = QueryParams::new().with("poolId", pool_id);
        self.runtime
            .block_on(self.core.get("/sapi/v1/bswap/liquidity", params, Security::Signed))
    }

    /// POST /sapi/v1/bswap/liquidityAdd
    pub fn add_liquidity(
        &self,
        pool_id: i64,
        asset: &str,
        quantity: Decimal,
    ) -> Result<LiquidityOperationRecord> {
        let params = QueryParams::new()
            .with("poolId", pool_id)
            .with("asset", asset)
            .with_decimal("quantity", quantity);
        self.runtime.block_on(self.core.post(
            "/sapi/v1/bswap/liquidityAdd",
            params,
            Security::Signed,
        ))
    }

    /// Remove liquidity as one asset (`Single`) or proportionally (`Combination`)
    ///
    /// POST /sapi/v1/bswap/liquidityRemove
    pub fn remove_liquidity(
        &self,
        pool_id: i64,
        operation_type: LiquidityOperationType,
        assets: &[&str],
        share_amount: Decimal,
    ) -> Result<LiquidityOperationRecord> {
        let params = QueryParams::new()
            .with("poolId", pool_id)
            .with("type", operation_type)
            .with("asset", assets.join(","))
            .with_decimal("shareAmount", share_amount);
        self.runtime.block_on(self.core.post(
            "/sapi/v1/bswap/liquidityRemove",
            params,
            Security::Signed,
        ))
    }

    /// GET /sapi/v1/bswap/quote
    pub fn get_swap_quote(
        &self,
        quote_asset: &str,
        base_asset: &str,
        quote_qty: Decimal,
    ) -> Result<SwapQuote> {
        let params = swap_params(quote_asset, base_asset, quote_qty);
        self.runtime
            .block_on(self.core.get("/sapi/v1/bswap/quote", params, Security::Signed))
    }

    /// POST /sapi/v1/bswap/swap
    pub fn swap(
        &self,
        quote_asset: &str,
        base_asset: &str,
        quote_qty: Decimal,
    ) -> Result<SwapResponse> {
        let params = swap_params(quote_asset, base_asset, quote_qty);
        self.runtime
            .block_on(self.core.post("/sapi/v1/bswap/swap", params, Security::Signed))
    }

    /// GET /sapi/v1/bswap/swap?swapId={swap_id}
    pub fn get_swap_history(&self, swap_id: i64) -> Result<Vec<SwapRecord>> {
        let params = QueryParams::new().with("swapId", swap_id);
        self.runtime
            .block_on(self.core.get("/sapi/v1/bswap/swap", params, Security::Signed))
    }
}

fn swap_params(quote_asset: &str, base_asset: &str, quote_qty: Decimal) -> QueryParams {
    QueryParams::new()
        .with("quoteAsset", quote_asset)
        .with("baseAsset", base_asset)
        .with_decimal("quoteQty", quote_qty)
}
