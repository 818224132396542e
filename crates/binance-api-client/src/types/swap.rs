/*
[INPUT]:  Liquidity-pool swap API schema definitions
[OUTPUT]: Pool, liquidity, quote and swap record models
[POS]:    Data layer - bswap endpoints
[UPDATE]: When swap API schema changes
*/

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub pool_id: i64,
    pub pool_name: String,
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolShare {
    pub share_amount: Decimal,
    pub share_percentage: Decimal,
    #[serde(default)]
    pub asset: HashMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liquidity {
    pub pool_id: i64,
    // the exchange has shipped this key misspelled
    #[serde(default, alias = "poolNmae")]
    pub pool_name: String,
    pub update_time: i64,
    #[serde(default)]
    pub liquidity: HashMap<String, Decimal>,
    pub share: PoolShare,
}

/// Returned by liquidity add/remove
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityOperationRecord {
    pub operation_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub quote_asset: String,
    pub base_asset: String,
    pub quote_qty: Decimal,
    pub base_qty: Decimal,
    pub price: Decimal,
    pub slippage: Decimal,
    pub fee: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub swap_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStatus {
    Pending,
    Success,
    Failed,
    Unknown(u8),
}

impl From<u8> for SwapStatus {
    fn from(code: u8) -> Self {
        match code {
            0 => SwapStatus::Pending,
            1 => SwapStatus::Success,
            2 => SwapStatus::Failed,
            other => SwapStatus::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    pub swap_id: i64,
    pub swap_time: i64,
    pub status: u8,
    pub quote_asset: String,
    pub base_asset: String,
    pub quote_qty: Decimal,
    pub base_qty: Decimal,
    pub price: Decimal,
    pub fee: Decimal,
}

impl SwapRecord {
    pub fn swap_status(&self) -> SwapStatus {
        SwapStatus::from(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquidity_accepts_misspelled_pool_name() {
        let raw = r#"{
            "poolId": 2,
            "poolNmae": "BUSD/USDT",
            "updateTime": 1565769342148,
            "liquidity": {"BUSD": "100000315.79", "USDT": "99999245.54"},
            "share": {
                "shareAmount": "12415",
                "sharePercentage": "0.00006207",
                "asset": {"BUSD": "6207.02", "USDT": "6206.95"}
            }
        }"#;
        let liquidity: Liquidity = serde_json::from_str(raw).unwrap();
        assert_eq!(liquidity.pool_name, "BUSD/USDT");
        assert_eq!(liquidity.share.asset.len(), 2);
    }

    #[test]
    fn test_swap_status_codes() {
        assert_eq!(SwapStatus::from(0), SwapStatus::Pending);
        assert_eq!(SwapStatus::from(1), SwapStatus::Success);
        assert_eq!(SwapStatus::from(2), SwapStatus::Failed);
        assert_eq!(SwapStatus::from(9), SwapStatus::Unknown(9));
    }
}
