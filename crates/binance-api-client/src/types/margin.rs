/*
[INPUT]:  Margin API schema definitions
[OUTPUT]: Cross-margin account and transaction models
[POS]:    Data layer - margin endpoints
[UPDATE]: When margin API schema changes
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginAssetBalance {
    pub asset: String,
    pub borrowed: Decimal,
    pub free: Decimal,
    pub interest: Decimal,
    pub locked: Decimal,
    pub net_asset: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginAccount {
    pub borrow_enabled: bool,
    pub margin_level: Decimal,
    pub total_asset_of_btc: Decimal,
    pub total_liability_of_btc: Decimal,
    pub total_net_asset_of_btc: Decimal,
    pub trade_enabled: bool,
    pub transfer_enabled: bool,
    pub user_assets: Vec<MarginAssetBalance>,
}

impl MarginAccount {
    pub fn asset_balance(&self, asset: &str) -> Option<&MarginAssetBalance> {
        self.user_assets.iter().find(|balance| balance.asset == asset)
    }
}

/// Result of transfer, borrow and repay calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginTransaction {
    pub tran_id: i64,
}
