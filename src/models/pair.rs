//! Trading-pair statistics models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Identity block of a pair: the two sides and the pool contract.
#[derive(Debug, Clone, Deserialize)]
pub struct PairMetaInfo {
    #[serde(rename = "base")]
    pub left_name: String,
    #[serde(rename = "baseAddress")]
    pub left_address: String,
    #[serde(rename = "counter")]
    pub right_name: String,
    #[serde(rename = "counterAddress")]
    pub right_address: String,
    #[serde(rename = "poolAddress")]
    pub pool_address: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub fee: Decimal,
}

/// A trading-pair snapshot from the swap indexer.
#[derive(Debug, Clone, Deserialize)]
pub struct PairInfo {
    #[serde(rename = "fee24h", with = "rust_decimal::serde::str")]
    pub fee_24h: Decimal,
    #[serde(rename = "fee7d", with = "rust_decimal::serde::str")]
    pub fee_7d: Decimal,
    #[serde(rename = "feeAllTime", with = "rust_decimal::serde::str")]
    pub fee_all_time: Decimal,
    #[serde(rename = "leftLocked", with = "rust_decimal::serde::str")]
    pub left_locked: Decimal,
    #[serde(rename = "rightLocked", with = "rust_decimal::serde::str")]
    pub right_locked: Decimal,
    #[serde(rename = "leftPrice", with = "rust_decimal::serde::str")]
    pub left_price: Decimal,
    #[serde(rename = "rightPrice", with = "rust_decimal::serde::str")]
    pub right_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tvl: Decimal,
    #[serde(rename = "tvlChange", with = "rust_decimal::serde::str")]
    pub tvl_change: Decimal,
    #[serde(rename = "volume24h", with = "rust_decimal::serde::str")]
    pub volume_24h: Decimal,
    #[serde(rename = "volumeChange24h", with = "rust_decimal::serde::str")]
    pub volume_change_24h: Decimal,
    #[serde(rename = "volume7d", with = "rust_decimal::serde::str")]
    pub volume_7d: Decimal,
    pub meta: PairMetaInfo,
}

impl PairInfo {
    /// Display name in `LEFT/RIGHT` form.
    pub fn name(&self) -> String {
        format!("{}/{}", self.meta.left_name, self.meta.right_name)
    }

    /// The pool contract address identifies the pair.
    pub fn address(&self) -> &str {
        &self.meta.pool_address
    }
}

/// One page of the bulk `pairs` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PairsResponse {
    pub pairs: Vec<PairInfo>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
