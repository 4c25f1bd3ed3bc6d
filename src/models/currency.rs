//! Currency statistics models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One traded asset's snapshot from the swap indexer.
///
/// Percent-change fields are signed; zero, positive, and negative are
/// distinct render states downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyInfo {
    #[serde(rename = "currency")]
    pub name: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(rename = "priceChange", with = "rust_decimal::serde::str")]
    pub price_change: Decimal,
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
    #[serde(rename = "fee24h", with = "rust_decimal::serde::str")]
    pub fee_24h: Decimal,
    #[serde(rename = "transactionsCount24h")]
    pub transaction_count_24h: u64,
}

/// One page of the bulk `currencies` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrenciesResponse {
    pub currencies: Vec<CurrencyInfo>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
