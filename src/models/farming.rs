//! Yield-farming pool models from the farming indexer.
//!
//! The farming API mixes snake_case and camelCase wire names; renames below
//! follow what the service actually sends.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A reward token paid out by a farming pool.
#[derive(Debug, Clone, Deserialize)]
pub struct RewardTokenInfo {
    #[serde(rename = "reward_root_address")]
    pub currency_address: String,
    #[serde(rename = "reward_currency")]
    pub currency_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub reward_per_second: Decimal,
}

/// Per-round reward entry (camelCase on the wire, unlike the pool itself).
#[derive(Debug, Clone, Deserialize)]
pub struct RoundReward {
    #[serde(rename = "rewardTokenRootAddress")]
    pub currency_address: String,
    #[serde(rename = "rewardTokenCurrency")]
    pub currency_name: String,
    #[serde(rename = "rewardPerSec", with = "rust_decimal::serde::str")]
    pub reward_per_second: Decimal,
}

/// One reward round with its epoch bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundInfo {
    pub start_time: u64,
    /// Open-ended rounds report no end time.
    #[serde(default)]
    pub end_time: Option<u64>,
    pub reward_info: Vec<RoundReward>,
}

/// Vesting parameters and the reward-round schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolInfo {
    pub vesting_period: u64,
    pub vesting_ratio: u64,
    #[serde(rename = "rounds_info")]
    pub round_info: Vec<RoundInfo>,
}

/// Historical deposit amounts for the pool.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryInfo {
    #[serde(with = "rust_decimal::serde::str")]
    pub left_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub right_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub usdt_amount: Decimal,
}

/// A yield-farming pool snapshot, including the caller's share when a user
/// address was supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct FarmingPoolInfo {
    pub pool_address: String,

    #[serde(rename = "left_address")]
    pub left_currency_address: String,
    #[serde(rename = "right_address")]
    pub right_currency_address: String,
    #[serde(rename = "left_currency")]
    pub left_currency_name: String,
    #[serde(rename = "right_currency")]
    pub right_currency_name: String,

    #[serde(with = "rust_decimal::serde::str")]
    pub pool_balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub left_balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub right_balance: Decimal,

    #[serde(with = "rust_decimal::serde::str")]
    pub tvl: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tvl_change: Decimal,

    #[serde(with = "rust_decimal::serde::str")]
    pub apr: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub apr_change: Decimal,

    #[serde(rename = "share", with = "rust_decimal::serde::str")]
    pub user_share: Decimal,
    #[serde(rename = "share_change", with = "rust_decimal::serde::str")]
    pub user_share_change: Decimal,

    #[serde(with = "rust_decimal::serde::str")]
    pub user_token_balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub user_usdt_balance: Decimal,

    #[serde(rename = "token_root_address")]
    pub lp_token_address: String,
    #[serde(rename = "token_root_currency")]
    pub lp_token_name: String,

    pub farm_start_time: u64,
    /// Open-ended farms report no end time.
    #[serde(default)]
    pub farm_end_time: Option<u64>,
    pub is_active: bool,
    pub is_low_balance: bool,

    #[serde(rename = "reward_token_root_info")]
    pub reward_info: Vec<RewardTokenInfo>,
    pub pool_info: PoolInfo,
    pub history_info: HistoryInfo,
}
