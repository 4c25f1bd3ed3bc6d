//! HTTP client for the FlatQube indexer services.
//!
//! One [`FlatQubeClient`] wraps a reused [`reqwest::Client`] and the two
//! configured base URLs. Every request is a JSON POST; any transport error,
//! non-2xx status, or malformed payload surfaces uniformly as
//! [`FlatQubeError::Client`] or [`FlatQubeError::Parse`], so callers never
//! see transport-layer error types. Nothing is retried or cached.

use std::collections::VecDeque;

use futures_util::Stream;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{FlatQubeError, Result};
use crate::models::currency::{CurrenciesResponse, CurrencyInfo};
use crate::models::farming::FarmingPoolInfo;
use crate::models::pair::{PairInfo, PairsResponse};
use crate::sort::{CurrencySortBy, PairSortBy, SortOrder};

/// Client for the swap and farming indexer APIs.
pub struct FlatQubeClient {
    http: reqwest::Client,
    swap_url: String,
    farming_url: String,
    bulk_limit: u64,
}

/// Optional server-side filters for pair listings.
#[derive(Debug, Clone, Default)]
pub struct PairFilter {
    pub currency_address: Option<String>,
    pub currency_addresses: Option<Vec<String>>,
    pub tvl_amount_ge: Option<Decimal>,
    pub tvl_amount_le: Option<Decimal>,
    pub white_list_uri: Option<String>,
}

impl PairFilter {
    fn apply(&self, body: &mut serde_json::Map<String, Value>) {
        if let Some(address) = &self.currency_address {
            body.insert("currencyAddress".into(), json!(address));
        }
        if let Some(addresses) = &self.currency_addresses {
            body.insert("currencyAddresses".into(), json!(addresses));
        }
        if let Some(ge) = &self.tvl_amount_ge {
            body.insert("tvlAmountGe".into(), json!(ge.to_string()));
        }
        if let Some(le) = &self.tvl_amount_le {
            body.insert("tvlAmountLe".into(), json!(le.to_string()));
        }
        if let Some(uri) = &self.white_list_uri {
            body.insert("whiteListUri".into(), json!(uri));
        }
    }
}

impl FlatQubeClient {
    /// Builds a client from the configured API URLs and page size.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            swap_url: config.api_urls.swap_indexer.trim_end_matches('/').to_string(),
            farming_url: config
                .api_urls
                .farming_indexer
                .trim_end_matches('/')
                .to_string(),
            bulk_limit: config.api_bulk_limit,
        }
    }

    /// Fetches one currency by its token root address.
    pub async fn currency_by_address(&self, address: &str) -> Result<CurrencyInfo> {
        let url = format!("{}/currencies/{address}", self.swap_url);
        let value = self.post(&url, None).await?;
        parse_entity("currency", value)
    }

    /// Fetches the given currencies in one bulk request and returns them
    /// ordered by `sort_by`/`order`. This is the one path that mixes fetch
    /// and sort.
    pub async fn currencies(
        &self,
        addresses: &[String],
        sort_by: CurrencySortBy,
        order: SortOrder,
    ) -> Result<Vec<CurrencyInfo>> {
        let url = format!("{}/currencies", self.swap_url);
        let body = json!({
            "currencyAddresses": addresses,
            "limit": addresses.len(),
            "offset": 0,
        });
        let value = self.post(&url, Some(&body)).await?;
        let response: CurrenciesResponse = parse_entity("currency", value)?;

        let mut currencies = response.currencies;
        sort_by.sort(&mut currencies, order);
        Ok(currencies)
    }

    /// Total number of currencies known to the service, optionally narrowed
    /// to a whitelist.
    pub async fn currencies_total_count(&self, white_list_uri: Option<&str>) -> Result<u64> {
        let page = self.currencies_page(0, 0, white_list_uri).await?;
        Ok(page.total_count)
    }

    /// Enumerates every currency, one page per advancement.
    ///
    /// The stream is finite and memory-bounded: each poll either yields a
    /// buffered record or issues one page request (`api_bulk_limit` records)
    /// at the running offset, stopping once the offset reaches the
    /// service-reported total. Dropping the stream stops issuing requests.
    /// A fresh call restarts from offset 0.
    pub fn all_currencies(
        &self,
        white_list_uri: Option<String>,
    ) -> impl Stream<Item = Result<CurrencyInfo>> + '_ {
        struct State {
            offset: u64,
            total: Option<u64>,
            buffered: VecDeque<CurrencyInfo>,
            white_list_uri: Option<String>,
        }

        let state = State {
            offset: 0,
            total: None,
            buffered: VecDeque::new(),
            white_list_uri,
        };

        futures_util::stream::try_unfold(state, move |mut state| async move {
            loop {
                if let Some(currency) = state.buffered.pop_front() {
                    return Ok(Some((currency, state)));
                }
                if let Some(total) = state.total
                    && state.offset >= total
                {
                    return Ok(None);
                }

                let page = self
                    .currencies_page(state.offset, self.bulk_limit, state.white_list_uri.as_deref())
                    .await?;
                state.total = Some(page.total_count);
                // An empty page short of the total means the set shrank
                // mid-enumeration; stop instead of spinning.
                if page.currencies.is_empty() {
                    return Ok(None);
                }
                state.offset += page.currencies.len() as u64;
                state.buffered.extend(page.currencies);
            }
        })
    }

    async fn currencies_page(
        &self,
        offset: u64,
        limit: u64,
        white_list_uri: Option<&str>,
    ) -> Result<CurrenciesResponse> {
        let url = format!("{}/currencies", self.swap_url);
        let mut body = serde_json::Map::new();
        body.insert("limit".into(), json!(limit));
        body.insert("offset".into(), json!(offset));
        if let Some(uri) = white_list_uri {
            body.insert("whiteListUri".into(), json!(uri));
        }
        let value = self.post(&url, Some(&Value::Object(body))).await?;
        parse_entity("currency", value)
    }

    /// Fetches one pair by its pool contract address.
    pub async fn pair_by_address(&self, pool_address: &str) -> Result<PairInfo> {
        let url = format!("{}/pairs/address/{pool_address}", self.swap_url);
        let value = self.post(&url, None).await?;
        parse_entity("pair", value)
    }

    /// Fetches one pair by the token root addresses of its two sides.
    pub async fn pair_by_tokens(&self, left: &str, right: &str) -> Result<PairInfo> {
        let url = format!("{}/pairs/left/{left}/right/{right}", self.swap_url);
        let value = self.post(&url, None).await?;
        parse_entity("pair", value)
    }

    /// Total number of pairs matching `filter`.
    pub async fn pairs_total_count(&self, filter: &PairFilter) -> Result<u64> {
        let page = self.pairs_page(filter, 0, 0).await?;
        Ok(page.total_count)
    }

    /// Enumerates every pair matching `filter`; same pagination contract as
    /// [`Self::all_currencies`].
    pub fn all_pairs(&self, filter: PairFilter) -> impl Stream<Item = Result<PairInfo>> + '_ {
        struct State {
            offset: u64,
            total: Option<u64>,
            buffered: VecDeque<PairInfo>,
            filter: PairFilter,
        }

        let state = State {
            offset: 0,
            total: None,
            buffered: VecDeque::new(),
            filter,
        };

        futures_util::stream::try_unfold(state, move |mut state| async move {
            loop {
                if let Some(pair) = state.buffered.pop_front() {
                    return Ok(Some((pair, state)));
                }
                if let Some(total) = state.total
                    && state.offset >= total
                {
                    return Ok(None);
                }

                let page = self
                    .pairs_page(&state.filter, state.offset, self.bulk_limit)
                    .await?;
                state.total = Some(page.total_count);
                if page.pairs.is_empty() {
                    return Ok(None);
                }
                state.offset += page.pairs.len() as u64;
                state.buffered.extend(page.pairs);
            }
        })
    }

    async fn pairs_page(
        &self,
        filter: &PairFilter,
        offset: u64,
        limit: u64,
    ) -> Result<PairsResponse> {
        let url = format!("{}/pairs", self.swap_url);
        let mut body = serde_json::Map::new();
        body.insert("limit".into(), json!(limit));
        body.insert("offset".into(), json!(offset));
        filter.apply(&mut body);
        let value = self.post(&url, Some(&Value::Object(body))).await?;
        parse_entity("pair", value)
    }

    /// Fetches a farming pool, optionally with user-specific positions.
    pub async fn farming_pool(
        &self,
        pool_address: &str,
        user_address: Option<&str>,
        after_zero_balance: bool,
    ) -> Result<FarmingPoolInfo> {
        let url = format!("{}/farming_pools/{pool_address}", self.farming_url);
        let mut body = serde_json::Map::new();
        body.insert("afterZeroBalance".into(), json!(after_zero_balance));
        if let Some(user) = user_address {
            body.insert("userAddress".into(), json!(user));
        }
        let value = self.post(&url, Some(&Value::Object(body))).await?;
        parse_entity("farming pool", value)
    }

    async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        debug!(%url, "indexer request");
        let request = self.http.post(url);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Parses a raw payload into a typed entity, keeping the payload in the
/// error for diagnostics.
fn parse_entity<T: DeserializeOwned>(entity: &'static str, value: Value) -> Result<T> {
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(parsed),
        Err(err) => Err(FlatQubeError::Parse {
            entity,
            reason: err.to_string(),
            payload: value.to_string(),
        }),
    }
}
