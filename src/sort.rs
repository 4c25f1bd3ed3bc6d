//! Sort specifications for fetched records.
//!
//! Each entity kind gets its own closed enum of sortable fields; every
//! variant names the key it compares on. Both enums share one generic
//! stable-sort helper, so tie-breaking is always the caller's original
//! order. The `None` variant passes records through untouched.

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::currency::CurrencyInfo;
use crate::models::pair::PairInfo;

/// Sort direction, named as the indexer API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[value(name = "ascend")]
    Ascend,
    #[value(name = "descend")]
    Descend,
}

/// Stable sort of `items` by an extracted key.
///
/// Descending order reverses the comparator, not the slice, so records with
/// equal keys keep their original relative order in both directions.
pub fn sort_by_key_stable<T, K, F>(items: &mut [T], order: SortOrder, key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    match order {
        SortOrder::Ascend => items.sort_by(|a, b| key(a).cmp(&key(b))),
        SortOrder::Descend => items.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

/// Sortable fields of a [`CurrencyInfo`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum CurrencySortBy {
    #[value(name = "price")]
    #[serde(rename = "price")]
    Price,
    #[value(name = "price-ch")]
    #[serde(rename = "price-ch")]
    PriceChange,
    #[value(name = "tvl")]
    #[serde(rename = "tvl")]
    Tvl,
    #[value(name = "tvl-ch")]
    #[serde(rename = "tvl-ch")]
    TvlChange,
    #[value(name = "vol24h")]
    #[serde(rename = "vol24h")]
    Volume24h,
    #[value(name = "vol24h-ch")]
    #[serde(rename = "vol24h-ch")]
    Volume24hChange,
    #[value(name = "vol7d")]
    #[serde(rename = "vol7d")]
    Volume7d,
    #[value(name = "trans24h")]
    #[serde(rename = "trans24h")]
    TransactionCount24h,
    #[value(name = "fee24h")]
    #[serde(rename = "fee24h")]
    Fee24h,
    /// Keep the caller's order untouched.
    #[value(name = "none")]
    #[serde(rename = "none")]
    None,
}

impl CurrencySortBy {
    /// The comparison key for one record, `None` for the pass-through sort.
    fn key(&self, currency: &CurrencyInfo) -> Option<Decimal> {
        let key = match self {
            CurrencySortBy::Price => currency.price,
            CurrencySortBy::PriceChange => currency.price_change,
            CurrencySortBy::Tvl => currency.tvl,
            CurrencySortBy::TvlChange => currency.tvl_change,
            CurrencySortBy::Volume24h => currency.volume_24h,
            CurrencySortBy::Volume24hChange => currency.volume_change_24h,
            CurrencySortBy::Volume7d => currency.volume_7d,
            CurrencySortBy::TransactionCount24h => Decimal::from(currency.transaction_count_24h),
            CurrencySortBy::Fee24h => currency.fee_24h,
            CurrencySortBy::None => return None,
        };
        Some(key)
    }

    /// Sorts `currencies` in place.
    pub fn sort(&self, currencies: &mut [CurrencyInfo], order: SortOrder) {
        if *self == CurrencySortBy::None {
            return;
        }
        sort_by_key_stable(currencies, order, |c| self.key(c));
    }

    /// Returns a newly ordered vector, leaving the input untouched.
    pub fn sorted(&self, currencies: &[CurrencyInfo], order: SortOrder) -> Vec<CurrencyInfo> {
        let mut sorted = currencies.to_vec();
        self.sort(&mut sorted, order);
        sorted
    }
}

/// Sortable fields of a [`PairInfo`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum PairSortBy {
    #[value(name = "tvl")]
    #[serde(rename = "tvl")]
    Tvl,
    #[value(name = "tvl-ch")]
    #[serde(rename = "tvl-ch")]
    TvlChange,
    #[value(name = "vol24h")]
    #[serde(rename = "vol24h")]
    Volume24h,
    #[value(name = "vol24h-ch")]
    #[serde(rename = "vol24h-ch")]
    Volume24hChange,
    #[value(name = "vol7d")]
    #[serde(rename = "vol7d")]
    Volume7d,
    #[value(name = "fee24h")]
    #[serde(rename = "fee24h")]
    Fee24h,
    #[value(name = "fee7d")]
    #[serde(rename = "fee7d")]
    Fee7d,
    #[value(name = "left-locked")]
    #[serde(rename = "left-locked")]
    LeftLocked,
    #[value(name = "right-locked")]
    #[serde(rename = "right-locked")]
    RightLocked,
    /// Keep the caller's order untouched.
    #[value(name = "none")]
    #[serde(rename = "none")]
    None,
}

impl PairSortBy {
    fn key(&self, pair: &PairInfo) -> Option<Decimal> {
        let key = match self {
            PairSortBy::Tvl => pair.tvl,
            PairSortBy::TvlChange => pair.tvl_change,
            PairSortBy::Volume24h => pair.volume_24h,
            PairSortBy::Volume24hChange => pair.volume_change_24h,
            PairSortBy::Volume7d => pair.volume_7d,
            PairSortBy::Fee24h => pair.fee_24h,
            PairSortBy::Fee7d => pair.fee_7d,
            PairSortBy::LeftLocked => pair.left_locked,
            PairSortBy::RightLocked => pair.right_locked,
            PairSortBy::None => return None,
        };
        Some(key)
    }

    /// Sorts `pairs` in place.
    pub fn sort(&self, pairs: &mut [PairInfo], order: SortOrder) {
        if *self == PairSortBy::None {
            return;
        }
        sort_by_key_stable(pairs, order, |p| self.key(p));
    }

    /// Returns a newly ordered vector, leaving the input untouched.
    pub fn sorted(&self, pairs: &[PairInfo], order: SortOrder) -> Vec<PairInfo> {
        let mut sorted = pairs.to_vec();
        self.sort(&mut sorted, order);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::models::pair::PairMetaInfo;

    use super::*;

    fn currency(name: &str, tvl: Decimal, tvl_change: Decimal) -> CurrencyInfo {
        CurrencyInfo {
            name: name.to_string(),
            address: format!("0:{name}"),
            price: dec!(1),
            price_change: dec!(0),
            tvl,
            tvl_change,
            volume_24h: dec!(0),
            volume_change_24h: dec!(0),
            volume_7d: dec!(0),
            fee_24h: dec!(0),
            transaction_count_24h: 0,
        }
    }

    fn names(currencies: &[CurrencyInfo]) -> Vec<&str> {
        currencies.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn sorts_ascending_by_tvl() {
        let mut currencies = vec![
            currency("B", dec!(20), dec!(0)),
            currency("A", dec!(10), dec!(0)),
            currency("C", dec!(30), dec!(0)),
        ];
        CurrencySortBy::Tvl.sort(&mut currencies, SortOrder::Ascend);
        assert_eq!(names(&currencies), ["A", "B", "C"]);
    }

    #[test]
    fn descending_is_reverse_of_ascending_without_ties() {
        let currencies = vec![
            currency("B", dec!(20), dec!(0)),
            currency("A", dec!(10), dec!(0)),
            currency("C", dec!(30), dec!(0)),
        ];
        let asc = CurrencySortBy::Tvl.sorted(&currencies, SortOrder::Ascend);
        let mut desc = CurrencySortBy::Tvl.sorted(&currencies, SortOrder::Descend);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
    }

    #[test]
    fn ties_keep_original_order() {
        let mut currencies = vec![
            currency("first", dec!(10), dec!(0)),
            currency("second", dec!(10), dec!(0)),
            currency("small", dec!(5), dec!(0)),
            currency("third", dec!(10), dec!(0)),
        ];
        CurrencySortBy::Tvl.sort(&mut currencies, SortOrder::Ascend);
        assert_eq!(names(&currencies), ["small", "first", "second", "third"]);

        let mut currencies = vec![
            currency("first", dec!(10), dec!(0)),
            currency("second", dec!(10), dec!(0)),
        ];
        CurrencySortBy::Tvl.sort(&mut currencies, SortOrder::Descend);
        assert_eq!(names(&currencies), ["first", "second"]);
    }

    #[test]
    fn none_preserves_call_order() {
        let original = vec![
            currency("B", dec!(20), dec!(0)),
            currency("A", dec!(10), dec!(0)),
        ];
        let sorted = CurrencySortBy::None.sorted(&original, SortOrder::Descend);
        assert_eq!(names(&sorted), names(&original));
    }

    fn pair(left: &str, tvl: Decimal, left_locked: Decimal) -> PairInfo {
        PairInfo {
            fee_24h: dec!(0),
            fee_7d: dec!(0),
            fee_all_time: dec!(0),
            left_locked,
            right_locked: dec!(0),
            left_price: dec!(1),
            right_price: dec!(1),
            tvl,
            tvl_change: dec!(0),
            volume_24h: dec!(0),
            volume_change_24h: dec!(0),
            volume_7d: dec!(0),
            meta: PairMetaInfo {
                left_name: left.to_string(),
                left_address: format!("0:{left}"),
                right_name: "USDT".to_string(),
                right_address: "0:usdt".to_string(),
                pool_address: format!("0:pool-{left}"),
                fee: dec!(0.003),
            },
        }
    }

    fn pair_names(pairs: &[PairInfo]) -> Vec<String> {
        pairs.iter().map(PairInfo::name).collect()
    }

    #[test]
    fn pairs_sort_by_tvl_and_locked_amounts() {
        let mut pairs = vec![
            pair("B", dec!(20), dec!(9)),
            pair("A", dec!(10), dec!(1)),
            pair("C", dec!(30), dec!(5)),
        ];
        PairSortBy::Tvl.sort(&mut pairs, SortOrder::Descend);
        assert_eq!(pair_names(&pairs), ["C/USDT", "B/USDT", "A/USDT"]);

        PairSortBy::LeftLocked.sort(&mut pairs, SortOrder::Ascend);
        assert_eq!(pair_names(&pairs), ["A/USDT", "C/USDT", "B/USDT"]);
    }

    #[test]
    fn pair_none_preserves_call_order() {
        let original = vec![pair("B", dec!(20), dec!(0)), pair("A", dec!(10), dec!(0))];
        let sorted = PairSortBy::None.sorted(&original, SortOrder::Descend);
        assert_eq!(pair_names(&sorted), pair_names(&original));
    }

    #[test]
    fn sorted_leaves_input_untouched() {
        let original = vec![
            currency("B", dec!(20), dec!(0)),
            currency("A", dec!(10), dec!(0)),
        ];
        let _ = CurrencySortBy::Tvl.sorted(&original, SortOrder::Ascend);
        assert_eq!(names(&original), ["B", "A"]);
    }
}
