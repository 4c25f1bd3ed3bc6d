//! Display quantization and humanization of decimal values.
//!
//! [`QuantizePolicy`] decides how many fractional digits to keep for a value
//! based on its magnitude (more integer digits mean fewer fractional digits),
//! and [`humanize`] turns the quantized decimal into a human-readable string
//! with thousands separators.
//!
//! Rounding uses round-half-even (`MidpointNearestEven`) so repeated runs
//! over the same data always produce identical output.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

/// Upper bound on fractional digits, matching `rust_decimal`'s 28-digit scale.
const MAX_FRACTION_DIGITS: u32 = 28;

/// Magnitude-driven display rounding rules.
///
/// `value_digits` maps the integer-digit count of a value to the number of
/// fractional digits to keep. Percent changes use a separate fixed digit
/// count (`change_digits`) with their own normalize flag.
#[derive(Debug, Clone)]
pub struct QuantizePolicy {
    value_digits: BTreeMap<u32, u32>,
    change_digits: u32,
    change_normalize: bool,
}

impl QuantizePolicy {
    pub fn new(value_digits: BTreeMap<u32, u32>, change_digits: u32, change_normalize: bool) -> Self {
        Self {
            value_digits,
            change_digits,
            change_normalize,
        }
    }

    /// Rounds `value` to a display-ready number of fractional digits.
    ///
    /// When `digits` is `None`, the digit count is derived from the policy
    /// map keyed by the integer-digit count of `value`; unmapped counts
    /// resolve to 0. A value whose integral part is zero additionally keeps
    /// one extra digit per leading fractional zero, so very small numbers
    /// retain their significant digits instead of collapsing to `0`.
    ///
    /// The result carries exactly `digits` fractional digits, padding with
    /// zeros when the input is shorter. With `normalize`, insignificant
    /// trailing zeros are stripped again.
    pub fn quantize(&self, value: Decimal, digits: Option<u32>, normalize: bool) -> Decimal {
        let digits = digits.unwrap_or_else(|| self.derive_digits(value));

        let mut quantized =
            value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
        // round_dp only trims scale; pad short fractions up to the resolved
        // digit count so fixed-digit output keeps its trailing zeros.
        quantized.rescale(digits);

        if normalize {
            quantized = quantized.normalize();
        }

        quantized
    }

    /// Quantizes a primary value: policy-derived digits, normalized.
    pub fn quantize_value(&self, value: Decimal) -> Decimal {
        self.quantize(value, None, true)
    }

    /// Quantizes a percent-change value: fixed digit count from the policy.
    pub fn quantize_change(&self, change: Decimal) -> Decimal {
        self.quantize(change, Some(self.change_digits), self.change_normalize)
    }

    fn derive_digits(&self, value: Decimal) -> u32 {
        let num_int_digits = integer_digit_count(value);
        let base = self.value_digits.get(&num_int_digits).copied().unwrap_or(0);

        // A zero integral part means the lookup saw one digit ("0"); keep
        // the base digit count beyond any leading fractional zeros.
        let abs = value.abs();
        if !abs.is_zero() && abs < Decimal::ONE {
            (base + leading_fraction_zeros(abs)).min(MAX_FRACTION_DIGITS)
        } else {
            base
        }
    }
}

/// Number of digits in the truncated integral part; zero counts as one digit.
fn integer_digit_count(value: Decimal) -> u32 {
    let int = value.trunc().abs().normalize();
    int.to_string().len() as u32
}

/// Count of zeros between the decimal point and the first significant digit.
/// `abs` must be non-zero and strictly below one.
fn leading_fraction_zeros(abs: Decimal) -> u32 {
    let mut shifted = abs;
    let mut shifts = 0u32;
    while shifted < Decimal::ONE && shifts < MAX_FRACTION_DIGITS {
        shifted *= Decimal::TEN;
        shifts += 1;
    }
    shifts.saturating_sub(1)
}

/// Renders a decimal with thousands separators on the integer part.
///
/// The fraction is appended verbatim (quantize first), the sign is kept
/// as-is, and exponent notation is never produced.
pub fn humanize(value: &Decimal) -> String {
    let plain = value.to_string();
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(plain.len() + int_part.len() / 3);
    grouped.push_str(sign);
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn policy() -> QuantizePolicy {
        let digits = BTreeMap::from([(1, 4), (2, 2), (3, 2), (4, 1)]);
        QuantizePolicy::new(digits, 2, false)
    }

    #[test]
    fn digits_follow_magnitude() {
        let p = policy();
        assert_eq!(p.quantize(dec!(5.23456), None, false), dec!(5.2346));
        assert_eq!(p.quantize(dec!(42.567), None, false), dec!(42.57));
        assert_eq!(p.quantize(dec!(1234.56), None, false), dec!(1234.6));
        // Unmapped magnitude falls back to zero fractional digits.
        assert_eq!(p.quantize(dec!(123456.78), None, false), dec!(123457));
    }

    #[test]
    fn small_values_keep_significant_digits() {
        let p = policy();
        let q = p.quantize_value(dec!(0.0003123));
        assert!(!q.is_zero());
        assert_eq!(q, dec!(0.0003123));
    }

    #[test]
    fn rounding_is_half_even() {
        let p = policy();
        assert_eq!(p.quantize(dec!(42.125), None, false), dec!(42.12));
        assert_eq!(p.quantize(dec!(42.135), None, false), dec!(42.14));
    }

    #[test]
    fn quantize_value_is_idempotent() {
        let p = policy();
        for value in [dec!(5.23456), dec!(0.0003123), dec!(42.567), dec!(0)] {
            let once = p.quantize_value(value);
            assert_eq!(p.quantize_value(once), once);
        }
    }

    #[test]
    fn normalize_strips_trailing_zeros() {
        let p = policy();
        assert_eq!(p.quantize(dec!(5.2000), None, true).to_string(), "5.2");
        assert_eq!(p.quantize(dec!(5.2000), None, false).to_string(), "5.2000");
    }

    #[test]
    fn change_uses_fixed_digits() {
        let p = policy();
        assert_eq!(p.quantize_change(dec!(1.5)).to_string(), "1.50");
        assert_eq!(p.quantize_change(dec!(-0.125)).to_string(), "-0.12");
        assert_eq!(p.quantize_change(dec!(0)).to_string(), "0.00");
    }

    #[test]
    fn short_fractions_are_padded_to_the_digit_count() {
        let p = policy();
        assert_eq!(p.quantize(dec!(5.2), None, false).to_string(), "5.2000");
        assert_eq!(p.quantize(dec!(42), None, false).to_string(), "42.00");
        assert_eq!(p.quantize(dec!(7), Some(3), false).to_string(), "7.000");
    }

    #[test]
    fn humanize_groups_thousands() {
        assert_eq!(humanize(&dec!(1234567.89)), "1,234,567.89");
        assert_eq!(humanize(&dec!(-1234)), "-1,234");
        assert_eq!(humanize(&dec!(123)), "123");
        assert_eq!(humanize(&dec!(0.0003123)), "0.0003123");
    }
}
