//! Console table rendering.
//!
//! Tables are assembled as plain text first: per-column widths are the
//! maximum humanized-string width over all rows, measured with
//! `unicode-width`, and every cell is styled afterwards, so ANSI escape
//! sequences never affect alignment. Rendering returns `None` for empty
//! input; the caller decides how to surface "nothing to show".

use rust_decimal::Decimal;
use unicode_width::UnicodeWidthStr;

use crossterm::style::{Attribute, Color, Stylize, style};

use crate::config::ConsoleConfig;
use crate::models::currency::CurrencyInfo;
use crate::models::farming::FarmingPoolInfo;
use crate::models::pair::PairInfo;
use crate::quantize::{QuantizePolicy, humanize};
use crate::sort::{CurrencySortBy, PairSortBy, SortOrder};

/// Currency symbol prefixed to USD-denominated values.
const USD_PREFIX: &str = "$";

/// A foreground color plus bold flag, parsed from a config style string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    fg: Option<Color>,
    bold: bool,
}

/// Parses a style string like `"bright_cyan bold"`. Unknown tokens are
/// ignored so a misspelled config value degrades to unstyled text.
fn parse_style(spec: &str) -> Style {
    let mut parsed = Style::default();
    for token in spec.split_whitespace() {
        match token {
            "bold" => parsed.bold = true,
            "black" => parsed.fg = Some(Color::Black),
            "red" => parsed.fg = Some(Color::DarkRed),
            "green" => parsed.fg = Some(Color::DarkGreen),
            "yellow" => parsed.fg = Some(Color::DarkYellow),
            "blue" => parsed.fg = Some(Color::DarkBlue),
            "magenta" => parsed.fg = Some(Color::DarkMagenta),
            "cyan" => parsed.fg = Some(Color::DarkCyan),
            "white" => parsed.fg = Some(Color::Grey),
            "grey" | "gray" | "bright_black" => parsed.fg = Some(Color::DarkGrey),
            "bright_red" => parsed.fg = Some(Color::Red),
            "bright_green" => parsed.fg = Some(Color::Green),
            "bright_yellow" => parsed.fg = Some(Color::Yellow),
            "bright_blue" => parsed.fg = Some(Color::Blue),
            "bright_magenta" => parsed.fg = Some(Color::Magenta),
            "bright_cyan" => parsed.fg = Some(Color::Cyan),
            "bright_white" => parsed.fg = Some(Color::White),
            _ => {}
        }
    }
    parsed
}

/// Resolved presentation settings: parsed styles, table glyphs, and whether
/// to emit ANSI colors at all.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub name: Style,
    pub value: Style,
    pub change_zero: Style,
    pub change_plus: Style,
    pub change_minus: Style,
    pub table: Style,
    pub address: Style,
    pub error: Style,
    pub border: String,
    pub sort_ascend: String,
    pub sort_descend: String,
    pub color: bool,
}

impl RenderStyle {
    pub fn from_config(console: &ConsoleConfig, color: bool) -> Self {
        Self {
            name: parse_style(&console.styles.name),
            value: parse_style(&console.styles.value),
            change_zero: parse_style(&console.styles.value_change_zero),
            change_plus: parse_style(&console.styles.value_change_plus),
            change_minus: parse_style(&console.styles.value_change_minus),
            table: parse_style(&console.styles.table),
            address: parse_style(&console.styles.address),
            error: parse_style(&console.styles.error),
            border: console.table.border.clone(),
            sort_ascend: console.table.sort_ascend.clone(),
            sort_descend: console.table.sort_descend.clone(),
            color,
        }
    }

    /// Applies a style to already-padded text; a no-op without color.
    pub fn paint(&self, text: &str, cell_style: Style) -> String {
        if !self.color {
            return text.to_string();
        }
        let mut styled = style(text);
        if let Some(fg) = cell_style.fg {
            styled = styled.with(fg);
        }
        if cell_style.bold {
            styled = styled.attribute(Attribute::Bold);
        }
        styled.to_string()
    }
}

/// Display toggles for the currency table.
#[derive(Debug, Clone)]
pub struct CurrencyDisplayOptions {
    pub sort: CurrencySortBy,
    pub sort_order: SortOrder,
    pub show_transaction_count: bool,
    pub show_fee: bool,
}

/// Which sub-column of a value/change pair the active sort targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortTarget {
    NotSorted,
    Value,
    Change,
}

/// Three-state sign of a percent change; each maps to a distinct style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeSign {
    Zero,
    Plus,
    Minus,
}

fn change_sign(change: &Decimal) -> ChangeSign {
    if change.is_zero() {
        ChangeSign::Zero
    } else if change.is_sign_negative() {
        ChangeSign::Minus
    } else {
        ChangeSign::Plus
    }
}

/// One styled fragment of a rendered line. Width bookkeeping happens on the
/// plain text; styling is applied at assembly time.
struct Span {
    text: String,
    style: Style,
}

/// A rendered column group: one value cell and optionally one change cell
/// per row, right-justified to the group's computed width.
struct ColumnGroup {
    title: String,
    rows: Vec<Vec<Span>>,
    width: usize,
}

impl ColumnGroup {
    /// Value-and-change group, e.g. `" $1,234.5  +1.50% "`.
    fn with_changes(
        title: String,
        values: Vec<String>,
        changes: Vec<(ChangeSign, String)>,
        style: &RenderStyle,
    ) -> Self {
        let value_width = max_width(values.iter());
        let change_width = max_width(changes.iter().map(|(_, text)| text));
        let body_width = value_width + change_width + 3;
        let width = body_width.max(title.width());
        // Extra left padding when the title is wider than the cells.
        let lead = width - body_width;

        let rows = values
            .into_iter()
            .zip(changes)
            .map(|(value, (sign, change))| {
                let change_style = match sign {
                    ChangeSign::Zero => style.change_zero,
                    ChangeSign::Plus => style.change_plus,
                    ChangeSign::Minus => style.change_minus,
                };
                vec![
                    Span {
                        text: format!("{} {} ", " ".repeat(lead), pad_left(&value, value_width)),
                        style: style.value,
                    },
                    Span {
                        text: format!("{} ", pad_left(&change, change_width)),
                        style: change_style,
                    },
                ]
            })
            .collect();

        Self { title, rows, width }
    }

    /// Value-only group, e.g. `" $567,890 "`.
    fn values_only(title: String, values: Vec<String>, style: &RenderStyle) -> Self {
        let value_width = max_width(values.iter());
        let body_width = value_width + 2;
        let width = body_width.max(title.width());
        let lead = width - body_width;

        let rows = values
            .into_iter()
            .map(|value| {
                vec![Span {
                    text: format!("{} {} ", " ".repeat(lead), pad_left(&value, value_width)),
                    style: style.value,
                }]
            })
            .collect();

        Self { title, rows, width }
    }
}

fn max_width<'a>(texts: impl Iterator<Item = &'a String>) -> usize {
    texts.map(|text| text.width()).max().unwrap_or(0)
}

/// Left-pads `text` to `width` display columns.
fn pad_left(text: &str, width: usize) -> String {
    let deficit = width.saturating_sub(text.width());
    format!("{}{text}", " ".repeat(deficit))
}

fn value_text(policy: &QuantizePolicy, value: Decimal, prefix: &str) -> String {
    format!("{prefix}{}", humanize(&policy.quantize_value(value)))
}

fn change_text(policy: &QuantizePolicy, change: Decimal) -> (ChangeSign, String) {
    let sign = change_sign(&change);
    let glyph = match sign {
        ChangeSign::Zero => " ",
        ChangeSign::Plus => "+",
        ChangeSign::Minus => "",
    };
    (
        sign,
        format!("{glyph}{}%", humanize(&policy.quantize_change(change))),
    )
}

/// Appends the sort-direction glyph to a column title. Change-sorted
/// columns additionally carry `%` so "sorted by value" and "sorted by
/// change" headers are distinguishable.
fn titled(base: &str, target: SortTarget, order: SortOrder, style: &RenderStyle, many: bool) -> String {
    if !many || target == SortTarget::NotSorted {
        return base.to_string();
    }
    let glyph = match order {
        SortOrder::Ascend => &style.sort_ascend,
        SortOrder::Descend => &style.sort_descend,
    };
    match target {
        SortTarget::Change => format!("{base} {glyph}%"),
        _ => format!("{base} {glyph}"),
    }
}

fn sort_target(sort: CurrencySortBy, value: CurrencySortBy, change: Option<CurrencySortBy>) -> SortTarget {
    if sort == value {
        SortTarget::Value
    } else if change == Some(sort) {
        SortTarget::Change
    } else {
        SortTarget::NotSorted
    }
}

/// Renders the currency statistics table, or `None` when there is nothing
/// to show.
pub fn currencies_table(
    currencies: &[CurrencyInfo],
    options: &CurrencyDisplayOptions,
    policy: &QuantizePolicy,
    style: &RenderStyle,
) -> Option<String> {
    if currencies.is_empty() {
        return None;
    }
    let many = currencies.len() > 1;
    let sort = options.sort;
    let order = options.sort_order;

    let names: Vec<String> = currencies.iter().map(|c| c.name.clone()).collect();
    let mut groups = Vec::new();

    groups.push(ColumnGroup::with_changes(
        titled(
            "Price",
            sort_target(sort, CurrencySortBy::Price, Some(CurrencySortBy::PriceChange)),
            order,
            style,
            many,
        ),
        currencies
            .iter()
            .map(|c| value_text(policy, c.price, USD_PREFIX))
            .collect(),
        currencies
            .iter()
            .map(|c| change_text(policy, c.price_change))
            .collect(),
        style,
    ));

    groups.push(ColumnGroup::with_changes(
        titled(
            "TVL",
            sort_target(sort, CurrencySortBy::Tvl, Some(CurrencySortBy::TvlChange)),
            order,
            style,
            many,
        ),
        currencies
            .iter()
            .map(|c| value_text(policy, c.tvl, USD_PREFIX))
            .collect(),
        currencies
            .iter()
            .map(|c| change_text(policy, c.tvl_change))
            .collect(),
        style,
    ));

    groups.push(ColumnGroup::with_changes(
        titled(
            "24h Volume",
            sort_target(
                sort,
                CurrencySortBy::Volume24h,
                Some(CurrencySortBy::Volume24hChange),
            ),
            order,
            style,
            many,
        ),
        currencies
            .iter()
            .map(|c| value_text(policy, c.volume_24h, USD_PREFIX))
            .collect(),
        currencies
            .iter()
            .map(|c| change_text(policy, c.volume_change_24h))
            .collect(),
        style,
    ));

    groups.push(ColumnGroup::values_only(
        titled(
            "7d Volume",
            sort_target(sort, CurrencySortBy::Volume7d, None),
            order,
            style,
            many,
        ),
        currencies
            .iter()
            .map(|c| value_text(policy, c.volume_7d, USD_PREFIX))
            .collect(),
        style,
    ));

    if options.show_transaction_count {
        groups.push(ColumnGroup::values_only(
            titled(
                "24h Tr-s",
                sort_target(sort, CurrencySortBy::TransactionCount24h, None),
                order,
                style,
                many,
            ),
            currencies
                .iter()
                .map(|c| value_text(policy, Decimal::from(c.transaction_count_24h), ""))
                .collect(),
            style,
        ));
    }

    if options.show_fee {
        groups.push(ColumnGroup::values_only(
            titled(
                "24h Fee",
                sort_target(sort, CurrencySortBy::Fee24h, None),
                order,
                style,
                many,
            ),
            currencies
                .iter()
                .map(|c| value_text(policy, c.fee_24h, USD_PREFIX))
                .collect(),
            style,
        ));
    }

    Some(assemble("Name", &names, groups, style))
}

/// Renders the trading-pair statistics table, or `None` when empty.
pub fn pairs_table(
    pairs: &[PairInfo],
    sort: PairSortBy,
    order: SortOrder,
    policy: &QuantizePolicy,
    style: &RenderStyle,
) -> Option<String> {
    if pairs.is_empty() {
        return None;
    }
    let many = pairs.len() > 1;

    let pair_target = |value: PairSortBy, change: Option<PairSortBy>| {
        if sort == value {
            SortTarget::Value
        } else if change == Some(sort) {
            SortTarget::Change
        } else {
            SortTarget::NotSorted
        }
    };

    let names: Vec<String> = pairs.iter().map(PairInfo::name).collect();
    let mut groups = Vec::new();

    groups.push(ColumnGroup::with_changes(
        titled(
            "TVL",
            pair_target(PairSortBy::Tvl, Some(PairSortBy::TvlChange)),
            order,
            style,
            many,
        ),
        pairs
            .iter()
            .map(|p| value_text(policy, p.tvl, USD_PREFIX))
            .collect(),
        pairs
            .iter()
            .map(|p| change_text(policy, p.tvl_change))
            .collect(),
        style,
    ));

    groups.push(ColumnGroup::with_changes(
        titled(
            "24h Volume",
            pair_target(PairSortBy::Volume24h, Some(PairSortBy::Volume24hChange)),
            order,
            style,
            many,
        ),
        pairs
            .iter()
            .map(|p| value_text(policy, p.volume_24h, USD_PREFIX))
            .collect(),
        pairs
            .iter()
            .map(|p| change_text(policy, p.volume_change_24h))
            .collect(),
        style,
    ));

    groups.push(ColumnGroup::values_only(
        titled(
            "7d Volume",
            pair_target(PairSortBy::Volume7d, None),
            order,
            style,
            many,
        ),
        pairs
            .iter()
            .map(|p| value_text(policy, p.volume_7d, USD_PREFIX))
            .collect(),
        style,
    ));

    groups.push(ColumnGroup::values_only(
        titled("24h Fee", pair_target(PairSortBy::Fee24h, None), order, style, many),
        pairs
            .iter()
            .map(|p| value_text(policy, p.fee_24h, USD_PREFIX))
            .collect(),
        style,
    ));

    Some(assemble("Pair", &names, groups, style))
}

/// Joins the name column and the column groups into the final table text.
fn assemble(name_title: &str, names: &[String], groups: Vec<ColumnGroup>, style: &RenderStyle) -> String {
    let name_width = names
        .iter()
        .map(|name| name.width())
        .max()
        .unwrap_or(0)
        .max(name_title.width());

    let mut header = format!(" {} ", pad_left(name_title, name_width));
    for group in &groups {
        header.push_str(&style.border);
        header.push_str(&pad_left(&group.title, group.width));
    }

    let mut output = style.paint(&header, style.table);
    output.push('\n');

    let border = style.paint(&style.border, style.table);
    for (row_index, name) in names.iter().enumerate() {
        let mut line = style.paint(&format!(" {} ", pad_left(name, name_width)), style.name);
        for group in &groups {
            line.push_str(&border);
            for span in &group.rows[row_index] {
                line.push_str(&style.paint(&span.text, span.style));
            }
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Renders the configured address book as a `Name │ Address` table, or
/// `None` when the book is empty.
pub fn address_book_table(
    entries: &[(String, String)],
    style: &RenderStyle,
) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let name_width = entries
        .iter()
        .map(|(name, _)| name.width())
        .max()
        .unwrap_or(0)
        .max("Name".width());

    let mut output = style.paint(
        &format!(" {} {} Address", pad_left("Name", name_width), style.border),
        style.table,
    );
    output.push('\n');

    let border = style.paint(&style.border, style.table);
    for (name, address) in entries {
        output.push_str(&style.paint(&format!(" {} ", pad_left(name, name_width)), style.name));
        output.push_str(&border);
        output.push_str(&style.paint(&format!(" {address}"), style.address));
        output.push('\n');
    }

    Some(output)
}

/// Renders one farming pool as a labeled detail block.
pub fn farming_pool_details(
    pool: &FarmingPoolInfo,
    policy: &QuantizePolicy,
    style: &RenderStyle,
) -> String {
    let mut lines: Vec<(String, String, Style)> = Vec::new();

    let pair = format!("{}/{}", pool.left_currency_name, pool.right_currency_name);
    lines.push(("Pool".into(), pair, style.name));
    lines.push(("Address".into(), pool.pool_address.clone(), style.address));
    lines.push((
        "TVL".into(),
        format!(
            "{} ({})",
            value_text(policy, pool.tvl, USD_PREFIX),
            change_text(policy, pool.tvl_change).1.trim_start()
        ),
        style.value,
    ));
    lines.push((
        "APR".into(),
        format!(
            "{}% ({})",
            humanize(&policy.quantize_value(pool.apr)),
            change_text(policy, pool.apr_change).1.trim_start()
        ),
        style.value,
    ));
    lines.push((
        "Balance".into(),
        format!(
            "{} {} / {} {}",
            humanize(&policy.quantize_value(pool.left_balance)),
            pool.left_currency_name,
            humanize(&policy.quantize_value(pool.right_balance)),
            pool.right_currency_name,
        ),
        style.value,
    ));
    for reward in &pool.reward_info {
        lines.push((
            "Reward".into(),
            format!(
                "{} {}/sec",
                humanize(&policy.quantize_value(reward.reward_per_second)),
                reward.currency_name,
            ),
            style.value,
        ));
    }
    if !pool.user_share.is_zero() {
        lines.push((
            "Share".into(),
            format!(
                "{}% ({})",
                humanize(&policy.quantize_value(pool.user_share)),
                change_text(policy, pool.user_share_change).1.trim_start()
            ),
            style.value,
        ));
        lines.push((
            "User balance".into(),
            format!(
                "{} {} ({})",
                humanize(&policy.quantize_value(pool.user_token_balance)),
                pool.lp_token_name,
                value_text(policy, pool.user_usdt_balance, USD_PREFIX),
            ),
            style.value,
        ));
    }
    lines.push((
        "Farm start".into(),
        format_epoch(pool.farm_start_time),
        style.value,
    ));
    if let Some(end) = pool.farm_end_time {
        lines.push(("Farm end".into(), format_epoch(end), style.value));
    }
    lines.push((
        "Status".into(),
        if pool.is_active {
            "active".to_string()
        } else {
            "inactive".to_string()
        },
        if pool.is_active { style.change_plus } else { style.change_minus },
    ));
    if pool.is_low_balance {
        lines.push(("Warning".into(), "low reward balance".into(), style.error));
    }

    let label_width = lines
        .iter()
        .map(|(label, _, _)| label.width())
        .max()
        .unwrap_or(0);

    let border = style.paint(&style.border, style.table);
    let mut output = String::new();
    for (label, value, value_style) in lines {
        output.push_str(&style.paint(&format!(" {} ", pad_left(&label, label_width)), style.table));
        output.push_str(&border);
        output.push_str(&style.paint(&format!(" {value}"), value_style));
        output.push('\n');
    }
    output
}

/// Unix seconds rendered as a UTC timestamp.
fn format_epoch(seconds: u64) -> String {
    match chrono::DateTime::from_timestamp(seconds as i64, 0) {
        Some(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => seconds.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal_macros::dec;

    use crate::config::AppConfig;
    use crate::models::pair::PairMetaInfo;

    use super::*;

    fn policy() -> QuantizePolicy {
        let digits = BTreeMap::from([(1, 4), (2, 3), (3, 2), (4, 2), (5, 1), (6, 1)]);
        QuantizePolicy::new(digits, 2, false)
    }

    fn plain_style() -> RenderStyle {
        let config = AppConfig::load_from(None).unwrap();
        RenderStyle::from_config(&config.console, false)
    }

    fn currency(name: &str, price: Decimal, price_change: Decimal) -> CurrencyInfo {
        CurrencyInfo {
            name: name.to_string(),
            address: format!("0:{name}"),
            price,
            price_change,
            tvl: dec!(1000000),
            tvl_change: dec!(0),
            volume_24h: dec!(50000),
            volume_change_24h: dec!(-3.21),
            volume_7d: dec!(350000),
            fee_24h: dec!(150),
            transaction_count_24h: 1234,
        }
    }

    fn options(sort: CurrencySortBy, order: SortOrder) -> CurrencyDisplayOptions {
        CurrencyDisplayOptions {
            sort,
            sort_order: order,
            show_transaction_count: false,
            show_fee: false,
        }
    }

    #[test]
    fn empty_input_renders_nothing() {
        let table = currencies_table(
            &[],
            &options(CurrencySortBy::Tvl, SortOrder::Ascend),
            &policy(),
            &plain_style(),
        );
        assert!(table.is_none());
    }

    #[test]
    fn lines_share_one_width() {
        let currencies = vec![
            currency("WEVER", dec!(0.0534), dec!(1.5)),
            currency("QUBE", dec!(1234.5), dec!(0)),
            currency("USDT", dec!(1.0001), dec!(-1.5)),
        ];
        let table = currencies_table(
            &currencies,
            &options(CurrencySortBy::Tvl, SortOrder::Ascend),
            &policy(),
            &plain_style(),
        )
        .unwrap();

        let widths: Vec<usize> = table.lines().map(|line| line.width()).collect();
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{table}");
    }

    #[test]
    fn change_signs_render_three_states() {
        let currencies = vec![
            currency("ZERO", dec!(1), dec!(0)),
            currency("UP", dec!(1), dec!(1.5)),
            currency("DOWN", dec!(1), dec!(-1.5)),
        ];
        let table = currencies_table(
            &currencies,
            &options(CurrencySortBy::None, SortOrder::Ascend),
            &policy(),
            &plain_style(),
        )
        .unwrap();

        assert!(table.contains(" 0.00%"), "{table}");
        assert!(table.contains("+1.50%"), "{table}");
        assert!(table.contains("-1.50%"), "{table}");
    }

    #[test]
    fn sorted_column_carries_indicator() {
        let currencies = vec![
            currency("A", dec!(1), dec!(0)),
            currency("B", dec!(2), dec!(0)),
        ];
        let table = currencies_table(
            &currencies,
            &options(CurrencySortBy::Tvl, SortOrder::Ascend),
            &policy(),
            &plain_style(),
        )
        .unwrap();
        let header = table.lines().next().unwrap();
        assert!(header.contains("TVL ▴"), "{header}");
        assert!(!header.contains("Price ▴"), "{header}");

        let table = currencies_table(
            &currencies,
            &options(CurrencySortBy::PriceChange, SortOrder::Descend),
            &policy(),
            &plain_style(),
        )
        .unwrap();
        let header = table.lines().next().unwrap();
        assert!(header.contains("Price ▾%"), "{header}");
    }

    #[test]
    fn single_row_has_no_indicator() {
        let currencies = vec![currency("A", dec!(1), dec!(0))];
        let table = currencies_table(
            &currencies,
            &options(CurrencySortBy::Tvl, SortOrder::Ascend),
            &policy(),
            &plain_style(),
        )
        .unwrap();
        assert!(!table.contains('▴'));
    }

    #[test]
    fn optional_columns_are_gated() {
        let currencies = vec![currency("A", dec!(1), dec!(0))];
        let base = options(CurrencySortBy::Tvl, SortOrder::Ascend);

        let table = currencies_table(&currencies, &base, &policy(), &plain_style()).unwrap();
        assert!(!table.contains("24h Tr-s"));
        assert!(!table.contains("24h Fee"));

        let mut with_extras = base.clone();
        with_extras.show_transaction_count = true;
        with_extras.show_fee = true;
        let table = currencies_table(&currencies, &with_extras, &policy(), &plain_style()).unwrap();
        assert!(table.contains("24h Tr-s"));
        assert!(table.contains("1,234"));
        assert!(table.contains("24h Fee"));
        assert!(table.contains("$150"));
    }

    #[test]
    fn values_are_right_justified_to_widest() {
        let currencies = vec![
            currency("A", dec!(5.2346), dec!(0)),
            currency("B", dec!(12345.6), dec!(0)),
        ];
        let table = currencies_table(
            &currencies,
            &options(CurrencySortBy::None, SortOrder::Ascend),
            &policy(),
            &plain_style(),
        )
        .unwrap();
        // Widest price is "$12,345.6" (9 columns); the narrower "$5.2346"
        // (7 columns) is padded by two spaces on the left.
        assert!(table.contains("  $5.2346 "), "{table}");
    }

    #[test]
    fn color_wraps_cells_in_escape_sequences() {
        let config = AppConfig::load_from(None).unwrap();
        let colored = RenderStyle::from_config(&config.console, true);
        let currencies = vec![currency("A", dec!(1), dec!(0))];
        let table = currencies_table(
            &currencies,
            &options(CurrencySortBy::Tvl, SortOrder::Ascend),
            &policy(),
            &colored,
        )
        .unwrap();
        assert!(table.contains("\u{1b}["));
    }

    fn pair(left: &str, right: &str, tvl: Decimal) -> PairInfo {
        PairInfo {
            fee_24h: dec!(150),
            fee_7d: dec!(900),
            fee_all_time: dec!(12000),
            left_locked: dec!(1000),
            right_locked: dec!(2000),
            left_price: dec!(2),
            right_price: dec!(0.5),
            tvl,
            tvl_change: dec!(1.5),
            volume_24h: dec!(50000),
            volume_change_24h: dec!(0),
            volume_7d: dec!(350000),
            meta: PairMetaInfo {
                left_name: left.to_string(),
                left_address: format!("0:{left}"),
                right_name: right.to_string(),
                right_address: format!("0:{right}"),
                pool_address: "0:pool".to_string(),
                fee: dec!(0.003),
            },
        }
    }

    #[test]
    fn pairs_table_renders_names_and_sorted_header() {
        let pairs = vec![
            pair("WEVER", "USDT", dec!(10)),
            pair("QUBE", "USDT", dec!(20)),
        ];
        let table = pairs_table(
            &pairs,
            PairSortBy::Tvl,
            SortOrder::Descend,
            &policy(),
            &plain_style(),
        )
        .unwrap();

        let header = table.lines().next().unwrap();
        assert!(header.contains("Pair"), "{header}");
        assert!(header.contains("TVL ▾"), "{header}");
        assert!(table.contains("WEVER/USDT"), "{table}");
        assert!(table.contains("QUBE/USDT"), "{table}");

        let widths: Vec<usize> = table.lines().map(|line| line.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{table}");

        let empty = pairs_table(
            &[],
            PairSortBy::None,
            SortOrder::Ascend,
            &policy(),
            &plain_style(),
        );
        assert!(empty.is_none());
    }

    #[test]
    fn dim_and_bright_white_are_distinct() {
        assert_eq!(parse_style("white").fg, Some(Color::Grey));
        assert_eq!(parse_style("bright_white").fg, Some(Color::White));
        assert!(parse_style("bright_cyan bold").bold);
    }

    #[test]
    fn address_book_lists_all_entries() {
        let entries = vec![
            ("WEVER".to_string(), "0:a49c".to_string()),
            ("QUBE".to_string(), "0:9f20".to_string()),
        ];
        let table = address_book_table(&entries, &plain_style()).unwrap();
        assert!(table.contains("WEVER"));
        assert!(table.contains("0:9f20"));
        assert!(address_book_table(&[], &plain_style()).is_none());
    }
}
