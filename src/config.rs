//! Application configuration.
//!
//! Configuration is layered: the defaults baked into the binary
//! (`config/default.toml`) are merged with an optional user file, table by
//! table, with the user file winning. The user file location is
//! `$FLATQUBE_CONFIG` when set, otherwise
//! `$XDG_CONFIG_HOME/flatqube/config.toml`, otherwise
//! `$HOME/.config/flatqube/config.toml`.
//!
//! There is no ambient global: [`AppConfig`] is built once at process entry
//! and passed by reference into the client and the renderer.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{FlatQubeError, Result};
use crate::quantize::QuantizePolicy;
use crate::sort::{CurrencySortBy, SortOrder};

/// Defaults compiled into the binary.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Environment variable overriding the user config file path.
const USER_CONFIG_ENV: &str = "FLATQUBE_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_urls: ApiUrls,
    pub api_bulk_limit: u64,
    pub quantize: QuantizeConfig,
    pub console: ConsoleConfig,
    /// Address book: upper-case ticker to on-chain token root address.
    #[serde(default)]
    pub currencies: BTreeMap<String, String>,
    /// Named lists of tickers, including the `_default` list.
    #[serde(default)]
    pub currency_lists: BTreeMap<String, Vec<String>>,
    pub cli: CliConfig,
}

/// Base URLs of the two indexer services.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUrls {
    pub swap_indexer: String,
    pub farming_indexer: String,
}

/// Display rounding rules, see [`QuantizePolicy`].
#[derive(Debug, Clone, Deserialize)]
pub struct QuantizeConfig {
    #[serde(deserialize_with = "digit_map")]
    pub value_decimal_digits: BTreeMap<u32, u32>,
    pub value_change_decimal_digits: u32,
    pub value_change_normalize: bool,
}

/// Console presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    pub styles: ConsoleStyles,
    pub table: TableConfig,
}

/// Style identifiers (color name plus optional `bold`) per render role.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleStyles {
    pub name: String,
    pub value: String,
    pub value_change_zero: String,
    pub value_change_plus: String,
    pub value_change_minus: String,
    pub table: String,
    pub address: String,
    pub error: String,
}

/// Table glyphs: column border and sort-direction indicators.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub border: String,
    pub sort_ascend: String,
    pub sort_descend: String,
}

/// CLI defaults supplied by configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    pub currency_show: CurrencyShowConfig,
}

/// Defaults for `currency show`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyShowConfig {
    pub sort: CurrencySortBy,
    pub sort_order: SortOrder,
    pub default_list: String,
    pub update_interval: f64,
}

/// TOML maps only have string keys; parse them into digit counts.
fn digit_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<u32, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, digits)| {
            key.parse::<u32>()
                .map(|count| (count, digits))
                .map_err(|_| serde::de::Error::custom(format!("invalid digit-count key '{key}'")))
        })
        .collect()
}

impl AppConfig {
    /// Loads the layered configuration from the default user config path.
    pub fn load() -> Result<Self> {
        Self::load_from(user_config_path().as_deref())
    }

    /// Loads the configuration, merging `user_path` over the defaults when
    /// the file exists.
    pub fn load_from(user_path: Option<&Path>) -> Result<Self> {
        let mut table: toml::Table = DEFAULT_CONFIG
            .parse()
            .map_err(|err| FlatQubeError::Config(format!("invalid default config: {err}")))?;

        if let Some(path) = user_path
            && path.is_file()
        {
            let text = std::fs::read_to_string(path).map_err(|err| {
                FlatQubeError::Config(format!("cannot read '{}': {err}", path.display()))
            })?;
            let user: toml::Table = text.parse().map_err(|err| {
                FlatQubeError::Config(format!("cannot parse '{}': {err}", path.display()))
            })?;
            debug!(path = %path.display(), "merging user config");
            merge_tables(&mut table, user);
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|err| FlatQubeError::Config(err.to_string()))
    }

    /// Resolves a currency ticker to its configured address.
    /// Fails with [`FlatQubeError::UnknownCurrency`] before any network call.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        let upper = name.to_uppercase();
        self.currencies
            .get(&upper)
            .map(String::as_str)
            .ok_or(FlatQubeError::UnknownCurrency(upper))
    }

    /// Resolves every name, failing on the first unknown ticker.
    pub fn resolve_names(&self, names: &[String]) -> Result<Vec<String>> {
        names
            .iter()
            .map(|name| self.resolve(name).map(str::to_string))
            .collect()
    }

    /// Returns the tickers of a configured currency list.
    pub fn currency_list(&self, list: &str) -> Result<&[String]> {
        self.currency_lists
            .get(list)
            .map(Vec::as_slice)
            .ok_or_else(|| FlatQubeError::UnknownList(list.to_string()))
    }

    /// Builds the quantization policy from the config tables.
    pub fn quantize_policy(&self) -> QuantizePolicy {
        QuantizePolicy::new(
            self.quantize.value_decimal_digits.clone(),
            self.quantize.value_change_decimal_digits,
            self.quantize.value_change_normalize,
        )
    }
}

/// Recursive table merge, `overlay` wins; nested tables merge key by key.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_sub)), toml::Value::Table(overlay_sub)) => {
                merge_tables(base_sub, overlay_sub);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// The user config file location, if any base directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    if let Some(path) = non_empty_var(USER_CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let config_dir = non_empty_var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_var("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(config_dir.join("flatqube").join("config.toml"))
}

/// Adds a currency to the user config at the default location.
pub fn add_currency(name: &str, address: &str) -> Result<PathBuf> {
    let path = user_config_path().ok_or_else(|| {
        FlatQubeError::Config("cannot determine the user config directory".to_string())
    })?;
    add_currency_to(&path, name, address)?;
    Ok(path)
}

/// Adds a currency to the user config file at `path`, creating the file and
/// its parent directories as needed. Existing user settings are kept.
pub fn add_currency_to(path: &Path, name: &str, address: &str) -> Result<()> {
    let mut table: toml::Table = if path.is_file() {
        std::fs::read_to_string(path)
            .map_err(|err| {
                FlatQubeError::Config(format!("cannot read '{}': {err}", path.display()))
            })?
            .parse()
            .map_err(|err| {
                FlatQubeError::Config(format!("cannot parse '{}': {err}", path.display()))
            })?
    } else {
        toml::Table::new()
    };

    let currencies = table
        .entry("currencies")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    match currencies {
        toml::Value::Table(currencies) => {
            currencies.insert(
                name.to_uppercase(),
                toml::Value::String(address.to_string()),
            );
        }
        _ => {
            return Err(FlatQubeError::Config(format!(
                "'currencies' in '{}' is not a table",
                path.display()
            )));
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| {
            FlatQubeError::Config(format!("cannot create '{}': {err}", parent.display()))
        })?;
    }
    let text = toml::to_string_pretty(&table)
        .map_err(|err| FlatQubeError::Config(err.to_string()))?;
    std::fs::write(path, text).map_err(|err| {
        FlatQubeError::Config(format!("cannot write '{}': {err}", path.display()))
    })?;

    Ok(())
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = AppConfig::load_from(None).unwrap();
        assert_eq!(config.api_bulk_limit, 50);
        assert_eq!(config.quantize.value_decimal_digits.get(&1), Some(&4));
        assert_eq!(config.cli.currency_show.sort, CurrencySortBy::Tvl);
        assert_eq!(config.cli.currency_show.sort_order, SortOrder::Ascend);
        assert!(config.currency_lists.contains_key("_default"));
    }

    #[test]
    fn default_lists_only_reference_known_currencies() {
        let config = AppConfig::load_from(None).unwrap();
        for (list, names) in &config.currency_lists {
            for name in names {
                assert!(
                    config.currencies.contains_key(name),
                    "list '{list}' references unknown currency '{name}'"
                );
            }
        }
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let config = AppConfig::load_from(None).unwrap();
        assert_eq!(config.resolve("wever").unwrap(), config.resolve("WEVER").unwrap());
    }

    #[test]
    fn unknown_currency_fails() {
        let config = AppConfig::load_from(None).unwrap();
        let err = config.resolve("NOPE").unwrap_err();
        assert!(matches!(err, FlatQubeError::UnknownCurrency(name) if name == "NOPE"));
    }

    #[test]
    fn unknown_list_fails() {
        let config = AppConfig::load_from(None).unwrap();
        let err = config.currency_list("missing").unwrap_err();
        assert!(matches!(err, FlatQubeError::UnknownList(name) if name == "missing"));
    }

    #[test]
    fn user_file_overrides_and_extends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_bulk_limit = 10

[currencies]
FOO = "0:feed"

[console.table]
border = "|"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.api_bulk_limit, 10);
        assert_eq!(config.resolve("foo").unwrap(), "0:feed");
        // Untouched defaults survive a partial override.
        assert!(config.resolve("WEVER").is_ok());
        assert_eq!(config.console.table.border, "|");
        assert_eq!(config.console.table.sort_ascend, "▴");
    }

    #[test]
    fn add_currency_creates_and_updates_user_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        add_currency_to(&path, "foo", "0:feed").unwrap();
        add_currency_to(&path, "BAR", "0:beef").unwrap();

        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.resolve("FOO").unwrap(), "0:feed");
        assert_eq!(config.resolve("bar").unwrap(), "0:beef");
    }

    #[test]
    fn missing_user_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such.toml");
        let config = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.api_bulk_limit, 50);
    }

    #[test]
    fn malformed_user_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let err = AppConfig::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, FlatQubeError::Config(_)));
    }
}
