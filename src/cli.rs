//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};

use crate::sort::{CurrencySortBy, SortOrder};

/// FlatQube DEX statistics client.
#[derive(Parser, Debug)]
#[command(name = "flatqube", version)]
pub struct Cli {
    /// Log level filter (e.g. warn, info, flatqube=debug)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Currency statistics and the currency address book
    #[command(subcommand)]
    Currency(CurrencyCommand),

    /// Trading-pair statistics
    #[command(subcommand)]
    Pair(PairCommand),

    /// Farming-pool statistics
    #[command(subcommand)]
    Pool(PoolCommand),
}

#[derive(Subcommand, Debug)]
pub enum CurrencyCommand {
    /// Show currency statistics
    Show(CurrencyShowArgs),

    /// Currency config tools
    #[command(subcommand)]
    Config(CurrencyConfigCommand),
}

/// Arguments for `currency show`.
#[derive(Args, Debug)]
pub struct CurrencyShowArgs {
    /// Currency tickers to show; defaults to the configured default list
    pub names: Vec<String>,

    /// Show tickers from the given configured list (not allowed with NAMES)
    #[arg(short = 'l', long = "list")]
    pub list: Option<String>,

    /// Sort displayed currencies
    #[arg(short, long)]
    pub sort: Option<CurrencySortBy>,

    /// Sort order
    #[arg(short = 'o', long)]
    pub sort_order: Option<SortOrder>,

    /// Show the 24h transaction count column
    #[arg(short = 't', long)]
    pub show_trans_count: bool,

    /// Show the 24h fee column
    #[arg(short = 'f', long)]
    pub show_fee: bool,

    /// Auto update the table
    #[arg(short, long)]
    pub update: bool,

    /// Auto update interval in seconds
    #[arg(short = 'i', long)]
    pub update_interval: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum CurrencyConfigCommand {
    /// Show configured currencies, optionally narrowed to one list
    Show {
        /// Show tickers from the given list
        #[arg(short = 'l', long = "list")]
        list: Option<String>,
    },

    /// Show all currency list names
    Lists,

    /// Fetch a currency by token root address and add it to the user config
    Add {
        /// Token root address
        address: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PairCommand {
    /// Show statistics for one trading pair
    Show(PairShowArgs),
}

/// Arguments for `pair show`: either a pool address or both sides.
#[derive(Args, Debug)]
pub struct PairShowArgs {
    /// Pool contract address
    #[arg(long, conflicts_with_all = ["left", "right"])]
    pub address: Option<String>,

    /// Left-side ticker or token root address
    #[arg(long, requires = "right")]
    pub left: Option<String>,

    /// Right-side ticker or token root address
    #[arg(long, requires = "left")]
    pub right: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PoolCommand {
    /// Show one farming pool
    Show(PoolShowArgs),
}

/// Arguments for `pool show`.
#[derive(Args, Debug)]
pub struct PoolShowArgs {
    /// Farming pool contract address
    pub address: String,

    /// User address for position details
    #[arg(long)]
    pub user: Option<String>,

    /// Include reward history from before the last zero-balance point
    #[arg(long)]
    pub with_zero_balance: bool,
}
