use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use tracing_subscriber::EnvFilter;

use flatqube::cli::{
    Cli, Command, CurrencyCommand, CurrencyConfigCommand, CurrencyShowArgs, PairCommand,
    PairShowArgs, PoolCommand, PoolShowArgs,
};
use flatqube::client::FlatQubeClient;
use flatqube::config::{self, AppConfig};
use flatqube::fmt::{CurrencyDisplayOptions, RenderStyle};
use flatqube::quantize::QuantizePolicy;
use flatqube::sort::{PairSortBy, SortOrder};
use flatqube::{FlatQubeError, fmt};

const NOTHING_TO_SHOW: &str = "Nothing to show.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        report_error(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> flatqube::Result<()> {
    let config = AppConfig::load()?;
    let color = !cli.no_color && std::io::stdout().is_terminal();
    let style = RenderStyle::from_config(&config.console, color);
    let policy = config.quantize_policy();
    let client = FlatQubeClient::new(&config);

    match cli.command {
        Command::Currency(CurrencyCommand::Show(args)) => {
            currency_show(args, &config, &client, &policy, &style).await
        }
        Command::Currency(CurrencyCommand::Config(command)) => {
            currency_config(command, &config, &client, &style).await
        }
        Command::Pair(PairCommand::Show(args)) => {
            pair_show(args, &config, &client, &policy, &style).await
        }
        Command::Pool(PoolCommand::Show(args)) => {
            pool_show(args, &client, &policy, &style).await
        }
    }
}

async fn currency_show(
    args: CurrencyShowArgs,
    config: &AppConfig,
    client: &FlatQubeClient,
    policy: &QuantizePolicy,
    style: &RenderStyle,
) -> flatqube::Result<()> {
    let names: Vec<String> = if !args.names.is_empty() {
        if args.list.is_some() {
            return Err(FlatQubeError::Config(
                "'-l/--list' is not allowed when NAMES are given".to_string(),
            ));
        }
        args.names.clone()
    } else if let Some(list) = &args.list {
        config.currency_list(list)?.to_vec()
    } else {
        config
            .currency_list(&config.cli.currency_show.default_list)?
            .to_vec()
    };

    // Resolution happens before any network call; an unknown ticker fails
    // here.
    let addresses = config.resolve_names(&names)?;
    if addresses.is_empty() {
        println!("{NOTHING_TO_SHOW}");
        return Ok(());
    }

    let show_config = &config.cli.currency_show;
    let options = CurrencyDisplayOptions {
        sort: args.sort.unwrap_or(show_config.sort),
        sort_order: args.sort_order.unwrap_or(show_config.sort_order),
        show_transaction_count: args.show_trans_count,
        show_fee: args.show_fee,
    };
    let interval = args.update_interval.unwrap_or(show_config.update_interval);

    let mut stdout = std::io::stdout();
    let mut printed_lines: u16 = 0;
    loop {
        let currencies = client
            .currencies(&addresses, options.sort, options.sort_order)
            .await?;

        if printed_lines > 0 {
            execute!(
                stdout,
                cursor::MoveUp(printed_lines),
                terminal::Clear(terminal::ClearType::FromCursorDown),
            )?;
        }

        match fmt::currencies_table(&currencies, &options, policy, style) {
            Some(table) => {
                printed_lines = redraw_height(&table);
                stdout.write_all(table.as_bytes())?;
            }
            None => {
                printed_lines = 1;
                writeln!(stdout, "{NOTHING_TO_SHOW}")?;
            }
        }
        stdout.flush()?;

        if !args.update {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_secs_f64(interval)).await;
    }
}

async fn currency_config(
    command: CurrencyConfigCommand,
    config: &AppConfig,
    client: &FlatQubeClient,
    style: &RenderStyle,
) -> flatqube::Result<()> {
    match command {
        CurrencyConfigCommand::Show { list } => {
            let entries: Vec<(String, String)> = match list {
                Some(list) => {
                    let names = config.currency_list(&list)?;
                    config
                        .currencies
                        .iter()
                        .filter(|(name, _)| names.contains(name))
                        .map(|(name, address)| (name.clone(), address.clone()))
                        .collect()
                }
                None => config
                    .currencies
                    .iter()
                    .map(|(name, address)| (name.clone(), address.clone()))
                    .collect(),
            };
            match fmt::address_book_table(&entries, style) {
                Some(table) => print!("{table}"),
                None => println!("{NOTHING_TO_SHOW}"),
            }
        }
        CurrencyConfigCommand::Lists => {
            for list in config.currency_lists.keys() {
                println!("{list}");
            }
        }
        CurrencyConfigCommand::Add { address } => {
            let info = client.currency_by_address(&address).await?;
            let path = config::add_currency(&info.name, &info.address)?;
            println!(
                "{} {} was added to the user config ({})",
                style.paint(&info.name, style.name),
                style.paint(&info.address, style.address),
                path.display(),
            );
        }
    }
    Ok(())
}

async fn pair_show(
    args: PairShowArgs,
    config: &AppConfig,
    client: &FlatQubeClient,
    policy: &QuantizePolicy,
    style: &RenderStyle,
) -> flatqube::Result<()> {
    let pair = match (&args.address, &args.left, &args.right) {
        (Some(address), _, _) => client.pair_by_address(address).await?,
        (None, Some(left), Some(right)) => {
            let left = resolve_side(config, left)?;
            let right = resolve_side(config, right)?;
            client.pair_by_tokens(&left, &right).await?
        }
        _ => {
            return Err(FlatQubeError::Config(
                "either '--address' or both '--left' and '--right' are required".to_string(),
            ));
        }
    };

    match fmt::pairs_table(
        std::slice::from_ref(&pair),
        PairSortBy::None,
        SortOrder::Ascend,
        policy,
        style,
    ) {
        Some(table) => print!("{table}"),
        None => println!("{NOTHING_TO_SHOW}"),
    }
    Ok(())
}

/// A side given as a ticker goes through the address book; a raw address
/// (contains `:`) passes through unchanged.
fn resolve_side(config: &AppConfig, side: &str) -> flatqube::Result<String> {
    if side.contains(':') {
        Ok(side.to_string())
    } else {
        config.resolve(side).map(str::to_string)
    }
}

async fn pool_show(
    args: PoolShowArgs,
    client: &FlatQubeClient,
    policy: &QuantizePolicy,
    style: &RenderStyle,
) -> flatqube::Result<()> {
    let pool = client
        .farming_pool(&args.address, args.user.as_deref(), !args.with_zero_balance)
        .await?;
    print!("{}", fmt::farming_pool_details(&pool, policy, style));
    Ok(())
}

/// Number of lines to move the cursor up on the next refresh, clamped to
/// what `cursor::MoveUp` can express.
fn redraw_height(table: &str) -> u16 {
    u16::try_from(table.lines().count()).unwrap_or(u16::MAX)
}

fn report_error(err: &FlatQubeError) {
    let message = format!("Error: {err}");
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{message}");
    }
}
