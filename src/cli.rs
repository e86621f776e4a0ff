//! CLI definition and dispatch.

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::clock::ManualClock;
use crate::adapters::csv_catalog_adapter::CsvCatalogAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::{build_market_config, MarketConfig};
use crate::domain::error::GbceError;
use crate::domain::market::Market;
use crate::domain::pricing::DEMO_VWAP_WINDOW;
use crate::domain::sample::sample_catalog;
use crate::domain::stock::Stock;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "gbce", about = "Global Beverage Corporation Exchange analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the dividend yield of every stock in a catalog, sorted by symbol
    Yields {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Register a catalog and print yields, volume-weighted prices and the index
    Report {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Replay the two-trade demonstration on a simulated clock
    Demo {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Yields { catalog, config } => run_yields(catalog.as_deref(), config.as_deref()),
        Command::Report { catalog, config } => run_report(catalog.as_deref(), config.as_deref()),
        Command::Demo { config } => run_demo(config.as_deref()),
    };
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, GbceError> {
    FileConfigAdapter::from_file(path).map_err(|e| GbceError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&Path>) -> Result<Option<FileConfigAdapter>, GbceError> {
    path.map(load_config).transpose()
}

/// `--catalog` wins over `[catalog] path`; with neither, the built-in sample.
pub fn resolve_catalog(
    catalog_override: Option<&Path>,
    config: Option<&dyn ConfigPort>,
) -> Result<Vec<Stock>, GbceError> {
    let configured = config
        .and_then(|c| c.get_string("catalog", "path"))
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    match catalog_override.map(Path::to_path_buf).or(configured) {
        Some(path) => CsvCatalogAdapter::new(path).load_stocks(),
        None => sample_catalog(),
    }
}

pub fn resolve_market_config(config: Option<&dyn ConfigPort>) -> Result<MarketConfig, GbceError> {
    match config {
        Some(c) => build_market_config(c),
        None => Ok(MarketConfig::default()),
    }
}

/// `SYMBOL: yield` per stock, in symbol order.
pub fn format_yields(stocks: &[Stock]) -> Vec<String> {
    let mut sorted: Vec<&Stock> = stocks.iter().collect();
    sorted.sort();
    sorted.iter().map(|s| s.to_string()).collect()
}

pub fn build_market(stocks: Vec<Stock>, config: MarketConfig) -> Result<Market, GbceError> {
    let mut market = Market::new(config);
    for stock in stocks {
        market.register(stock)?;
    }
    Ok(market)
}

pub fn render_report(market: &Market) -> Result<Vec<String>, GbceError> {
    let now = market.now();
    let window = market.vwap_window();
    let mut lines = vec![format!(
        "{:<6} {:<10} {:>10} {:>14} {:>14}",
        "symbol", "type", "price", "dividend_yield", "vw_price"
    )];
    for stock in market.stocks() {
        lines.push(format!(
            "{:<6} {:<10} {:>10.2} {:>14.6} {:>14.4}",
            stock.symbol(),
            stock.kind().label(),
            stock.price(),
            stock.dividend_yield(),
            stock.volume_weighted_price_over(now, window),
        ));
    }
    lines.push(format!("geometric mean: {:.6}", market.geometric_mean()?));
    Ok(lines)
}

/// Volume-weighted price readings of the demonstration session, keyed by
/// seconds elapsed since the first trade.
pub fn run_demo_session(
    config: MarketConfig,
    start: DateTime<Utc>,
) -> Result<Vec<(i64, f64)>, GbceError> {
    let clock = ManualClock::new(start);
    let mut market = Market::with_clock(config, Box::new(clock.clone()));
    market.register(Stock::common("TEA", 0.0, 34.42)?)?;
    market.register(Stock::preferred("GIN", 2.0 / 100.0, 100.0, 15.45)?)?;

    market.buy_now("TEA", 10, 34.30)?;
    clock.advance(Duration::seconds(1));
    market.sell_now("TEA", 20, 34.20)?;

    let mut readings = Vec::new();
    for elapsed in [1, 10, 11] {
        clock.set(start + Duration::seconds(elapsed));
        readings.push((elapsed, market.volume_weighted_price("TEA")?));
    }
    Ok(readings)
}

fn run_yields(
    catalog: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<Vec<String>, GbceError> {
    let config = load_optional_config(config_path)?;
    let stocks = resolve_catalog(catalog, config.as_ref().map(|c| c as &dyn ConfigPort))?;
    let mut lines = vec!["Dividend yields:".to_string()];
    lines.extend(format_yields(&stocks));
    Ok(lines)
}

fn run_report(
    catalog: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<Vec<String>, GbceError> {
    let config = load_optional_config(config_path)?;
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);
    let market_config = resolve_market_config(config_port)?;
    let stocks = resolve_catalog(catalog, config_port)?;
    let market = build_market(stocks, market_config)?;
    render_report(&market)
}

fn run_demo(config_path: Option<&Path>) -> Result<Vec<String>, GbceError> {
    let config = load_optional_config(config_path)?;
    let market_config = match config.as_ref() {
        Some(c) => build_market_config(c)?,
        None => MarketConfig {
            vwap_window: DEMO_VWAP_WINDOW,
        },
    };

    let mut lines = vec![format!(
        "volume-weighted price for TEA ({}s window)",
        market_config.vwap_window.num_seconds()
    )];
    for (elapsed, price) in run_demo_session(market_config, Utc::now())? {
        lines.push(format!("  +{elapsed}s: {price}"));
    }
    Ok(lines)
}
