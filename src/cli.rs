//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig};
use crate::domain::config_validation::{
    validate_backtest_config, validate_data_config, validate_strategy_config,
};
use crate::domain::error::DfatraderError;
use crate::domain::metrics::Metrics;
use crate::domain::strategy::StrategyParams;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "dfatrader", about = "Dynamic fund averaging backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for symbol(s)
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with bar data
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            symbol,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_command(&config, output.as_ref(), symbol.as_deref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DfatraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_strategy_params(adapter: &dyn ConfigPort) -> StrategyParams {
    let defaults = StrategyParams::default();
    StrategyParams {
        base_cash: adapter.get_double("strategy", "base_cash", defaults.base_cash),
        ma_period: adapter.get_int("strategy", "ma_period", defaults.ma_period as i64) as usize,
        investment_interval: adapter.get_int(
            "strategy",
            "investment_interval",
            defaults.investment_interval as i64,
        ) as u32,
        target_return: adapter.get_double("strategy", "target_return", defaults.target_return),
        sell_ratio: adapter.get_double("strategy", "sell_ratio", defaults.sell_ratio),
        profit_taking_cooldown: adapter.get_int(
            "strategy",
            "profit_taking_cooldown",
            defaults.profit_taking_cooldown as i64,
        ) as u32,
    }
}

pub fn build_backtest_config(
    adapter: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<BacktestConfig, DfatraderError> {
    let symbol = match symbol_override {
        Some(s) => s.to_uppercase(),
        None => adapter
            .get_string("backtest", "symbol")
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DfatraderError::ConfigMissing {
                section: "backtest".into(),
                key: "symbol".into(),
            })?,
    };

    let start_date = parse_config_date(adapter, "start_date")?;
    let end_date = parse_config_date(adapter, "end_date")?;

    Ok(BacktestConfig {
        symbol,
        start_date,
        end_date,
    })
}

fn parse_config_date(
    adapter: &dyn ConfigPort,
    key: &str,
) -> Result<chrono::NaiveDate, DfatraderError> {
    let raw = adapter
        .get_string("backtest", key)
        .ok_or_else(|| DfatraderError::ConfigMissing {
            section: "backtest".into(),
            key: key.into(),
        })?;
    chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        DfatraderError::ConfigInvalid {
            section: "backtest".into(),
            key: key.into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })
}

fn run_backtest_command(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    symbol_override: Option<&str>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate config sections
    for validation in [
        validate_data_config(&adapter),
        validate_backtest_config(&adapter),
        validate_strategy_config(&adapter),
    ] {
        if let Err(e) = validation {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    // Stage 3: Build parameters and backtest window
    let params = build_strategy_params(&adapter);
    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bt_config = match build_backtest_config(&adapter, symbol_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let bars_dir = adapter
        .get_string("data", "bars_dir")
        .unwrap_or_default();
    let data_port = CsvAdapter::new(PathBuf::from(bars_dir));

    let output = output_path.cloned().or_else(|| {
        adapter
            .get_string("report", "output")
            .map(PathBuf::from)
    });

    run_backtest_pipeline(&data_port, &params, &bt_config, output.as_ref())
}

pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    params: &StrategyParams,
    bt_config: &BacktestConfig,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 4: Fetch bars
    eprintln!(
        "Fetching {} bars, {} to {}",
        bt_config.symbol, bt_config.start_date, bt_config.end_date,
    );
    let bars = match data_port.fetch_bars(&bt_config.symbol, bt_config.start_date, bt_config.end_date)
    {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Validate data sufficiency. The engine cannot act before
    // the moving average is ready, so fewer bars than the window plus one
    // means the whole run would be warmup.
    if bars.is_empty() {
        let e = DfatraderError::NoData {
            symbol: bt_config.symbol.clone(),
        };
        eprintln!("error: {e}");
        return (&e).into();
    }
    let minimum = params.ma_period + 1;
    if bars.len() < minimum {
        let e = DfatraderError::InsufficientData {
            symbol: bt_config.symbol.clone(),
            bars: bars.len(),
            minimum,
        };
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 6: Run the backtest
    eprintln!("Running backtest over {} bars", bars.len());
    let result = match run_backtest(&bars, params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 7: Compute metrics
    let metrics = Metrics::compute(&result);

    // Stage 8: Print console summary to stderr
    eprintln!("\n=== Results ===");
    eprintln!("Contributed:      {:.2}", metrics.total_contributed);
    eprintln!("Total Profit:     {:.2}", metrics.total_profit);
    eprintln!("Total Return:     {:.2}%", metrics.total_return * 100.0);
    eprintln!(
        "Annualized:       {:.2}%",
        metrics.annualized_return * 100.0
    );
    eprintln!("Max Drawdown:     -{:.1}%", metrics.max_drawdown * 100.0);
    eprintln!("Investments:      {}", metrics.investment_count);
    eprintln!("Paused Periods:   {}", metrics.paused_count);
    eprintln!("Sells:            {}", metrics.sell_count);

    // Stage 9: Write the report
    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("report.txt"));

    let report_port = TextReportAdapter;
    match report_port.write(&result, params, &metrics, &output.display().to_string()) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            ExitCode::from(1)
        }
    }
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    for validation in [
        validate_data_config(&adapter),
        validate_backtest_config(&adapter),
        validate_strategy_config(&adapter),
    ] {
        if let Err(e) = validation {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let params = build_strategy_params(&adapter);
    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bt_config = match build_backtest_config(&adapter, None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nResolved run:");
    eprintln!("  symbol:   {}", bt_config.symbol);
    eprintln!(
        "  window:   {} to {}",
        bt_config.start_date, bt_config.end_date
    );
    eprintln!("  base_cash = {}", params.base_cash);
    eprintln!("  ma_period = {}", params.ma_period);
    eprintln!("  investment_interval = {}", params.investment_interval);
    eprintln!("  target_return = {}", params.target_return);
    eprintln!("  sell_ratio = {}", params.sell_ratio);
    eprintln!("  profit_taking_cooldown = {}", params.profit_taking_cooldown);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    for validation in [
        validate_data_config(&adapter),
        validate_backtest_config(&adapter),
        validate_strategy_config(&adapter),
    ] {
        if let Err(e) = validation {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let params = build_strategy_params(&adapter);
    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

fn run_info(symbol: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bars_dir = adapter.get_string("data", "bars_dir").unwrap_or_default();
    let data_port = CsvAdapter::new(PathBuf::from(bars_dir));

    let symbols = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None => match data_port.list_symbols() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    for s in &symbols {
        match data_port.data_range(s) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} bars, {} to {}", s, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", s);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", s, e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bars_dir = adapter.get_string("data", "bars_dir").unwrap_or_default();
    let data_port = CsvAdapter::new(PathBuf::from(bars_dir));

    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No bar files found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}
