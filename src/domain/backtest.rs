//! Backtest harness: feeds daily bars through the strategy engine.
//!
//! The harness computes the moving average over bar closes, steps the
//! engine once per bar in chronological order, and records a daily
//! equity point. Capital model: every periodic investment is an external
//! cash contribution, so equity is the market value of the position plus
//! cumulative sale proceeds.

use chrono::NaiveDate;

use crate::domain::bar::Bar;
use crate::domain::engine::StrategyEngine;
use crate::domain::error::DfatraderError;
use crate::domain::history::{InvestmentRecord, SellRecord};
use crate::domain::ledger::LedgerSnapshot;
use crate::domain::sma::calculate_sma;
use crate::domain::strategy::StrategyParams;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub snapshot: LedgerSnapshot,
    pub investments: Vec<InvestmentRecord>,
    pub sells: Vec<SellRecord>,
    pub equity_curve: Vec<EquityPoint>,
    pub final_price: f64,
    pub bar_count: usize,
}

pub fn run_backtest(
    bars: &[Bar],
    params: &StrategyParams,
) -> Result<BacktestResult, DfatraderError> {
    let sma = calculate_sma(bars, params.ma_period);
    let mut engine = StrategyEngine::new(params.clone())?;
    let mut equity_curve = Vec::with_capacity(bars.len());

    for (bar, point) in bars.iter().zip(&sma) {
        engine.step(bar.date, bar.close, point.ready())?;

        let ledger = engine.ledger();
        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: ledger.market_value(bar.close) + ledger.total_sold_value(),
        });
    }

    Ok(BacktestResult {
        snapshot: engine.snapshot(),
        investments: engine.investments().to_vec(),
        sells: engine.sells().to_vec(),
        equity_curve,
        final_price: bars.last().map(|b| b.close).unwrap_or(0.0),
        bar_count: bars.len(),
    })
}
