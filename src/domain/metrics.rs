//! Performance metrics over a completed backtest.

use crate::domain::backtest::{BacktestResult, EquityPoint};

const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Cash contributed across all investment periods.
    pub total_contributed: f64,
    /// Realized plus unrealized profit at the final bar.
    pub total_profit: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    /// Realized profit over contributed capital.
    pub profit_investment_ratio: f64,
    pub max_drawdown: f64,
    pub investment_count: usize,
    /// Honored investment days where the multiplier paused deployment.
    pub paused_count: usize,
    pub sell_count: usize,
    pub avg_deviation: f64,
    pub avg_multiplier: f64,
}

impl Metrics {
    pub fn compute(result: &BacktestResult) -> Self {
        let total_contributed: f64 = result.investments.iter().map(|r| r.amount).sum();

        let final_equity = result
            .equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(0.0);
        let total_profit = final_equity - total_contributed;

        let total_return = if total_contributed > 0.0 {
            total_profit / total_contributed
        } else {
            0.0
        };

        let days = result.equity_curve.len() as f64;
        let years = days / DAYS_PER_YEAR;
        let annualized_return = if years > 0.0 && total_return > -1.0 {
            (1.0 + total_return).powf(1.0 / years) - 1.0
        } else {
            0.0
        };

        let profit_investment_ratio = if total_contributed > 0.0 {
            result.snapshot.realized_profit / total_contributed
        } else {
            0.0
        };

        let investment_count = result
            .investments
            .iter()
            .filter(|r| r.amount > 0.0)
            .count();
        let paused_count = result.investments.len() - investment_count;

        let record_count = result.investments.len() as f64;
        let (avg_deviation, avg_multiplier) = if record_count > 0.0 {
            (
                result.investments.iter().map(|r| r.deviation).sum::<f64>() / record_count,
                result.investments.iter().map(|r| r.multiplier).sum::<f64>() / record_count,
            )
        } else {
            (0.0, 0.0)
        };

        Metrics {
            total_contributed,
            total_profit,
            total_return,
            annualized_return,
            profit_investment_ratio,
            max_drawdown: compute_drawdown(&result.equity_curve),
            investment_count,
            paused_count,
            sell_count: result.sells.len(),
            avg_deviation,
            avg_multiplier,
        }
    }
}

fn compute_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
