//! Plain-text report adapter.
//!
//! Renders the backtest result, ledger snapshot and metrics as an
//! aligned text summary and writes it to a file.

use std::fmt::Write as _;
use std::fs;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::DfatraderError;
use crate::domain::metrics::Metrics;
use crate::domain::strategy::StrategyParams;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

pub fn render(result: &BacktestResult, params: &StrategyParams, metrics: &Metrics) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Dynamic Fund Averaging Backtest ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Parameters");
    let _ = writeln!(out, "  Base cash:            {:.2}", params.base_cash);
    let _ = writeln!(out, "  MA period:            {} days", params.ma_period);
    let _ = writeln!(
        out,
        "  Investment interval:  {} days",
        params.investment_interval
    );
    let _ = writeln!(
        out,
        "  Target return:        {:.1}%",
        params.target_return * 100.0
    );
    let _ = writeln!(
        out,
        "  Sell ratio:           {:.1}%",
        params.sell_ratio * 100.0
    );
    let _ = writeln!(
        out,
        "  Cooldown:             {} days",
        params.profit_taking_cooldown
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Position");
    let _ = writeln!(out, "  Shares held:          {:.6}", result.snapshot.total_shares);
    let _ = writeln!(out, "  Average cost:         {:.4}", result.snapshot.average_cost);
    let _ = writeln!(out, "  Final price:          {:.4}", result.final_price);
    let _ = writeln!(
        out,
        "  Cost basis remaining: {:.2}",
        result.snapshot.total_invested
    );
    let _ = writeln!(
        out,
        "  Realized profit:      {:.2}",
        result.snapshot.realized_profit
    );
    let _ = writeln!(
        out,
        "  Sale proceeds:        {:.2}",
        result.snapshot.total_sold_value
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Performance");
    let _ = writeln!(out, "  Contributed:          {:.2}", metrics.total_contributed);
    let _ = writeln!(out, "  Total profit:         {:.2}", metrics.total_profit);
    let _ = writeln!(
        out,
        "  Total return:         {:.2}%",
        metrics.total_return * 100.0
    );
    let _ = writeln!(
        out,
        "  Annualized return:    {:.2}%",
        metrics.annualized_return * 100.0
    );
    let _ = writeln!(
        out,
        "  Realized/invested:    {:.2}%",
        metrics.profit_investment_ratio * 100.0
    );
    let _ = writeln!(
        out,
        "  Max drawdown:         -{:.1}%",
        metrics.max_drawdown * 100.0
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Activity over {} bars", result.bar_count);
    let _ = writeln!(out, "  Investments:          {}", metrics.investment_count);
    let _ = writeln!(out, "  Paused periods:       {}", metrics.paused_count);
    let _ = writeln!(out, "  Profit-taking sells:  {}", metrics.sell_count);
    let _ = writeln!(
        out,
        "  Avg deviation:        {:.2}%",
        metrics.avg_deviation * 100.0
    );
    let _ = writeln!(out, "  Avg multiplier:       {:.2}", metrics.avg_multiplier);

    if !result.sells.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Sell history");
        for sell in &result.sells {
            let _ = writeln!(
                out,
                "  {}  price {:.4}  return {:.1}%  sold {:.6}  profit {:.2}",
                sell.date,
                sell.price,
                sell.return_pct * 100.0,
                sell.shares_sold,
                sell.realized_profit,
            );
        }
    }

    out
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        params: &StrategyParams,
        metrics: &Metrics,
        output_path: &str,
    ) -> Result<(), DfatraderError> {
        let content = render(result, params, metrics);
        fs::write(output_path, content)?;
        Ok(())
    }
}
