//! Report generation port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::DfatraderError;
use crate::domain::metrics::Metrics;
use crate::domain::strategy::StrategyParams;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        params: &StrategyParams,
        metrics: &Metrics,
        output_path: &str,
    ) -> Result<(), DfatraderError>;
}
