//! Strategy parameters.
//!
//! One immutable value constructed up front and passed into the engine,
//! so parameterized runs never share ambient state.

use crate::domain::error::DfatraderError;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    /// Cash deployed per full-multiplier investment period.
    pub base_cash: f64,
    /// Moving-average window in days.
    pub ma_period: usize,
    /// Days between regular investment evaluations.
    pub investment_interval: u32,
    /// Unrealized-return threshold that triggers profit-taking.
    pub target_return: f64,
    /// Fraction of the position liquidated per profit-taking event.
    pub sell_ratio: f64,
    /// Days before re-arming after a sell.
    pub profit_taking_cooldown: u32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            base_cash: 70.0,
            ma_period: 120,
            investment_interval: 14,
            target_return: 0.75,
            sell_ratio: 0.5,
            profit_taking_cooldown: 30,
        }
    }
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), DfatraderError> {
        if !(self.base_cash > 0.0) || !self.base_cash.is_finite() {
            return Err(invalid("base_cash", "base_cash must be positive"));
        }
        if self.ma_period == 0 {
            return Err(invalid("ma_period", "ma_period must be at least 1"));
        }
        if self.investment_interval == 0 {
            return Err(invalid(
                "investment_interval",
                "investment_interval must be at least 1",
            ));
        }
        if !(self.target_return > 0.0) || !self.target_return.is_finite() {
            return Err(invalid("target_return", "target_return must be positive"));
        }
        if !(self.sell_ratio > 0.0 && self.sell_ratio <= 1.0) {
            return Err(invalid(
                "sell_ratio",
                "sell_ratio must be between 0 (exclusive) and 1 (inclusive)",
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> DfatraderError {
    DfatraderError::ConfigInvalid {
        section: "strategy".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
