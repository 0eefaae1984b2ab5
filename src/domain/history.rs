//! Append-only investment and sell history records.
//!
//! Records are created by the engine and never mutated afterwards; they
//! exist for downstream reporting only.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRecord {
    pub date: NaiveDate,
    pub price: f64,
    pub sma: f64,
    pub deviation: f64,
    pub multiplier: f64,
    pub amount: f64,
    pub shares: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SellRecord {
    pub date: NaiveDate,
    pub price: f64,
    /// Unrealized return that triggered the sell.
    pub return_pct: f64,
    pub shares_sold: f64,
    pub proceeds: f64,
    pub realized_profit: f64,
}
