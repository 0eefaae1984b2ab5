//! Position ledger: cost-weighted share accounting.
//!
//! Tracks the accumulating position across investments and partial sells.
//! Shares are fractional. Cost basis is removed proportionally on sells,
//! so `total_shares * average_cost` stays consistent with the remaining
//! invested capital, and `average_cost` itself is unchanged by a sell.

use crate::domain::error::DfatraderError;

#[derive(Debug, Clone, Default)]
pub struct PositionLedger {
    total_shares: f64,
    total_invested: f64,
    average_cost: f64,
    realized_profit: f64,
    total_sold_value: f64,
}

/// Read-only copy of the ledger fields, handed to reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSnapshot {
    pub total_shares: f64,
    pub total_invested: f64,
    pub average_cost: f64,
    pub realized_profit: f64,
    pub total_sold_value: f64,
}

/// Result of one executed sell.
#[derive(Debug, Clone, PartialEq)]
pub struct SellOutcome {
    pub shares_sold: f64,
    pub proceeds: f64,
    pub realized_gain: f64,
}

impl PositionLedger {
    pub fn new() -> Self {
        PositionLedger::default()
    }

    /// Deploy `amount` of cash at `price`, returning the shares acquired.
    ///
    /// A zero amount is a no-op returning 0.0 shares.
    pub fn invest(&mut self, amount: f64, price: f64) -> f64 {
        if amount == 0.0 {
            return 0.0;
        }

        let shares = amount / price;
        self.total_shares += shares;
        self.total_invested += amount;
        self.average_cost = self.total_invested / self.total_shares;
        shares
    }

    /// Liquidate `ratio` of the position at `price`.
    ///
    /// Removes cost basis proportionally; `average_cost` of the remainder
    /// is unchanged. Fails when there is no position or the requested
    /// shares exceed the position.
    pub fn sell(&mut self, ratio: f64, price: f64) -> Result<SellOutcome, DfatraderError> {
        if self.total_shares <= 0.0 {
            return Err(DfatraderError::InsufficientPosition {
                requested: self.total_shares * ratio,
                held: self.total_shares,
            });
        }

        let shares_sold = self.total_shares * ratio;
        if shares_sold > self.total_shares {
            return Err(DfatraderError::InsufficientPosition {
                requested: shares_sold,
                held: self.total_shares,
            });
        }

        let proceeds = shares_sold * price;
        let cost_removed = shares_sold * self.average_cost;
        let realized_gain = proceeds - cost_removed;

        self.total_shares -= shares_sold;
        self.total_invested -= cost_removed;
        self.realized_profit += realized_gain;
        self.total_sold_value += proceeds;

        if self.total_shares == 0.0 {
            self.average_cost = 0.0;
            self.total_invested = 0.0;
        }

        Ok(SellOutcome {
            shares_sold,
            proceeds,
            realized_gain,
        })
    }

    /// `(price - average_cost) / average_cost`, or `None` with no position.
    pub fn unrealized_return(&self, price: f64) -> Option<f64> {
        if self.total_shares > 0.0 && self.average_cost > 0.0 {
            Some((price - self.average_cost) / self.average_cost)
        } else {
            None
        }
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.total_shares * price
    }

    pub fn total_shares(&self) -> f64 {
        self.total_shares
    }

    pub fn total_invested(&self) -> f64 {
        self.total_invested
    }

    pub fn average_cost(&self) -> f64 {
        self.average_cost
    }

    pub fn realized_profit(&self) -> f64 {
        self.realized_profit
    }

    pub fn total_sold_value(&self) -> f64 {
        self.total_sold_value
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            total_shares: self.total_shares,
            total_invested: self.total_invested,
            average_cost: self.average_cost,
            realized_profit: self.realized_profit,
            total_sold_value: self.total_sold_value,
        }
    }
}
