//! Strategy engine: per-step orchestration.
//!
//! Each step takes one daily observation `(date, price, sma)`, runs the
//! investment schedule and the profit-taking check, mutates the ledger,
//! and appends history records. The engine exclusively owns its ledger
//! and controller; external access goes through read-only snapshots and
//! the history slices.

use chrono::NaiveDate;

use crate::domain::classifier;
use crate::domain::error::DfatraderError;
use crate::domain::history::{InvestmentRecord, SellRecord};
use crate::domain::ledger::{LedgerSnapshot, PositionLedger};
use crate::domain::profit_taking::ProfitTakingController;
use crate::domain::scheduler::InvestmentScheduler;
use crate::domain::strategy::StrategyParams;

/// What a single step did, for the host harness.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepOutcome {
    pub investment: Option<InvestmentRecord>,
    pub sell: Option<SellRecord>,
}

pub struct StrategyEngine {
    params: StrategyParams,
    ledger: PositionLedger,
    scheduler: InvestmentScheduler,
    profit_taking: ProfitTakingController,
    investments: Vec<InvestmentRecord>,
    sells: Vec<SellRecord>,
    last_date: Option<NaiveDate>,
}

impl StrategyEngine {
    pub fn new(params: StrategyParams) -> Result<Self, DfatraderError> {
        params.validate()?;
        Ok(StrategyEngine {
            scheduler: InvestmentScheduler::new(params.investment_interval),
            profit_taking: ProfitTakingController::new(
                params.target_return,
                params.profit_taking_cooldown,
            ),
            params,
            ledger: PositionLedger::new(),
            investments: Vec::new(),
            sells: Vec::new(),
            last_date: None,
        })
    }

    /// Process one daily observation. `sma` is `None` during warmup.
    ///
    /// Investment runs before the profit check, so profit-taking sees the
    /// post-investment average cost. Zero-amount investment days are
    /// recorded for audit completeness.
    pub fn step(
        &mut self,
        date: NaiveDate,
        price: f64,
        sma: Option<f64>,
    ) -> Result<StepOutcome, DfatraderError> {
        self.validate_observation(date, price, sma)?;
        self.last_date = Some(date);

        self.scheduler.advance();
        let mut investment = None;
        if self.scheduler.is_due() {
            if let Some(ma) = sma {
                let deviation = (price - ma) / ma;
                let multiplier = classifier::classify(deviation);
                let amount = self.params.base_cash * multiplier;
                let shares = self.ledger.invest(amount, price);
                let record = InvestmentRecord {
                    date,
                    price,
                    sma: ma,
                    deviation,
                    multiplier,
                    amount,
                    shares,
                };
                self.investments.push(record.clone());
                investment = Some(record);
            }
            // Due days reset the clock even when warmup suppresses the
            // investment or the multiplier pauses it; the cadence stays
            // fixed to the calendar.
            self.scheduler.reset();
        }

        self.profit_taking.advance();
        let mut sell = None;
        let unrealized = self.ledger.unrealized_return(price);
        if self.profit_taking.should_take_profit(unrealized) {
            let return_pct = unrealized.unwrap_or_default();
            let outcome = self.ledger.sell(self.params.sell_ratio, price)?;
            let record = SellRecord {
                date,
                price,
                return_pct,
                shares_sold: outcome.shares_sold,
                proceeds: outcome.proceeds,
                realized_profit: outcome.realized_gain,
            };
            self.sells.push(record.clone());
            self.profit_taking.record_sell();
            sell = Some(record);
        }

        Ok(StepOutcome { investment, sell })
    }

    fn validate_observation(
        &self,
        date: NaiveDate,
        price: f64,
        sma: Option<f64>,
    ) -> Result<(), DfatraderError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(DfatraderError::InvalidObservation {
                date,
                reason: format!("price must be positive and finite, got {price}"),
            });
        }
        if let Some(ma) = sma {
            if !ma.is_finite() || ma <= 0.0 {
                return Err(DfatraderError::InvalidObservation {
                    date,
                    reason: format!("moving average must be positive and finite, got {ma}"),
                });
            }
        }
        if let Some(prev) = self.last_date {
            if date < prev {
                return Err(DfatraderError::InvalidObservation {
                    date,
                    reason: format!("out-of-order date, previous observation was {prev}"),
                });
            }
        }
        Ok(())
    }

    pub fn params(&self) -> &StrategyParams {
        &self.params
    }

    pub fn ledger(&self) -> &PositionLedger {
        &self.ledger
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn investments(&self) -> &[InvestmentRecord] {
        &self.investments
    }

    pub fn sells(&self) -> &[SellRecord] {
        &self.sells
    }
}
