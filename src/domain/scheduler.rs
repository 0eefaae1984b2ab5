//! Investment-day scheduling.

/// Counts days since the last regular investment and decides whether the
/// current step is an investment day.
///
/// The counter starts preloaded so the first eligible observation is an
/// investment day. It is reset on every honored investment day, including
/// zero-amount ones, keeping a fixed calendar cadence.
#[derive(Debug, Clone)]
pub struct InvestmentScheduler {
    interval: u32,
    days_since_last_investment: u32,
}

impl InvestmentScheduler {
    pub fn new(interval: u32) -> Self {
        InvestmentScheduler {
            interval,
            days_since_last_investment: interval,
        }
    }

    /// Advance the counter by one day. Called once per time step.
    pub fn advance(&mut self) {
        self.days_since_last_investment = self.days_since_last_investment.saturating_add(1);
    }

    pub fn is_due(&self) -> bool {
        self.days_since_last_investment >= self.interval
    }

    pub fn reset(&mut self) {
        self.days_since_last_investment = 0;
    }

    pub fn days_since_last_investment(&self) -> u32 {
        self.days_since_last_investment
    }
}
