//! Profit-taking state machine.
//!
//! Armed: eligible to evaluate the profit target each step.
//! CoolingDown: the check is skipped entirely, however far the unrealized
//! return runs past the target, until the cooldown elapses.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfitTakingState {
    Armed,
    CoolingDown { days_since_sell: u32 },
}

#[derive(Debug, Clone)]
pub struct ProfitTakingController {
    target_return: f64,
    cooldown_days: u32,
    state: ProfitTakingState,
}

impl ProfitTakingController {
    pub fn new(target_return: f64, cooldown_days: u32) -> Self {
        ProfitTakingController {
            target_return,
            cooldown_days,
            state: ProfitTakingState::Armed,
        }
    }

    /// Advance one day; re-arms once the cooldown has elapsed.
    pub fn advance(&mut self) {
        if let ProfitTakingState::CoolingDown { days_since_sell } = self.state {
            let elapsed = days_since_sell.saturating_add(1);
            if elapsed >= self.cooldown_days {
                self.state = ProfitTakingState::Armed;
            } else {
                self.state = ProfitTakingState::CoolingDown {
                    days_since_sell: elapsed,
                };
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state == ProfitTakingState::Armed
    }

    /// True when armed and the unrealized return meets the target.
    /// `None` (no position) never fires.
    pub fn should_take_profit(&self, unrealized_return: Option<f64>) -> bool {
        self.is_armed() && unrealized_return.is_some_and(|r| r >= self.target_return)
    }

    /// Record an executed sell and start the cooldown.
    pub fn record_sell(&mut self) {
        self.state = ProfitTakingState::CoolingDown { days_since_sell: 0 };
    }

    pub fn state(&self) -> &ProfitTakingState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_armed() {
        let controller = ProfitTakingController::new(0.75, 30);
        assert!(controller.is_armed());
    }

    #[test]
    fn fires_at_target() {
        let controller = ProfitTakingController::new(0.75, 30);
        assert!(controller.should_take_profit(Some(0.75)));
        assert!(controller.should_take_profit(Some(1.2)));
        assert!(!controller.should_take_profit(Some(0.74)));
    }

    #[test]
    fn never_fires_without_position() {
        let controller = ProfitTakingController::new(0.75, 30);
        assert!(!controller.should_take_profit(None));
    }

    #[test]
    fn sell_starts_cooldown() {
        let mut controller = ProfitTakingController::new(0.75, 30);
        controller.record_sell();

        assert!(!controller.is_armed());
        assert!(!controller.should_take_profit(Some(5.0)));
        assert_eq!(
            controller.state(),
            &ProfitTakingState::CoolingDown { days_since_sell: 0 }
        );
    }

    #[test]
    fn rearms_after_cooldown_elapses() {
        let mut controller = ProfitTakingController::new(0.75, 30);
        controller.record_sell();

        for _ in 0..29 {
            controller.advance();
            assert!(!controller.is_armed());
        }
        controller.advance();
        assert!(controller.is_armed());
    }

    #[test]
    fn zero_cooldown_rearms_next_day() {
        let mut controller = ProfitTakingController::new(0.75, 0);
        controller.record_sell();
        controller.advance();
        assert!(controller.is_armed());
    }

    #[test]
    fn advance_while_armed_is_noop() {
        let mut controller = ProfitTakingController::new(0.75, 30);
        controller.advance();
        controller.advance();
        assert!(controller.is_armed());
    }
}
