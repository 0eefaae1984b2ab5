//! Simple Moving Average over bar closes.
//!
//! Warmup: first (n-1) bars are invalid; from bar n onward the value is
//! the arithmetic mean of the trailing n closes.

use chrono::NaiveDate;

use crate::domain::bar::Bar;

#[derive(Debug, Clone)]
pub struct SmaPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

impl SmaPoint {
    /// The value as an `Option`, `None` during warmup.
    pub fn ready(&self) -> Option<f64> {
        self.valid.then_some(self.value)
    }
}

pub fn calculate_sma(bars: &[Bar], period: usize) -> Vec<SmaPoint> {
    if period == 0 || bars.is_empty() {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= period {
            sum -= bars[i - period].close;
        }

        if i < period - 1 {
            values.push(SmaPoint {
                date: bar.date,
                valid: false,
                value: 0.0,
            });
        } else {
            values.push(SmaPoint {
                date: bar.date,
                valid: true,
                value: sum / period as f64,
            });
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                symbol: "TEST".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn sma_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_sma(&bars, 3);

        assert_eq!(series.len(), 5);
        assert!(!series[0].valid);
        assert!(!series[1].valid);
        assert!(series[2].valid);
        assert!(series[3].valid);
        assert!(series[4].valid);
    }

    #[test]
    fn sma_window_mean() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_sma(&bars, 3);

        assert!((series[2].value - 20.0).abs() < 1e-9);
        assert!((series[3].value - 30.0).abs() < 1e-9);
        assert!((series[4].value - 40.0).abs() < 1e-9);
    }

    #[test]
    fn sma_period_one_tracks_close() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_sma(&bars, 1);

        assert!(series.iter().all(|p| p.valid));
        assert!((series[0].value - 10.0).abs() < 1e-9);
        assert!((series[2].value - 30.0).abs() < 1e-9);
    }

    #[test]
    fn sma_zero_period_is_empty() {
        let bars = make_bars(&[10.0, 20.0]);
        assert!(calculate_sma(&bars, 0).is_empty());
    }

    #[test]
    fn sma_empty_input_is_empty() {
        assert!(calculate_sma(&[], 3).is_empty());
    }

    #[test]
    fn ready_is_none_during_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_sma(&bars, 3);

        assert_eq!(series[0].ready(), None);
        assert_eq!(series[2].ready(), Some(20.0));
    }
}
