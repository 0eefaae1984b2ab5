//! Daily OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Bar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fields() {
        let bar = Bar {
            symbol: "SOLUSDT".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 95.0,
            close: 105.0,
            volume: 250_000,
        };
        assert_eq!(bar.symbol, "SOLUSDT");
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!((bar.close - 105.0).abs() < f64::EPSILON);
        assert_eq!(bar.volume, 250_000);
    }
}
