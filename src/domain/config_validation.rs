//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::DfatraderError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    match config.get_string("data", "bars_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(DfatraderError::ConfigMissing {
            section: "data".to_string(),
            key: "bars_dir".to_string(),
        }),
    }
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    validate_symbol(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    validate_base_cash(config)?;
    validate_ma_period(config)?;
    validate_investment_interval(config)?;
    validate_target_return(config)?;
    validate_sell_ratio(config)?;
    validate_cooldown(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    match config.get_string("backtest", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(DfatraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    let start_str = config.get_string("backtest", "start_date");
    let end_str = config.get_string("backtest", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(DfatraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "start_date".to_string(),
            reason: "start_date must be before end_date".to_string(),
        });
    }
    Ok(())
}

fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, DfatraderError> {
    match value {
        None => Err(DfatraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: field.to_string(),
        }),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DfatraderError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            })
        }
    }
}

fn validate_base_cash(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    let value = config.get_double("strategy", "base_cash", 70.0);
    if value <= 0.0 {
        return Err(DfatraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "base_cash".to_string(),
            reason: "base_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_ma_period(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    let value = config.get_int("strategy", "ma_period", 120);
    if value < 1 {
        return Err(DfatraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "ma_period".to_string(),
            reason: "ma_period must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_investment_interval(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    let value = config.get_int("strategy", "investment_interval", 14);
    if value < 1 {
        return Err(DfatraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "investment_interval".to_string(),
            reason: "investment_interval must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_target_return(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    let value = config.get_double("strategy", "target_return", 0.75);
    if value <= 0.0 {
        return Err(DfatraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "target_return".to_string(),
            reason: "target_return must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_sell_ratio(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    let value = config.get_double("strategy", "sell_ratio", 0.5);
    if value <= 0.0 || value > 1.0 {
        return Err(DfatraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "sell_ratio".to_string(),
            reason: "sell_ratio must be between 0 (exclusive) and 1 (inclusive)".to_string(),
        });
    }
    Ok(())
}

fn validate_cooldown(config: &dyn ConfigPort) -> Result<(), DfatraderError> {
    let value = config.get_int("strategy", "profit_taking_cooldown", 30);
    if value < 0 {
        return Err(DfatraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "profit_taking_cooldown".to_string(),
            reason: "profit_taking_cooldown must be non-negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    const VALID: &str = r#"
[data]
bars_dir = /var/data/bars

[backtest]
symbol = SOLUSDT
start_date = 2022-01-01
end_date = 2024-12-31

[strategy]
base_cash = 70.0
ma_period = 120
investment_interval = 14
target_return = 0.75
sell_ratio = 0.5
profit_taking_cooldown = 30
"#;

    #[test]
    fn valid_config_passes() {
        let config = make_config(VALID);
        assert!(validate_data_config(&config).is_ok());
        assert!(validate_backtest_config(&config).is_ok());
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn defaults_pass_when_strategy_section_is_empty() {
        let config = make_config("[strategy]\n");
        assert!(validate_strategy_config(&config).is_ok());
    }

    #[test]
    fn missing_bars_dir_fails() {
        let config = make_config("[data]\n");
        let err = validate_data_config(&config).unwrap_err();
        assert!(matches!(err, DfatraderError::ConfigMissing { key, .. } if key == "bars_dir"));
    }

    #[test]
    fn missing_symbol_fails() {
        let config =
            make_config("[backtest]\nstart_date = 2022-01-01\nend_date = 2024-12-31\n");
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, DfatraderError::ConfigMissing { key, .. } if key == "symbol"));
    }

    #[test]
    fn missing_end_date_fails() {
        let config = make_config("[backtest]\nsymbol = SOLUSDT\nstart_date = 2022-01-01\n");
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, DfatraderError::ConfigMissing { key, .. } if key == "end_date"));
    }

    #[test]
    fn invalid_date_format_fails() {
        let config = make_config(
            "[backtest]\nsymbol = SOLUSDT\nstart_date = 2022/01/01\nend_date = 2024-12-31\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn start_after_end_fails() {
        let config = make_config(
            "[backtest]\nsymbol = SOLUSDT\nstart_date = 2024-12-31\nend_date = 2022-01-01\n",
        );
        let err = validate_backtest_config(&config).unwrap_err();
        assert!(matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn base_cash_zero_fails() {
        let config = make_config("[strategy]\nbase_cash = 0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "base_cash"));
    }

    #[test]
    fn ma_period_zero_fails() {
        let config = make_config("[strategy]\nma_period = 0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "ma_period"));
    }

    #[test]
    fn investment_interval_zero_fails() {
        let config = make_config("[strategy]\ninvestment_interval = 0\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(
            matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "investment_interval")
        );
    }

    #[test]
    fn target_return_negative_fails() {
        let config = make_config("[strategy]\ntarget_return = -0.5\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(
            matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "target_return")
        );
    }

    #[test]
    fn sell_ratio_out_of_range_fails() {
        for value in ["0", "-0.5", "1.5"] {
            let config = make_config(&format!("[strategy]\nsell_ratio = {value}\n"));
            let err = validate_strategy_config(&config).unwrap_err();
            assert!(
                matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "sell_ratio")
            );
        }
    }

    #[test]
    fn negative_cooldown_fails() {
        let config = make_config("[strategy]\nprofit_taking_cooldown = -1\n");
        let err = validate_strategy_config(&config).unwrap_err();
        assert!(
            matches!(err, DfatraderError::ConfigInvalid { key, .. } if key == "profit_taking_cooldown")
        );
    }
}
