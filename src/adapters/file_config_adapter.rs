//! INI file configuration adapter.

use configparser::ini::Ini;
use std::path::Path;

use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.config.get(section, key).map(|v| v.to_lowercase()) {
            Some(v) if matches!(v.as_str(), "true" | "yes" | "1") => true,
            Some(v) if matches!(v.as_str(), "false" | "no" | "0") => false,
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[data]
bars_dir = /var/data/bars

[backtest]
symbol = SOLUSDT

[strategy]
base_cash = 70.0
investment_interval = 14
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "bars_dir"),
            Some("/var/data/bars".to_string())
        );
        assert_eq!(
            adapter.get_string("backtest", "symbol"),
            Some("SOLUSDT".to_string())
        );
        assert_eq!(adapter.get_int("strategy", "investment_interval", 0), 14);
        assert_eq!(adapter.get_double("strategy", "base_cash", 0.0), 70.0);
    }

    #[test]
    fn missing_keys_return_none_or_default() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nbase_cash = 70\n").unwrap();
        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_string("absent_section", "key"), None);
        assert_eq!(adapter.get_int("strategy", "missing", 42), 42);
        assert_eq!(adapter.get_double("strategy", "missing", 1.5), 1.5);
    }

    #[test]
    fn non_numeric_values_fall_back_to_default() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nma_period = lots\nbase_cash = none\n")
                .unwrap();
        assert_eq!(adapter.get_int("strategy", "ma_period", 120), 120);
        assert_eq!(adapter.get_double("strategy", "base_cash", 70.0), 70.0);
    }

    #[test]
    fn bool_parsing() {
        let adapter = FileConfigAdapter::from_string(
            "[report]\na = true\nb = yes\nc = 1\nd = false\ne = no\nf = 0\ng = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("report", "a", false));
        assert!(adapter.get_bool("report", "b", false));
        assert!(adapter.get_bool("report", "c", false));
        assert!(!adapter.get_bool("report", "d", true));
        assert!(!adapter.get_bool("report", "e", true));
        assert!(!adapter.get_bool("report", "f", true));
        assert!(adapter.get_bool("report", "g", true));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[data]\nbars_dir = /tmp/bars\n").unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "bars_dir"),
            Some("/tmp/bars".to_string())
        );
    }

    #[test]
    fn from_file_missing_file_is_an_error() {
        assert!(FileConfigAdapter::from_file("/nonexistent/dfatrader.ini").is_err());
    }
}
