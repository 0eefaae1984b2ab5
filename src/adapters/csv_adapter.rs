//! CSV file data adapter.
//!
//! One file per symbol under a base directory, named `<SYMBOL>.csv` with
//! a `date,open,high,low,close,volume` header.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::bar::Bar;
use crate::domain::error::DfatraderError;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_dir: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn bars_path(&self, symbol: &str) -> PathBuf {
        self.base_dir.join(format!("{}.csv", symbol))
    }
}

fn column<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, DfatraderError>
where
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).ok_or_else(|| DfatraderError::DataStore {
        reason: format!("missing {} column", name),
    })?;
    raw.parse().map_err(|e| DfatraderError::DataStore {
        reason: format!("invalid {} value {:?}: {}", name, raw, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, DfatraderError> {
        let path = self.bars_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| DfatraderError::DataStore {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| DfatraderError::DataStore {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str: String = column(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                DfatraderError::DataStore {
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(Bar {
                symbol: symbol.to_string(),
                date,
                open: column(&record, 1, "open")?,
                high: column(&record, 2, "high")?,
                low: column(&record, 3, "low")?,
                close: column(&record, 4, "close")?,
                volume: column(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, DfatraderError> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| DfatraderError::DataStore {
            reason: format!("failed to read directory {}: {}", self.base_dir.display(), e),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DfatraderError::DataStore {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DfatraderError> {
        let bars = self.fetch_bars(symbol, NaiveDate::MIN, NaiveDate::MAX)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}
