//! Data access port trait.

use chrono::NaiveDate;

use crate::domain::bar::Bar;
use crate::domain::error::DfatraderError;

pub trait DataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, DfatraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, DfatraderError>;

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DfatraderError>;
}
