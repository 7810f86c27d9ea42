//! Persisting a [`TripRecord`] into a worksheet.
//!
//! [`SheetStore`] is the storage seam: row/column reads and cell/row writes
//! against a named worksheet, with 1-based row and column numbers. The two
//! write strategies in [`writer`] work against any store.

mod google;
#[cfg(test)]
pub(crate) mod memory;
mod schema;
mod writer;

use std::{fmt, str::FromStr};

use crate::{error::AppError, record::{Cell, TripRecord}};

pub use google::GoogleSheet;
pub use schema::ColumnSchema;
pub use writer::{BatchWriter, PerFieldWriter, SheetWriter, WriteReport};

/// Tabular storage addressed by worksheet name.
#[allow(async_fn_in_trait)]
pub trait SheetStore {
    /// Non-empty prefix of one row.
    async fn row_values(&self, worksheet: &str, row: usize) -> Result<Vec<String>, AppError>;

    /// One column, top to bottom, up to its last non-empty cell.
    async fn col_values(&self, worksheet: &str, col: usize) -> Result<Vec<String>, AppError>;

    /// Every row up to the last non-empty one, header included.
    async fn all_values(&self, worksheet: &str) -> Result<Vec<Vec<String>>, AppError>;

    async fn update_cell(
        &mut self,
        worksheet: &str,
        row: usize,
        col: usize,
        value: &Cell,
    ) -> Result<(), AppError>;

    /// Writes `values` into `row` starting at the first column, in one call.
    async fn update_row(
        &mut self,
        worksheet: &str,
        row: usize,
        values: &[Cell],
    ) -> Result<(), AppError>;
}

/// Which write strategy to use for the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// One range write for the whole row
    #[default]
    Batch,
    /// One cell write per column, each into that column's next free row
    PerField,
}

impl WriteMode {
    pub async fn write<S: SheetStore>(
        &self,
        store: &mut S,
        worksheet: &str,
        record: &TripRecord,
    ) -> Result<WriteReport, AppError> {
        match self {
            WriteMode::Batch => BatchWriter.write(store, worksheet, record).await,
            WriteMode::PerField => PerFieldWriter.write(store, worksheet, record).await,
        }
    }
}

impl FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "batch" => Ok(WriteMode::Batch),
            "per-field" => Ok(WriteMode::PerField),
            other => Err(format!("unknown write mode '{}', expected batch or per-field", other)),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Batch => f.write_str("batch"),
            WriteMode::PerField => f.write_str("per-field"),
        }
    }
}
