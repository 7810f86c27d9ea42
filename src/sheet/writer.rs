use tracing::{debug, error, info, warn};

use crate::{
    error::AppError,
    record::{Cell, Column, TripRecord},
};

use super::{ColumnSchema, SheetStore};

const HEADER_ROW: usize = 1;

/// Outcome of writing one record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteReport {
    pub written: Vec<Column>,
    /// Columns left empty for this record, each already logged
    pub skipped: Vec<Column>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A strategy for appending a [`TripRecord`] to a worksheet.
#[allow(async_fn_in_trait)]
pub trait SheetWriter {
    async fn write<S: SheetStore>(
        &self,
        store: &mut S,
        worksheet: &str,
        record: &TripRecord,
    ) -> Result<WriteReport, AppError>;
}

/// Writes every value into the first empty cell of its own column.
///
/// Best effort: a column missing from the header or a failed cell write is
/// logged and skipped, and the remaining columns are still written. The
/// write fails only if the header row cannot be read or no column at all
/// could be written.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerFieldWriter;

impl PerFieldWriter {
    /// Writes `value` below the last occupied cell of `column_name`.
    /// Returns the row written to.
    pub async fn write_field<S: SheetStore>(
        &self,
        store: &mut S,
        worksheet: &str,
        schema: &ColumnSchema,
        column_name: &str,
        value: &Cell,
    ) -> Result<usize, AppError> {
        let col = schema.position(column_name)?;
        let next_row = store.col_values(worksheet, col).await?.len() + 1;
        store.update_cell(worksheet, next_row, col, value).await?;
        debug!(column = column_name, row = next_row, "Wrote {}", value);
        Ok(next_row)
    }
}

impl SheetWriter for PerFieldWriter {
    async fn write<S: SheetStore>(
        &self,
        store: &mut S,
        worksheet: &str,
        record: &TripRecord,
    ) -> Result<WriteReport, AppError> {
        let schema = ColumnSchema::from_headers(store.row_values(worksheet, HEADER_ROW).await?);

        let mut report = WriteReport::default();
        for (column, value) in record.cells() {
            match self
                .write_field(store, worksheet, &schema, column.name(), value)
                .await
            {
                Ok(_) => report.written.push(column),
                Err(e) => {
                    error!(column = column.name(), "Skipping field: {}", e);
                    report.skipped.push(column);
                }
            }
        }

        if report.written.is_empty() {
            return Err(AppError::NothingWritten(worksheet.to_string()));
        }
        if report.is_complete() {
            info!("Wrote {} fields to '{}'", report.written.len(), worksheet);
        } else {
            warn!(
                "Wrote {} fields to '{}', skipped {}",
                report.written.len(),
                worksheet,
                report.skipped.len()
            );
        }
        Ok(report)
    }
}

/// Writes the whole record into the first fully empty row in one call.
///
/// The header row must list the record's columns first and in record
/// order; otherwise nothing is written.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchWriter;

impl SheetWriter for BatchWriter {
    async fn write<S: SheetStore>(
        &self,
        store: &mut S,
        worksheet: &str,
        record: &TripRecord,
    ) -> Result<WriteReport, AppError> {
        let schema = ColumnSchema::from_headers(store.row_values(worksheet, HEADER_ROW).await?);
        schema.check_layout(&Column::ALL)?;
        debug!("Header has {} columns, record has {}", schema.width(), Column::ALL.len());

        let next_row = store.all_values(worksheet).await?.len() + 1;
        store.update_row(worksheet, next_row, record.values()).await?;
        info!("Wrote record to '{}' row {}", worksheet, next_row);

        Ok(WriteReport {
            written: Column::ALL.to_vec(),
            skipped: Vec::new(),
        })
    }
}
