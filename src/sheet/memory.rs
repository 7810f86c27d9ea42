use std::collections::{HashMap, HashSet};

use crate::{error::AppError, record::Cell};

use super::SheetStore;

/// Grid-backed store mirroring how the Sheets API trims trailing blanks.
#[derive(Debug, Default)]
pub struct MemorySheet {
    worksheets: HashMap<String, Vec<Vec<String>>>,
    /// Columns whose cell writes fail, for exercising partial writes
    pub failing_columns: HashSet<usize>,
    pub update_calls: usize,
}

impl MemorySheet {
    pub fn with_rows(worksheet: &str, rows: Vec<Vec<&str>>) -> Self {
        let grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        let mut sheet = MemorySheet::default();
        sheet.worksheets.insert(worksheet.to_string(), grid);
        sheet
    }

    pub fn cell(&self, worksheet: &str, row: usize, col: usize) -> Option<&str> {
        self.worksheets
            .get(worksheet)?
            .get(row - 1)?
            .get(col - 1)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    fn grid(&self, worksheet: &str) -> Result<&Vec<Vec<String>>, AppError> {
        self.worksheets
            .get(worksheet)
            .ok_or_else(|| AppError::ApiRequestFailed(format!("no worksheet '{}'", worksheet)))
    }

    fn set(&mut self, worksheet: &str, row: usize, col: usize, value: String) -> Result<(), AppError> {
        let grid = self
            .worksheets
            .get_mut(worksheet)
            .ok_or_else(|| AppError::ApiRequestFailed(format!("no worksheet '{}'", worksheet)))?;
        if grid.len() < row {
            grid.resize(row, Vec::new());
        }
        let cells = &mut grid[row - 1];
        if cells.len() < col {
            cells.resize(col, String::new());
        }
        cells[col - 1] = value;
        Ok(())
    }
}

fn trim_trailing<T>(mut items: Vec<T>, is_empty: impl Fn(&T) -> bool) -> Vec<T> {
    while items.last().is_some_and(&is_empty) {
        items.pop();
    }
    items
}

impl SheetStore for MemorySheet {
    async fn row_values(&self, worksheet: &str, row: usize) -> Result<Vec<String>, AppError> {
        let cells = self.grid(worksheet)?.get(row - 1).cloned().unwrap_or_default();
        Ok(trim_trailing(cells, |s| s.is_empty()))
    }

    async fn col_values(&self, worksheet: &str, col: usize) -> Result<Vec<String>, AppError> {
        let column = self
            .grid(worksheet)?
            .iter()
            .map(|row| row.get(col - 1).cloned().unwrap_or_default())
            .collect();
        Ok(trim_trailing(column, |s| s.is_empty()))
    }

    async fn all_values(&self, worksheet: &str) -> Result<Vec<Vec<String>>, AppError> {
        let rows = self
            .grid(worksheet)?
            .iter()
            .map(|row| trim_trailing(row.clone(), |s| s.is_empty()))
            .collect();
        Ok(trim_trailing(rows, |r: &Vec<String>| r.is_empty()))
    }

    async fn update_cell(
        &mut self,
        worksheet: &str,
        row: usize,
        col: usize,
        value: &Cell,
    ) -> Result<(), AppError> {
        self.update_calls += 1;
        if self.failing_columns.contains(&col) {
            return Err(AppError::ApiRequestFailed(format!("write to column {} rejected", col)));
        }
        self.set(worksheet, row, col, value.to_string())
    }

    async fn update_row(
        &mut self,
        worksheet: &str,
        row: usize,
        values: &[Cell],
    ) -> Result<(), AppError> {
        self.update_calls += 1;
        for (i, value) in values.iter().enumerate() {
            self.set(worksheet, row, i + 1, value.to_string())?;
        }
        Ok(())
    }
}
