use std::collections::{HashMap, HashSet};

use crate::{error::AppError, record::Column};

/// Header-row lookup from column name to 1-based column number.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    headers: Vec<String>,
    positions: HashMap<String, usize>,
    /// Names that appear more than once in the header row
    duplicates: HashSet<String>,
}

impl ColumnSchema {
    /// Builds the lookup from a header row. Blank header cells are ignored.
    /// Repeated names are remembered rather than rejected: only a lookup of
    /// the repeated name itself fails.
    pub fn from_headers(headers: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        let mut duplicates = HashSet::new();
        for (i, name) in headers.iter().enumerate() {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if positions.contains_key(name) {
                duplicates.insert(name.to_string());
            } else {
                positions.insert(name.to_string(), i + 1);
            }
        }
        ColumnSchema {
            headers,
            positions,
            duplicates,
        }
    }

    /// 1-based column of `name`. Fails for names missing from the header
    /// and for names the header lists more than once.
    pub fn position(&self, name: &str) -> Result<usize, AppError> {
        if self.duplicates.contains(name) {
            return Err(AppError::SchemaMismatch(format!(
                "header '{}' appears more than once",
                name
            )));
        }
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| AppError::ColumnNotFound(name.to_string()))
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Confirms that `columns` sit in the first columns of the sheet, in order.
    pub fn check_layout(&self, columns: &[Column]) -> Result<(), AppError> {
        for (i, column) in columns.iter().enumerate() {
            let pos = self.position(column.name())?;
            if pos != i + 1 {
                return Err(AppError::SchemaMismatch(format!(
                    "'{}' is in column {} but the record puts it in column {}",
                    column.name(),
                    pos,
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
