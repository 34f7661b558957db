//! Rectangular table of named columns handed over by the spreadsheet reader.

use std::collections::HashSet;

use super::error::{FapiaoError, Result};
use super::value::CellValue;

/// A header row plus data rows, all of the same width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(FapiaoError::Table(format!("duplicate column header {column:?}")));
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(FapiaoError::Table(format!(
                    "row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    columns.len()
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, index: usize) -> Option<RawRow<'_>> {
        self.rows.get(index).map(|cells| RawRow { table: self, cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(|cells| RawRow { table: self, cells })
    }

    /// Mutable access to one column's cells, if the column exists.
    pub(crate) fn column_cells_mut(&mut self, name: &str) -> Option<impl Iterator<Item = &mut CellValue>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter_mut().map(move |row| &mut row[index]))
    }
}

/// One row viewed through its table's header.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    table: &'a Table,
    cells: &'a [CellValue],
}

impl<'a> RawRow<'a> {
    /// The cell under `column`. A column missing from the table reads as empty.
    pub fn get(&self, column: &str) -> &'a CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        match self.table.column_index(column) {
            Some(index) => &self.cells[index],
            None => EMPTY,
        }
    }

    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }
}

/// Builder for tables assembled in code (tests, other front ends).
///
/// ```
/// use fapiao::core::*;
///
/// let table = TableBuilder::new(["单据号", "商品名称"])
///     .row(["A1".into(), "钢笔".into()])
///     .build()
///     .unwrap();
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TableBuilder {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I: IntoIterator<Item = CellValue>>(mut self, cells: I) -> Self {
        self.rows.push(cells.into_iter().collect());
        self
    }

    pub fn build(self) -> Result<Table> {
        Table::new(self.columns, self.rows)
    }
}
