//! Spreadsheet input: reads the invoice template into a [`Table`].
//!
//! The first row of the sheet holds the column headers, every following row
//! is one goods line.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use log::debug;

use crate::core::{CellValue, FapiaoError, Result, Table};

/// Read the first worksheet of the workbook at `path`.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    read_sheet(path, None)
}

/// Read the worksheet called `sheet_name`, or the first one when `None`.
pub fn read_sheet(path: impl AsRef<Path>, sheet_name: Option<&str>) -> Result<Table> {
    let path = path.as_ref();
    let spreadsheet_err = |e: calamine::Error| FapiaoError::Spreadsheet(format!("{}: {e}", path.display()));

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let range = match sheet_name {
        Some(name) => workbook.worksheet_range(name).map_err(spreadsheet_err)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| FapiaoError::Spreadsheet(format!("{}: workbook has no worksheet", path.display())))?
            .map_err(spreadsheet_err)?,
    };

    let table = range_to_table(&range)?;
    debug!("Read {} row(s) from {}.", table.len(), path.display());
    Ok(table)
}

/// Convert a cell range, header row first, into a table.
pub fn range_to_table(range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::new(Vec::new(), Vec::new());
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell_value(cell) {
            CellValue::Empty => format!("Unnamed: {i}"),
            value => value.code_text(),
        })
        .collect();

    let mut data: Vec<Vec<CellValue>> = rows.map(|row| row.iter().map(cell_value).collect()).collect();
    while data.last().is_some_and(|row| row.iter().all(CellValue::is_absent)) {
        data.pop();
    }
    for index in 0..header.len() {
        unify_column(&mut data, index);
    }

    Table::new(columns, data)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(v) => CellValue::Int(*v),
        Data::Float(v) => CellValue::Float(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        other => CellValue::String(other.to_string()),
    }
}

/// Give one column the numeric typing a data-frame reader would: all-integer
/// columns without blanks become `Int`, numeric columns with blanks or
/// fractions become `Float`, and mixed columns keep per-cell types with
/// whole numbers as `Int`.
fn unify_column(rows: &mut [Vec<CellValue>], index: usize) {
    let mut has_blank = false;
    let mut has_fraction = false;
    let mut has_other = false;
    for row in rows.iter() {
        match &row[index] {
            CellValue::Empty => has_blank = true,
            CellValue::Int(_) => {}
            CellValue::Float(v) => has_fraction |= v.fract() != 0.0 || !v.is_finite(),
            CellValue::String(_) | CellValue::Bool(_) => has_other = true,
        }
    }

    let as_float = !has_other && (has_blank || has_fraction);
    for row in rows.iter_mut() {
        let cell = &mut row[index];
        *cell = match std::mem::take(cell) {
            CellValue::Int(v) if as_float => CellValue::Float(v as f64),
            CellValue::Float(v) if !as_float && v.fract() == 0.0 && v.abs() < 9.0e15 => {
                CellValue::Int(v as i64)
            }
            other => other,
        };
    }
}
