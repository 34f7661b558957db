use std::collections::HashMap;

use log::{debug, warn};

use super::error::{FapiaoError, Result};
use super::fields::DOCUMENT_NUMBER_COLUMN;
use super::table::{RawRow, Table};
use super::value::CellValue;

/// The rows of one invoice, in source order.
#[derive(Debug, Clone)]
pub struct InvoiceGroup<'a> {
    document_number: &'a CellValue,
    rows: Vec<RawRow<'a>>,
}

impl<'a> InvoiceGroup<'a> {
    /// The raw document-number cell shared by every row.
    pub fn document_number(&self) -> &'a CellValue {
        self.document_number
    }

    pub fn rows(&self) -> &[RawRow<'a>] {
        &self.rows
    }

    /// All cells of `column`, in row order.
    pub fn column<'s>(&'s self, column: &'s str) -> impl Iterator<Item = &'a CellValue> + 's {
        self.rows.iter().map(move |row| row.get(column))
    }
}

/// Partition the table into invoices keyed by document number (单据号).
///
/// Groups come out in the order their document number first appears, and
/// each group keeps the source row order. Rows with an empty document
/// number belong to no invoice and are dropped.
pub fn group_by_invoice_number(table: &Table) -> Result<Vec<InvoiceGroup<'_>>> {
    if table.column_index(DOCUMENT_NUMBER_COLUMN).is_none() {
        return Err(FapiaoError::MissingColumn(DOCUMENT_NUMBER_COLUMN));
    }

    let mut groups: Vec<InvoiceGroup<'_>> = Vec::new();
    let mut positions = HashMap::new();
    let mut dropped = 0usize;

    for row in table.rows() {
        let document_number = row.get(DOCUMENT_NUMBER_COLUMN);
        let Some(key) = document_number.key() else {
            dropped += 1;
            continue;
        };

        let position = *positions.entry(key).or_insert_with(|| {
            groups.push(InvoiceGroup {
                document_number,
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].rows.push(row);
    }

    if dropped > 0 {
        warn!("Skipped {dropped} row(s) without a {DOCUMENT_NUMBER_COLUMN}.");
    }
    debug!("Grouped {} row(s) into {} invoice(s).", table.len() - dropped, groups.len());

    Ok(groups)
}
