use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::grouping::{InvoiceGroup, group_by_invoice_number};
use super::header::{HeaderRecord, build_header};
use super::line_item::{LineItemRecord, build_line_items};
use super::table::Table;
use super::validation::verify_header_unique;
use super::value::CellValue;

/// One invoice: its document number, header and goods lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// 单据号 as read. Not emitted; invoices are numbered by position instead.
    pub document_number: CellValue,
    pub header: HeaderRecord,
    pub lines: Vec<LineItemRecord>,
}

/// Conversion options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Check that invoice-level columns are constant within each invoice
    /// before any record is built.
    pub verify_input: bool,
    /// Output text encoding label (WHATWG name, e.g. `gbk`, `gb18030`).
    pub encoding: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            verify_input: true,
            encoding: "gbk".into(),
        }
    }
}

/// Build the records of one invoice group.
pub fn create_invoice(group: &InvoiceGroup<'_>) -> Result<InvoiceRecord> {
    let header = build_header(group)?;
    let lines = build_line_items(group, &header.tax_inclusion_flag)?;
    Ok(InvoiceRecord {
        document_number: group.document_number().clone(),
        header,
        lines,
    })
}

/// Turn a whole table into invoice records, in first-appearance order of
/// their document numbers.
///
/// Fails on the first invalid invoice; nothing is returned for the others.
/// With `verify_input`, every group is checked before any is built.
pub fn build_invoices(table: &Table, config: &ConvertConfig) -> Result<Vec<InvoiceRecord>> {
    let groups = group_by_invoice_number(table)?;

    if config.verify_input {
        for group in &groups {
            verify_header_unique(group)?;
        }
    } else {
        debug!("Input verification is disabled.");
    }

    let invoices = groups.iter().map(create_invoice).collect::<Result<Vec<_>>>()?;
    info!(
        "Built {} invoice(s) with {} line(s).",
        invoices.len(),
        invoices.iter().map(|i| i.lines.len()).sum::<usize>()
    );
    Ok(invoices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ConvertConfig::default();
        assert!(config.verify_input);
        assert_eq!(config.encoding, "gbk");
    }
}
