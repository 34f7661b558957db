use std::collections::HashSet;

use super::error::{FapiaoError, Result};
use super::fields::HeaderField;
use super::grouping::InvoiceGroup;

/// Check that each of `fields` holds exactly one distinct non-absent value
/// across the rows of `group`.
///
/// A field that is empty on every row fails with a count of 0, conflicting
/// values fail with the number of distinct values found.
pub fn verify_unique(group: &InvoiceGroup<'_>, fields: &[HeaderField]) -> Result<()> {
    for field in fields {
        let column = field.column();
        let distinct: HashSet<_> = group.column(column).filter_map(|value| value.key()).collect();

        if distinct.len() != 1 {
            return Err(FapiaoError::Validation {
                document_number: group.document_number().to_string(),
                field: column,
                count: distinct.len(),
            });
        }
    }
    Ok(())
}

/// [`verify_unique`] over the fixed set of invoice-level columns
/// (purchaser name, purchaser tax ID, product-code version, tax-inclusion flag).
pub fn verify_header_unique(group: &InvoiceGroup<'_>) -> Result<()> {
    verify_unique(group, &HeaderField::UNIQUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellValue, TableBuilder, group_by_invoice_number};

    fn header_table(rows: &[[CellValue; 5]]) -> crate::core::Table {
        let mut builder = TableBuilder::new(["单据号", "购方名称", "购方税号", "商品编码版本号", "含税标志"]);
        for row in rows {
            builder = builder.row(row.clone());
        }
        builder.build().unwrap()
    }

    #[test]
    fn repeated_or_first_row_only_values_pass() {
        let table = header_table(&[
            ["A".into(), "甲公司".into(), "9144".into(), CellValue::Float(33.0), CellValue::Int(1)],
            ["A".into(), CellValue::Empty, "9144".into(), CellValue::Empty, CellValue::Empty],
        ]);
        let groups = group_by_invoice_number(&table).unwrap();
        verify_header_unique(&groups[0]).unwrap();
    }

    #[test]
    fn conflicting_purchaser_names() {
        let table = header_table(&[
            ["A".into(), "甲公司".into(), "9144".into(), CellValue::Float(33.0), CellValue::Int(1)],
            ["A".into(), "乙公司".into(), "9144".into(), CellValue::Float(33.0), CellValue::Int(1)],
        ]);
        let groups = group_by_invoice_number(&table).unwrap();
        match verify_header_unique(&groups[0]) {
            Err(FapiaoError::Validation { document_number, field, count }) => {
                assert_eq!(document_number, "A");
                assert_eq!(field, "购方名称");
                assert_eq!(count, 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn field_missing_everywhere() {
        let table = header_table(&[[
            "A".into(),
            "甲公司".into(),
            CellValue::Empty,
            CellValue::Float(33.0),
            CellValue::Int(0),
        ]]);
        let groups = group_by_invoice_number(&table).unwrap();
        let err = verify_header_unique(&groups[0]).unwrap_err();
        assert!(matches!(err, FapiaoError::Validation { field: "购方税号", count: 0, .. }));
    }

    #[test]
    fn only_requested_fields_are_checked() {
        let table = header_table(&[
            ["A".into(), "甲公司".into(), CellValue::Empty, CellValue::Float(33.0), CellValue::Int(0)],
        ]);
        let groups = group_by_invoice_number(&table).unwrap();
        verify_unique(&groups[0], &[HeaderField::PurchaserName]).unwrap();
    }
}
