//! Translation of human-readable flag text into the numeric codes the
//! invoicing software expects.

use log::debug;

use super::fields::{HeaderField, LineField};
use super::table::Table;
use super::value::CellValue;

/// Text → code table of one flag column.
pub struct Translation {
    pub column: &'static str,
    pub codes: &'static [(&'static str, i64)],
}

/// Known flag translations.
///
/// 零税率标识 has no defined table yet: its values pass through unchanged.
pub const TRANSLATIONS: [Translation; 3] = [
    Translation {
        column: HeaderField::TaxInclusionFlag.column(),
        codes: &[("含税", 1), ("不含税", 0), ("差额税", 2)],
    },
    Translation {
        column: LineField::PreferentialFlag.column(),
        codes: &[("不使用", 0), ("使用", 1)],
    },
    Translation {
        column: LineField::ZeroTaxFlag.column(),
        codes: &[],
    },
];

impl Translation {
    pub fn lookup(&self, text: &str) -> Option<i64> {
        self.codes.iter().find(|(t, _)| *t == text).map(|(_, code)| *code)
    }
}

/// Replace human-readable flag text with numeric codes, in place.
///
/// Only exact matches are replaced; anything else, including numbers that
/// are already codes, is left alone. Columns missing from the table are
/// skipped.
pub fn translate_human_readable_marks(table: &mut Table) {
    for translation in &TRANSLATIONS {
        let Some(cells) = table.column_cells_mut(translation.column) else {
            continue;
        };

        let mut replaced = 0usize;
        for cell in cells {
            if let CellValue::String(text) = cell {
                if let Some(code) = translation.lookup(text) {
                    *cell = CellValue::Int(code);
                    replaced += 1;
                }
            }
        }
        debug!("Translated {replaced} {} value(s) to codes.", translation.column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TableBuilder;

    #[test]
    fn flags_are_translated() {
        let mut table = TableBuilder::new(["含税标志", "优惠政策标识", "零税率标识"])
            .row(["含税".into(), "使用".into(), "免税".into()])
            .row(["不含税".into(), "不使用".into(), CellValue::Int(1)])
            .row(["差额税".into(), CellValue::Empty, CellValue::Empty])
            .row([CellValue::Int(1), "其他".into(), CellValue::Empty])
            .build()
            .unwrap();

        translate_human_readable_marks(&mut table);

        let flags: Vec<_> = table.rows().map(|r| r.get("含税标志").clone()).collect();
        assert_eq!(
            flags,
            [CellValue::Int(1), CellValue::Int(0), CellValue::Int(2), CellValue::Int(1)]
        );

        let preferential: Vec<_> = table.rows().map(|r| r.get("优惠政策标识").clone()).collect();
        assert_eq!(
            preferential,
            [CellValue::Int(1), CellValue::Int(0), CellValue::Empty, "其他".into()]
        );

        // Zero-tax flag has no translation table.
        assert_eq!(table.row(0).unwrap().get("零税率标识"), &CellValue::from("免税"));
    }

    #[test]
    fn missing_columns_are_skipped() {
        let mut table = TableBuilder::new(["单据号"]).row(["A".into()]).build().unwrap();
        translate_human_readable_marks(&mut table);
        assert_eq!(table.row(0).unwrap().get("单据号"), &CellValue::from("A"));
    }
}
