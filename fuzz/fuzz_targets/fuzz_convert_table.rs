#![no_main]

use fapiao::core::fields::template_columns;
use fapiao::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Each line is a row, tab-separated cells in template column order;
    // cells that parse as numbers become numbers.
    let columns = template_columns();
    let mut builder = TableBuilder::new(columns.clone());
    for line in s.lines() {
        let mut cells: Vec<CellValue> = line
            .split('\t')
            .take(columns.len())
            .map(|cell| {
                if cell.is_empty() {
                    CellValue::Empty
                } else if let Ok(v) = cell.parse::<i64>() {
                    CellValue::Int(v)
                } else if let Ok(v) = cell.parse::<f64>() {
                    CellValue::Float(v)
                } else {
                    cell.into()
                }
            })
            .collect();
        cells.resize(columns.len(), CellValue::Empty);
        builder = builder.row(cells);
    }

    // Must not panic; errors are fine.
    if let Ok(mut table) = builder.build() {
        translate_human_readable_marks(&mut table);
        let _ = fapiao::xml::convert_table(&table, &ConvertConfig::default());
    }
});
