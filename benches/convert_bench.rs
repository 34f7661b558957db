use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fapiao::core::fields::template_columns;
use fapiao::core::*;
use fapiao::xml;

fn row(values: &[(&str, CellValue)]) -> Vec<CellValue> {
    template_columns()
        .into_iter()
        .map(|column| {
            values
                .iter()
                .find(|(c, _)| *c == column)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        })
        .collect()
}

/// `lines` rows spread over invoices of ten lines each, tax-inclusive.
fn build_table(lines: usize) -> Table {
    let mut builder = TableBuilder::new(template_columns());
    for i in 0..lines {
        builder = builder.row(row(&[
            ("单据号", format!("DJ{:05}", i / 10).into()),
            ("购方名称", "珠海市教育局".into()),
            ("购方税号", "91440400MA4UH0XXXX".into()),
            ("购方地址电话", "香洲人民东路112号".into()),
            ("商品编码版本号", CellValue::Float(33.0)),
            ("含税标志", "含税".into()),
            ("序号", CellValue::Int((i % 10 + 1) as i64)),
            ("商品名称", format!("商品{i}").into()),
            ("计量单位", "个".into()),
            ("商品编码", CellValue::Int(1060101)),
            ("数量", CellValue::Int(2)),
            ("单价", CellValue::Float(9.99)),
            ("税率", CellValue::Float(0.13)),
            ("优惠政策标识", "不使用".into()),
        ]));
    }
    let mut table = builder.build().unwrap();
    translate_human_readable_marks(&mut table);
    table
}

fn bench_build_invoices(c: &mut Criterion) {
    let table = build_table(1000);
    let config = ConvertConfig::default();
    c.bench_function("build_invoices_1000_rows", |b| {
        b.iter(|| black_box(build_invoices(black_box(&table), &config)));
    });
}

fn bench_convert_table(c: &mut Criterion) {
    let table = build_table(1000);
    let config = ConvertConfig::default();
    c.bench_function("convert_table_1000_rows", |b| {
        b.iter(|| black_box(xml::convert_table(black_box(&table), &config)));
    });
}

fn bench_serialize(c: &mut Criterion) {
    let table = build_table(1000);
    let invoices = build_invoices(&table, &ConvertConfig::default()).unwrap();
    let tree = xml::assemble(&invoices);
    c.bench_function("to_xml_bytes_gbk", |b| {
        b.iter(|| black_box(xml::to_xml_bytes(black_box(&tree), "gbk")));
    });
}

fn bench_translate(c: &mut Criterion) {
    let table = build_table(1000);
    c.bench_function("translate_human_readable_marks", |b| {
        b.iter(|| {
            let mut t = table.clone();
            translate_human_readable_marks(&mut t);
            black_box(t)
        });
    });
}

criterion_group!(
    benches,
    bench_build_invoices,
    bench_convert_table,
    bench_serialize,
    bench_translate,
);
criterion_main!(benches);
