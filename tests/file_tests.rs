#![cfg(all(feature = "xlsx", feature = "xml"))]

use std::fs;
use std::path::Path;

use calamine::{Data, Range};
use fapiao::core::*;
use fapiao::{convert_file, xlsx, xml};
use tempfile::TempDir;

fn sheet(rows: &[&[Data]]) -> Range<Data> {
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
    let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width - 1));
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            range.set_value((r as u32, c as u32), cell.clone());
        }
    }
    range
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn s(text: &str) -> Data {
    Data::String(text.to_string())
}

#[test]
fn missing_input_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.xml");

    let err = convert_file(dir.path().join("missing.xlsx"), &output, &ConvertConfig::default()).unwrap_err();
    assert!(matches!(err, FapiaoError::Spreadsheet(_)));
    assert!(!output.exists());
}

#[test]
fn unreadable_workbook_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xlsx");
    fs::write(&input, b"not a workbook").unwrap();
    let output = dir.path().join("out.xml");

    assert!(convert_file(&input, &output, &ConvertConfig::default()).is_err());
    assert!(!output.exists());
}

#[test]
fn sheet_to_gbk_file() {
    let range = sheet(&[
        &[
            s("单据号"),
            s("购方名称"),
            s("购方税号"),
            s("商品编码版本号"),
            s("含税标志"),
            s("序号"),
            s("商品名称"),
            s("商品编码"),
            s("数量"),
            s("单价"),
            s("税率"),
            s("优惠政策标识"),
        ],
        &[
            s("DJ001"),
            s("珠海市教育局"),
            s("91440400MA4UH0XXXX"),
            Data::Float(33.0),
            s("含税"),
            Data::Float(1.0),
            s("钢笔"),
            Data::Float(1060101.0),
            Data::Float(10.0),
            Data::Float(1.13),
            Data::Float(0.13),
            s("不使用"),
        ],
    ]);

    let mut table = xlsx::range_to_table(&range).unwrap();
    translate_human_readable_marks(&mut table);
    let bytes = xml::convert_table(&table, &ConvertConfig::default()).unwrap();

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.xml");
    fs::write(&output, &bytes).unwrap();

    let written = fs::read(&output).unwrap();
    let (text, _, errors) = encoding_rs::GBK.decode(&written);
    assert!(!errors);
    assert!(text.starts_with("<?xml version='1.0' encoding='gbk'?>\n<Kp>"));
    assert!(text.contains("<Hsbz>1</Hsbz>"));
    assert!(text.contains("<Spbm>1060101000000000000</Spbm>"));
    assert!(text.contains("<Dj>1.0</Dj>"));
    assert!(text.contains("<Syyhzcbz>0</Syyhzcbz>"));
}

#[test]
fn read_template_workbook() {
    let table = xlsx::read_table(fixture("invoice_template.xlsx")).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.columns()[0], "单据号");
    let first = table.row(0).unwrap();
    let second = table.row(1).unwrap();
    assert_eq!(first.get("序号"), &CellValue::Int(1));
    assert_eq!(first.get("商品编码"), &CellValue::Int(1060101));
    assert_eq!(first.get("商品编码版本号"), &CellValue::Float(33.0));
    assert_eq!(first.get("含税标志"), &CellValue::from("含税"));
    assert_eq!(second.get("购方名称"), &CellValue::Empty);
    assert_eq!(second.get("单价"), &CellValue::Float(11.3));
}

#[test]
fn convert_template_workbook() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("invoices.xml");

    convert_file(fixture("invoice_template.xlsx"), &output, &ConvertConfig::default()).unwrap();

    let written = fs::read(&output).unwrap();
    let (text, _, errors) = encoding_rs::GBK.decode(&written);
    assert!(!errors);
    let expected = concat!(
        "<?xml version='1.0' encoding='gbk'?>\n",
        "<Kp><Version>2.0</Version><Fpxx><Zsl>1</Zsl><Fpsj><Fp>",
        "<Djh>1</Djh>",
        "<Gfmc>珠海市教育局</Gfmc><Gfsh>91440400MA4UH0XXXX</Gfsh><Gfyhzh />",
        "<Gfdzdh /><Bz /><Fhr /><Skr />",
        "<Spbmbbh>33.0</Spbmbbh><Hsbz>1</Hsbz>",
        "<Spxx>",
        "<Sph><Xh>1</Xh><Spmc>钢笔</Spmc><Ggxh /><Jldw />",
        "<Spbm>1060101000000000000</Spbm><Sl>10.0</Sl><Dj>1.0</Dj><Slv>0.13</Slv>",
        "<Kce /><Qyspbm /><Syyhzcbz /><Lslbz /><Yhzcsm /><Je>10.0</Je></Sph>",
        "<Sph><Xh>2</Xh><Spmc>笔记本</Spmc><Ggxh /><Jldw />",
        "<Spbm>1060102000000000000</Spbm><Sl>2.0</Sl><Dj>10.0</Dj><Slv>0.13</Slv>",
        "<Kce /><Qyspbm /><Syyhzcbz /><Lslbz /><Yhzcsm /><Je>20.0</Je></Sph>",
        "</Spxx></Fp></Fpsj></Fpxx></Kp>",
    );
    assert_eq!(text, expected);
}
