//! Import XML for the invoicing software (root element `Kp`).
//!
//! [`assemble`] turns invoice records into an element tree,
//! [`to_xml_bytes`] writes that tree in the legacy encoding the importer
//! reads (GBK by default).
//!
//! # Example
//!
//! ```
//! use fapiao::core::*;
//! use fapiao::xml;
//!
//! let table = TableBuilder::new([
//!     "单据号", "购方名称", "购方税号", "商品编码版本号", "含税标志",
//!     "序号", "商品名称", "商品编码", "数量", "单价", "税率",
//! ])
//! .row([
//!     "A1".into(), "珠海市教育局".into(), "91440400".into(), CellValue::Float(33.0), CellValue::Int(0),
//!     CellValue::Int(1), "钢笔".into(), "33".into(), CellValue::Int(10), CellValue::Float(1.5), CellValue::Float(0.13),
//! ])
//! .build()
//! .unwrap();
//!
//! let bytes = xml::convert_table(&table, &ConvertConfig::default()).unwrap();
//! assert!(bytes.starts_with(b"<?xml version='1.0' encoding='gbk'?>"));
//! ```

mod tree;
mod writer;

pub use tree::{XmlElement, assemble};
pub use writer::{to_xml_bytes, to_xml_string};

use crate::core::{ConvertConfig, Result, Table, build_invoices};

/// Interface version written to `Kp/Version`.
pub const INTERFACE_VERSION: &str = "2.0";

/// Build, assemble and serialize a whole table. All or nothing: any invalid
/// invoice fails the call.
pub fn convert_table(table: &Table, config: &ConvertConfig) -> Result<Vec<u8>> {
    let invoices = build_invoices(table, config)?;
    let tree = assemble(&invoices);
    to_xml_bytes(&tree, &config.encoding)
}
