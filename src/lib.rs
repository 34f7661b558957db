//! # fapiao
//!
//! Converts an invoice line-item spreadsheet, laid out by a fixed template,
//! into the XML import document of Chinese VAT invoicing software.
//!
//! Pipeline: table → group rows by 单据号 → verify invoice-level columns →
//! build header and line-item records (tax-inclusive prices are converted
//! to tax-exclusive) → assemble the `Kp` tree → encode as GBK.
//!
//! ## Quick Start
//!
//! ```rust
//! use fapiao::core::*;
//!
//! let table = TableBuilder::new([
//!     "单据号", "购方名称", "购方税号", "商品编码版本号", "含税标志",
//!     "序号", "商品名称", "商品编码", "数量", "单价", "税率",
//! ])
//! .row([
//!     "A1".into(), "珠海市教育局".into(), "91440400".into(), CellValue::Float(33.0), CellValue::Int(1),
//!     CellValue::Int(1), "钢笔".into(), "33".into(), CellValue::Int(10), CellValue::Float(1.05), CellValue::Float(0.05),
//! ])
//! .build()
//! .unwrap();
//!
//! let invoices = build_invoices(&table, &ConvertConfig::default()).unwrap();
//! assert_eq!(invoices[0].lines[0].unit_price, 1.0);
//! assert_eq!(invoices[0].lines[0].item_code, "3300000000000000000");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Table model, column mapping, grouping, validation, records |
//! | `xml` | `Kp` tree assembly and GBK serialization |
//! | `xlsx` | Spreadsheet reader |
//! | `cli` | `fapiao` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "xlsx")]
pub mod xlsx;

#[cfg(all(feature = "xml", feature = "xlsx"))]
mod convert;

#[cfg(all(feature = "xml", feature = "xlsx"))]
pub use convert::convert_file;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
