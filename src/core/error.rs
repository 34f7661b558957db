use thiserror::Error;

/// Errors that can occur while converting an invoice table.
///
/// Every variant is fatal to the whole conversion: no partial output is
/// produced once any invoice fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FapiaoError {
    /// A required header or line-item field resolved to absent.
    #[error("单据号 {document_number} ({label}): 字段 <{field}> 是必填项, 但是该项为空值")]
    MissingRequiredField {
        /// Document number (单据号) of the offending invoice.
        document_number: String,
        /// Purchaser name or item name, whichever identifies the record.
        label: String,
        /// Source column header of the missing field.
        field: &'static str,
    },

    /// A header column that must be constant within an invoice has zero or
    /// several distinct values.
    #[error("单据号 {document_number} 数据错误: 列 {field} 数值不唯一(或缺少数据) 共有 {count} 个数据")]
    Validation {
        document_number: String,
        field: &'static str,
        count: usize,
    },

    /// A numeric field holds a value that cannot be read as a number.
    #[error("单据号 {document_number} ({label}): 字段 <{field}> 不是数值: {value:?}")]
    InvalidNumber {
        document_number: String,
        label: String,
        field: &'static str,
        value: String,
    },

    /// An item code that is not an integer once padded to 19 digits.
    #[error("单据号 {document_number} ({label}): 商品编码 {value:?} 不是有效的数字编码")]
    InvalidItemCode {
        document_number: String,
        label: String,
        value: String,
    },

    /// The input table lacks a column the conversion cannot do without.
    #[error("missing column: {0}")]
    MissingColumn(&'static str),

    /// The input table is malformed (ragged rows, duplicate headers, ...).
    #[error("table error: {0}")]
    Table(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Unknown output encoding or encoding failure.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The spreadsheet could not be opened or read.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FapiaoError>;
