use serde::{Deserialize, Serialize};

use super::error::{FapiaoError, Result};
use super::fields::{LINE_AMOUNT_TAG, LineField};
use super::grouping::InvoiceGroup;
use super::header::TaxInclusion;
use super::table::RawRow;
use super::value::{CellValue, format_float, normalize};

/// Decimal places kept when a tax-inclusive price is converted to tax-exclusive.
pub const PRICE_DIGITS: usize = 8;

/// Width of a 商品编码 (tax classification code).
pub const ITEM_CODE_WIDTH: usize = 19;

const UNKNOWN_ITEM: &str = "(无商品名称)";

/// One goods line (Sph) of an invoice.
///
/// `unit_price` is always tax-exclusive, whatever the basis of the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRecord {
    /// 序号
    pub sequence_number: CellValue,
    /// 商品名称
    pub item_name: CellValue,
    /// 规格型号
    pub spec_model: Option<CellValue>,
    /// 计量单位
    pub unit: Option<CellValue>,
    /// 商品编码, padded to 19 digits and in canonical integer form.
    pub item_code: String,
    /// 数量
    pub quantity: f64,
    /// 单价 (tax-exclusive)
    pub unit_price: f64,
    /// 税率
    pub tax_rate: Option<CellValue>,
    /// 扣除额
    pub deduction: Option<CellValue>,
    /// 企业商品自编码
    pub enterprise_code: Option<CellValue>,
    /// 优惠政策标识
    pub preferential_flag: Option<CellValue>,
    /// 零税率标识
    pub zero_tax_flag: Option<CellValue>,
    /// 优惠政策说明
    pub preferential_description: Option<CellValue>,
    /// 金额 = quantity × unit_price, computed once.
    pub line_amount: f64,
}

impl LineItemRecord {
    /// Text of a mapped field, `None` when absent.
    pub fn text(&self, field: LineField) -> Option<String> {
        let value = match field {
            LineField::SequenceNumber => Some(&self.sequence_number),
            LineField::ItemName => Some(&self.item_name),
            LineField::SpecModel => self.spec_model.as_ref(),
            LineField::Unit => self.unit.as_ref(),
            LineField::ItemCode => return Some(self.item_code.clone()),
            LineField::Quantity => return Some(format_float(self.quantity)),
            LineField::UnitPrice => return Some(format_float(self.unit_price)),
            LineField::TaxRate => self.tax_rate.as_ref(),
            LineField::Deduction => self.deduction.as_ref(),
            LineField::EnterpriseCode => self.enterprise_code.as_ref(),
            LineField::PreferentialFlag => self.preferential_flag.as_ref(),
            LineField::ZeroTaxFlag => self.zero_tax_flag.as_ref(),
            LineField::PreferentialDescription => self.preferential_description.as_ref(),
        };
        value.map(ToString::to_string)
    }

    /// `(tag, text)` pairs in emission order, line amount last.
    pub fn xml_fields(&self) -> Vec<(&'static str, Option<String>)> {
        let mut fields: Vec<_> = LineField::ALL
            .iter()
            .map(|&field| (field.spec().tag, self.text(field)))
            .collect();
        fields.push((LINE_AMOUNT_TAG, Some(format_float(self.line_amount))));
        fields
    }
}

/// Line values pulled from a row before any requirement is checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemDraft {
    pub sequence_number: Option<CellValue>,
    pub item_name: Option<CellValue>,
    pub spec_model: Option<CellValue>,
    pub unit: Option<CellValue>,
    pub item_code: Option<CellValue>,
    pub quantity: Option<CellValue>,
    pub unit_price: Option<CellValue>,
    pub tax_rate: Option<CellValue>,
    pub deduction: Option<CellValue>,
    pub enterprise_code: Option<CellValue>,
    pub preferential_flag: Option<CellValue>,
    pub zero_tax_flag: Option<CellValue>,
    pub preferential_description: Option<CellValue>,
}

impl LineItemDraft {
    pub fn extract(row: &RawRow<'_>) -> Self {
        let take = |field: LineField| {
            Some(normalize(row.get(field.column()).clone())).filter(|value| !value.is_absent())
        };

        Self {
            sequence_number: take(LineField::SequenceNumber),
            item_name: take(LineField::ItemName),
            spec_model: take(LineField::SpecModel),
            unit: take(LineField::Unit),
            item_code: take(LineField::ItemCode),
            quantity: take(LineField::Quantity),
            unit_price: take(LineField::UnitPrice),
            tax_rate: take(LineField::TaxRate),
            deduction: take(LineField::Deduction),
            enterprise_code: take(LineField::EnterpriseCode),
            preferential_flag: take(LineField::PreferentialFlag),
            zero_tax_flag: take(LineField::ZeroTaxFlag),
            preferential_description: take(LineField::PreferentialDescription),
        }
    }

    /// Check required fields, coerce numbers, normalize the item code and
    /// back out tax from the unit price when the source is tax-inclusive.
    pub fn validate(self, document_number: &str, tax_inclusive: bool) -> Result<LineItemRecord> {
        let label = self
            .item_name
            .as_ref()
            .map_or_else(|| UNKNOWN_ITEM.to_string(), ToString::to_string);

        let missing = |field: LineField| FapiaoError::MissingRequiredField {
            document_number: document_number.to_string(),
            label: label.clone(),
            field: field.column(),
        };
        let require = |value: Option<CellValue>, field: LineField| value.ok_or_else(|| missing(field));
        let invalid = |value: String, field: LineField| FapiaoError::InvalidNumber {
            document_number: document_number.to_string(),
            label: label.clone(),
            field: field.column(),
            value,
        };
        let number = |value: &CellValue, field: LineField| {
            value
                .to_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid(value.to_string(), field))
        };

        let sequence_number = require(self.sequence_number, LineField::SequenceNumber)?;
        let item_name = require(self.item_name, LineField::ItemName)?;
        let item_code = require(self.item_code, LineField::ItemCode)?;
        let quantity = require(self.quantity, LineField::Quantity)?;
        let unit_price = require(self.unit_price, LineField::UnitPrice)?;

        let quantity = number(&quantity, LineField::Quantity)?;
        let mut unit_price = number(&unit_price, LineField::UnitPrice)?;

        let code_text = item_code.code_text();
        let item_code = pad_item_code(&code_text).ok_or_else(|| FapiaoError::InvalidItemCode {
            document_number: document_number.to_string(),
            label: label.clone(),
            value: code_text,
        })?;

        if tax_inclusive {
            let rate = self.tax_rate.as_ref().ok_or_else(|| missing(LineField::TaxRate))?;
            let rate_value = number(rate, LineField::TaxRate)?;
            unit_price = round_price(unit_price / (1.0 + rate_value));
            if !unit_price.is_finite() {
                return Err(invalid(rate.to_string(), LineField::TaxRate));
            }
        }

        let line_amount = quantity * unit_price;
        if !line_amount.is_finite() {
            return Err(invalid(format_float(quantity), LineField::Quantity));
        }

        Ok(LineItemRecord {
            sequence_number,
            item_name,
            spec_model: self.spec_model,
            unit: self.unit,
            item_code,
            quantity,
            unit_price,
            tax_rate: self.tax_rate,
            deduction: self.deduction,
            enterprise_code: self.enterprise_code,
            preferential_flag: self.preferential_flag,
            zero_tax_flag: self.zero_tax_flag,
            preferential_description: self.preferential_description,
            line_amount,
        })
    }
}

/// Build one line item per row of `group`, preserving row order.
///
/// Prices are converted to tax-exclusive only when `tax_inclusion_flag` is 1 (含税).
pub fn build_line_items(
    group: &InvoiceGroup<'_>,
    tax_inclusion_flag: &CellValue,
) -> Result<Vec<LineItemRecord>> {
    let document_number = group.document_number().to_string();
    let tax_inclusive = TaxInclusion::from_value(tax_inclusion_flag) == Some(TaxInclusion::Inclusive);

    group
        .rows()
        .iter()
        .map(|row| LineItemDraft::extract(row).validate(&document_number, tax_inclusive))
        .collect()
}

/// Round to [`PRICE_DIGITS`] decimal places, ties to even on the exact
/// binary value (so 2.675 rounds down, being slightly below the tie).
pub fn round_price(value: f64) -> f64 {
    round_digits(value, PRICE_DIGITS)
}

pub(crate) fn round_digits(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Float formatting rounds the exact value correctly, ties to even.
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Right-pad a code with `0` to 19 characters and read it back as an integer.
///
/// Codes already 19 characters or longer are not padded. Returns the
/// canonical decimal text of the integer, or `None` when the padded text
/// is not an integer.
pub fn pad_item_code(code: &str) -> Option<String> {
    let padded = format!("{code:0<ITEM_CODE_WIDTH$}");
    integer_text(&padded)
}

fn integer_text(text: &str) -> Option<String> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: String = digits.chars().map(decimal_digit).collect::<Option<_>>()?;
    if digits.is_empty() {
        return None;
    }

    let significant = digits.trim_start_matches('0');
    Some(match (significant.is_empty(), negative) {
        (true, _) => "0".to_string(),
        (false, true) => format!("-{significant}"),
        (false, false) => significant.to_string(),
    })
}

/// ASCII or full-width (`０`-`９`) decimal digit, as its ASCII form.
fn decimal_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '０'..='９' => char::from_digit(c as u32 - '０' as u32, 10),
        _ => None,
    }
}
