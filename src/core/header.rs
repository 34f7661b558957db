use serde::{Deserialize, Serialize};

use super::error::{FapiaoError, Result};
use super::fields::HeaderField;
use super::grouping::InvoiceGroup;
use super::value::{CellValue, normalize};

const UNKNOWN_PURCHASER: &str = "(无购方名称)";

/// 含税标志: whether unit prices in the source already include tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxInclusion {
    /// 不含税
    Exclusive,
    /// 含税
    Inclusive,
    /// 差额税
    Difference,
}

impl TaxInclusion {
    pub fn code(self) -> i64 {
        match self {
            TaxInclusion::Exclusive => 0,
            TaxInclusion::Inclusive => 1,
            TaxInclusion::Difference => 2,
        }
    }

    /// Interpret a numeric flag cell. Text is not interpreted here; run
    /// [`translate_human_readable_marks`](super::translate_human_readable_marks) first.
    pub fn from_value(value: &CellValue) -> Option<Self> {
        let code = value.as_number()?;
        [TaxInclusion::Exclusive, TaxInclusion::Inclusive, TaxInclusion::Difference]
            .into_iter()
            .find(|t| t.code() as f64 == code)
    }
}

/// Purchaser and invoice-level data, one per invoice.
///
/// Values are kept exactly as read so they serialize the way they were
/// entered (a tax ID typed as a number stays a number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderRecord {
    /// 购方名称
    pub purchaser_name: CellValue,
    /// 购方税号
    pub purchaser_tax_id: CellValue,
    /// 购方银行账号
    pub purchaser_bank_account: Option<CellValue>,
    /// 购方地址电话
    pub purchaser_address_phone: Option<CellValue>,
    /// 备注
    pub remark: Option<CellValue>,
    /// 复核人
    pub reviewer: Option<CellValue>,
    /// 收款人
    pub payee: Option<CellValue>,
    /// 商品编码版本号
    pub product_code_version: CellValue,
    /// 含税标志, stored as provided.
    pub tax_inclusion_flag: CellValue,
}

impl HeaderRecord {
    pub fn value(&self, field: HeaderField) -> Option<&CellValue> {
        match field {
            HeaderField::PurchaserName => Some(&self.purchaser_name),
            HeaderField::PurchaserTaxId => Some(&self.purchaser_tax_id),
            HeaderField::PurchaserBankAccount => self.purchaser_bank_account.as_ref(),
            HeaderField::PurchaserAddressPhone => self.purchaser_address_phone.as_ref(),
            HeaderField::Remark => self.remark.as_ref(),
            HeaderField::Reviewer => self.reviewer.as_ref(),
            HeaderField::Payee => self.payee.as_ref(),
            HeaderField::ProductCodeVersion => Some(&self.product_code_version),
            HeaderField::TaxInclusionFlag => Some(&self.tax_inclusion_flag),
        }
    }

    pub fn tax_inclusion(&self) -> Option<TaxInclusion> {
        TaxInclusion::from_value(&self.tax_inclusion_flag)
    }

    /// `(tag, text)` pairs in emission order; `None` text for absent values.
    pub fn xml_fields(&self) -> Vec<(&'static str, Option<String>)> {
        HeaderField::ALL
            .iter()
            .map(|&field| (field.spec().tag, self.value(field).map(ToString::to_string)))
            .collect()
    }
}

/// Header values pulled from a group before any requirement is checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderDraft {
    pub purchaser_name: Option<CellValue>,
    pub purchaser_tax_id: Option<CellValue>,
    pub purchaser_bank_account: Option<CellValue>,
    pub purchaser_address_phone: Option<CellValue>,
    pub remark: Option<CellValue>,
    pub reviewer: Option<CellValue>,
    pub payee: Option<CellValue>,
    pub product_code_version: Option<CellValue>,
    pub tax_inclusion_flag: Option<CellValue>,
}

impl HeaderDraft {
    /// Take the first non-absent value of each header column, in row order.
    pub fn extract(group: &InvoiceGroup<'_>) -> Self {
        let take = |field: HeaderField| {
            group
                .column(field.column())
                .find(|value| !value.is_absent())
                .cloned()
                .map(normalize)
        };

        Self {
            purchaser_name: take(HeaderField::PurchaserName),
            purchaser_tax_id: take(HeaderField::PurchaserTaxId),
            purchaser_bank_account: take(HeaderField::PurchaserBankAccount),
            purchaser_address_phone: take(HeaderField::PurchaserAddressPhone),
            remark: take(HeaderField::Remark),
            reviewer: take(HeaderField::Reviewer),
            payee: take(HeaderField::Payee),
            product_code_version: take(HeaderField::ProductCodeVersion),
            tax_inclusion_flag: take(HeaderField::TaxInclusionFlag),
        }
    }

    /// Check required fields and produce the immutable record.
    pub fn validate(self, document_number: &str) -> Result<HeaderRecord> {
        let label = self
            .purchaser_name
            .as_ref()
            .map_or_else(|| UNKNOWN_PURCHASER.to_string(), ToString::to_string);

        let require = |value: Option<CellValue>, field: HeaderField| {
            value.ok_or_else(|| FapiaoError::MissingRequiredField {
                document_number: document_number.to_string(),
                label: label.clone(),
                field: field.column(),
            })
        };

        Ok(HeaderRecord {
            purchaser_name: require(self.purchaser_name, HeaderField::PurchaserName)?,
            purchaser_tax_id: require(self.purchaser_tax_id, HeaderField::PurchaserTaxId)?,
            purchaser_bank_account: self.purchaser_bank_account,
            purchaser_address_phone: self.purchaser_address_phone,
            remark: self.remark,
            reviewer: self.reviewer,
            payee: self.payee,
            product_code_version: require(self.product_code_version, HeaderField::ProductCodeVersion)?,
            tax_inclusion_flag: require(self.tax_inclusion_flag, HeaderField::TaxInclusionFlag)?,
        })
    }
}

/// Build the header record of one invoice.
pub fn build_header(group: &InvoiceGroup<'_>) -> Result<HeaderRecord> {
    HeaderDraft::extract(group).validate(&group.document_number().to_string())
}
