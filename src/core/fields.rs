//! The fixed template layout: which spreadsheet column feeds which record
//! field, and which XML tag it is emitted under.
//!
//! The tables are immutable statics, so every part of the pipeline reads the
//! same single source of truth.

/// Column header of the document number (单据号) that groups rows into invoices.
pub const DOCUMENT_NUMBER_COLUMN: &str = "单据号";

/// Column header of the derived line amount. Never read from the input.
pub const LINE_AMOUNT_COLUMN: &str = "金额";

/// XML tag of the derived line amount, emitted after every mapped line field.
pub const LINE_AMOUNT_TAG: &str = "Je";

/// How a raw cell is coerced when a record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Kept exactly as read.
    AsIs,
    /// Converted to a float.
    Float,
    /// Rendered as text, right-padded with `0` to 19 digits and re-read as an integer.
    ItemCode,
}

/// One entry of the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Semantic field name.
    pub name: &'static str,
    /// Source spreadsheet column header.
    pub column: &'static str,
    /// Destination XML element tag.
    pub tag: &'static str,
    pub required: bool,
    pub coercion: Coercion,
}

const fn field(
    name: &'static str,
    column: &'static str,
    tag: &'static str,
    required: bool,
    coercion: Coercion,
) -> FieldSpec {
    FieldSpec { name, column, tag, required, coercion }
}

/// Semantic header fields, in XML emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    PurchaserName,
    PurchaserTaxId,
    PurchaserBankAccount,
    PurchaserAddressPhone,
    Remark,
    Reviewer,
    Payee,
    ProductCodeVersion,
    TaxInclusionFlag,
}

impl HeaderField {
    pub const ALL: [HeaderField; 9] = [
        HeaderField::PurchaserName,
        HeaderField::PurchaserTaxId,
        HeaderField::PurchaserBankAccount,
        HeaderField::PurchaserAddressPhone,
        HeaderField::Remark,
        HeaderField::Reviewer,
        HeaderField::Payee,
        HeaderField::ProductCodeVersion,
        HeaderField::TaxInclusionFlag,
    ];

    /// Header fields that must hold exactly one distinct value per invoice.
    pub const UNIQUE: [HeaderField; 4] = [
        HeaderField::PurchaserName,
        HeaderField::PurchaserTaxId,
        HeaderField::ProductCodeVersion,
        HeaderField::TaxInclusionFlag,
    ];

    pub const fn spec(self) -> FieldSpec {
        use Coercion::AsIs;
        match self {
            HeaderField::PurchaserName => field("purchaser_name", "购方名称", "Gfmc", true, AsIs),
            HeaderField::PurchaserTaxId => field("purchaser_tax_id", "购方税号", "Gfsh", true, AsIs),
            HeaderField::PurchaserBankAccount => {
                field("purchaser_bank_account", "购方银行账号", "Gfyhzh", false, AsIs)
            }
            HeaderField::PurchaserAddressPhone => {
                field("purchaser_address_phone", "购方地址电话", "Gfdzdh", false, AsIs)
            }
            HeaderField::Remark => field("remark", "备注", "Bz", false, AsIs),
            HeaderField::Reviewer => field("reviewer", "复核人", "Fhr", false, AsIs),
            HeaderField::Payee => field("payee", "收款人", "Skr", false, AsIs),
            HeaderField::ProductCodeVersion => {
                field("product_code_version", "商品编码版本号", "Spbmbbh", true, AsIs)
            }
            HeaderField::TaxInclusionFlag => {
                field("tax_inclusion_flag", "含税标志", "Hsbz", true, AsIs)
            }
        }
    }

    pub const fn column(self) -> &'static str {
        self.spec().column
    }
}

/// Semantic line-item fields, in XML emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    SequenceNumber,
    ItemName,
    SpecModel,
    Unit,
    ItemCode,
    Quantity,
    UnitPrice,
    TaxRate,
    Deduction,
    EnterpriseCode,
    PreferentialFlag,
    ZeroTaxFlag,
    PreferentialDescription,
}

impl LineField {
    pub const ALL: [LineField; 13] = [
        LineField::SequenceNumber,
        LineField::ItemName,
        LineField::SpecModel,
        LineField::Unit,
        LineField::ItemCode,
        LineField::Quantity,
        LineField::UnitPrice,
        LineField::TaxRate,
        LineField::Deduction,
        LineField::EnterpriseCode,
        LineField::PreferentialFlag,
        LineField::ZeroTaxFlag,
        LineField::PreferentialDescription,
    ];

    pub const fn spec(self) -> FieldSpec {
        use Coercion::{AsIs, Float, ItemCode};
        match self {
            LineField::SequenceNumber => field("sequence_number", "序号", "Xh", true, AsIs),
            LineField::ItemName => field("item_name", "商品名称", "Spmc", true, AsIs),
            LineField::SpecModel => field("spec_model", "规格型号", "Ggxh", false, AsIs),
            LineField::Unit => field("unit", "计量单位", "Jldw", false, AsIs),
            LineField::ItemCode => field("item_code", "商品编码", "Spbm", true, ItemCode),
            LineField::Quantity => field("quantity", "数量", "Sl", true, Float),
            LineField::UnitPrice => field("unit_price", "单价", "Dj", true, Float),
            LineField::TaxRate => field("tax_rate", "税率", "Slv", false, Float),
            LineField::Deduction => field("deduction", "扣除额", "Kce", false, AsIs),
            LineField::EnterpriseCode => {
                field("enterprise_code", "企业商品自编码", "Qyspbm", false, AsIs)
            }
            LineField::PreferentialFlag => {
                field("preferential_flag", "优惠政策标识", "Syyhzcbz", false, AsIs)
            }
            LineField::ZeroTaxFlag => field("zero_tax_flag", "零税率标识", "Lslbz", false, AsIs),
            LineField::PreferentialDescription => {
                field("preferential_description", "优惠政策说明", "Yhzcsm", false, AsIs)
            }
        }
    }

    pub const fn column(self) -> &'static str {
        self.spec().column
    }
}

/// Every column the template defines, document number first.
pub fn template_columns() -> Vec<&'static str> {
    let mut columns = vec![DOCUMENT_NUMBER_COLUMN];
    columns.extend(HeaderField::ALL.iter().map(|f| f.column()));
    columns.extend(LineField::ALL.iter().map(|f| f.column()));
    columns
}

/// Look up the spec of a source column header.
pub fn find_by_column(column: &str) -> Option<FieldSpec> {
    HeaderField::ALL
        .iter()
        .map(|f| f.spec())
        .chain(LineField::ALL.iter().map(|f| f.spec()))
        .find(|spec| spec.column == column)
}
