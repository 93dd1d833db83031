use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment model used when the source carries none (HUB3 "HR99").
pub const DEFAULT_PAYMENT_MODEL: &str = "HR99";

/// Canonical, dialect-agnostic invoice.
///
/// Created in one pass by a dialect parser and never mutated afterward.
/// Decimal and date fields are `None` when the source value was missing
/// or could not be normalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number as declared by the issuer.
    pub id: String,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Payment due date.
    pub due_date: Option<NaiveDate>,
    /// Actual delivery date.
    pub delivery_date: Option<NaiveDate>,
    /// Declared currency code (ISO 4217), or empty when the source has none.
    pub currency: String,
    /// Document type code (UNTDID 1001, e.g. "380").
    pub type_code: String,
    /// Free-text notes at document level.
    pub notes: Vec<String>,
    /// Payment terms free text.
    pub payment_terms: Option<String>,
    /// Issuer.
    pub supplier: Option<Party>,
    /// Recipient.
    pub customer: Option<Party>,
    /// Payment instructions.
    pub payment_means: Option<PaymentMeans>,
    /// Invoice lines in document order.
    pub lines: Vec<LineItem>,
    /// VAT breakdown in document order.
    pub tax_subtotals: Vec<TaxSubtotal>,
    /// Document totals.
    pub totals: Option<Totals>,
}

/// Supplier or customer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    /// Tax identifier exactly as the source declares it (e.g. "HR12345678901").
    pub tax_id: String,
    /// 11-digit Croatian OIB derived from `tax_id`.
    pub oib: Option<String>,
    pub legal_form: Option<String>,
    pub email: Option<String>,
}

/// Payment instructions.
///
/// `model` and `reference` are always present as strings because the HUB3
/// record has fixed positions for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMeans {
    /// UNTDID 4461 payment means code (e.g. "30", "58").
    pub code: Option<String>,
    /// Payee IBAN, unvalidated.
    pub iban: String,
    /// Payment model: two letters and two digits (e.g. "HR01").
    pub model: String,
    /// Reference number (poziv na broj).
    pub reference: String,
    pub note: Option<String>,
}

impl Default for PaymentMeans {
    fn default() -> Self {
        Self {
            code: None,
            iban: String::new(),
            model: DEFAULT_PAYMENT_MODEL.to_string(),
            reference: String::new(),
            note: None,
        }
    }
}

/// Invoice line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    /// UN/CEFACT Rec 20 unit code (e.g. "H87", "HUR").
    pub unit_code: String,
    pub unit_price: Option<Decimal>,
    /// Net line amount.
    pub line_total: Option<Decimal>,
    pub vat_percent: Option<Decimal>,
    /// UNTDID 5305 VAT category code (e.g. "S", "E").
    pub vat_category: String,
}

/// VAT breakdown entry per category and rate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxSubtotal {
    pub category: String,
    pub percent: Option<Decimal>,
    pub taxable_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub exemption_reason: Option<String>,
}

/// Document totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of net line amounts.
    pub line_extension: Option<Decimal>,
    /// Total without VAT.
    pub tax_exclusive: Option<Decimal>,
    /// Total with VAT.
    pub tax_inclusive: Option<Decimal>,
    /// Total VAT.
    pub tax_amount: Option<Decimal>,
    /// Amount due for payment.
    pub payable: Option<Decimal>,
    pub charge_total: Option<Decimal>,
    pub allowance_total: Option<Decimal>,
}
