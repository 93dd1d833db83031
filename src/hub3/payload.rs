use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::truncate::truncate_hr;
use crate::core::{DEFAULT_PAYMENT_MODEL, Invoice, Party, RacunError};

/// Record header identifying the HUB3 version.
pub const HUB3_HEADER: &str = "HRVHUB30";

/// Width of the zero-padded amount field.
pub const AMOUNT_WIDTH: usize = 15;

/// Largest amount, in subunits, that fits the amount field.
pub const MAX_SUBUNITS: u64 = 999_999_999_999_999;

const NAME_MAX: usize = 30;
const ADDRESS_MAX: usize = 27;
const DESCRIPTION_MAX: usize = 35;

/// Options for HUB3 generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub3Options {
    /// ISO 20022 purpose code (namjena), 4 characters.
    pub purpose_code: String,
    /// Text placed before the invoice id in the description field.
    pub description_prefix: String,
    /// Currency used when the invoice declares none.
    pub default_currency: String,
}

impl Default for Hub3Options {
    fn default() -> Self {
        Self {
            purpose_code: "OTHR".into(),
            description_prefix: "Invoice ".into(),
            default_currency: "EUR".into(),
        }
    }
}

/// Builder for [`Hub3Options`].
///
/// # Example
///
/// ```
/// use eracun::hub3::Hub3OptionsBuilder;
///
/// let options = Hub3OptionsBuilder::new()
///     .purpose_code("GDSV")
///     .description_prefix("Račun ")
///     .build();
/// assert_eq!(options.default_currency, "EUR");
/// ```
#[derive(Debug, Default)]
pub struct Hub3OptionsBuilder {
    options: Hub3Options,
}

impl Hub3OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the purpose code (e.g. "GDSV", "COST").
    pub fn purpose_code(mut self, code: impl Into<String>) -> Self {
        self.options.purpose_code = code.into();
        self
    }

    /// Set the description prefix (e.g. "Račun ").
    pub fn description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.description_prefix = prefix.into();
        self
    }

    /// Set the fallback currency.
    pub fn default_currency(mut self, currency: impl Into<String>) -> Self {
        self.options.default_currency = currency.into();
        self
    }

    pub fn build(self) -> Hub3Options {
        self.options
    }
}

/// The 14 fields of a HUB3 record, already truncated and formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub3Payload {
    pub header: String,
    pub currency: String,
    pub amount: String,
    pub payer_name: String,
    pub payer_street: String,
    pub payer_place: String,
    pub payee_name: String,
    pub payee_street: String,
    pub payee_place: String,
    pub iban: String,
    pub model: String,
    pub reference: String,
    pub purpose_code: String,
    pub description: String,
}

impl Hub3Payload {
    /// Fields in record order.
    pub fn lines(&self) -> [&str; 14] {
        [
            self.header.as_str(),
            self.currency.as_str(),
            self.amount.as_str(),
            self.payer_name.as_str(),
            self.payer_street.as_str(),
            self.payer_place.as_str(),
            self.payee_name.as_str(),
            self.payee_street.as_str(),
            self.payee_place.as_str(),
            self.iban.as_str(),
            self.model.as_str(),
            self.reference.as_str(),
            self.purpose_code.as_str(),
            self.description.as_str(),
        ]
    }
}

impl fmt::Display for Hub3Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Convert an amount to the smallest currency unit, rounding half-up.
///
/// `10.005` → `1001`; `None` → `0`. Negative amounts are encoded by
/// absolute value since HUB3 has no sign. Amounts beyond the 15-digit field
/// are clamped to [`MAX_SUBUNITS`].
pub fn to_subunits(amount: Option<Decimal>) -> u64 {
    let Some(amount) = amount else {
        return 0;
    };
    if amount.is_sign_negative() && !amount.is_zero() {
        warn!(%amount, "negative payable amount, encoding absolute value");
    }
    let subunits = amount
        .abs()
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_u64())
        .unwrap_or(u64::MAX);
    if subunits > MAX_SUBUNITS {
        warn!(%amount, "amount exceeds HUB3 field width, clamping");
        return MAX_SUBUNITS;
    }
    subunits
}

/// Build the HUB3 record for `invoice` with default options.
pub fn build_hub3(invoice: &Invoice) -> Result<Hub3Payload, RacunError> {
    build_hub3_with(invoice, &Hub3Options::default())
}

/// Build the HUB3 record for `invoice`.
///
/// Fails with [`RacunError::MissingField`] on the first absent record, checked
/// in the order totals, payable amount, supplier, customer, payment means.
pub fn build_hub3_with(invoice: &Invoice, options: &Hub3Options) -> Result<Hub3Payload, RacunError> {
    let totals = invoice
        .totals
        .as_ref()
        .ok_or(RacunError::MissingField("totals"))?;
    let payable = totals
        .payable
        .ok_or(RacunError::MissingField("totals.payable"))?;
    let supplier = invoice
        .supplier
        .as_ref()
        .ok_or(RacunError::MissingField("supplier"))?;
    let customer = invoice
        .customer
        .as_ref()
        .ok_or(RacunError::MissingField("customer"))?;
    let payment = invoice
        .payment_means
        .as_ref()
        .ok_or(RacunError::MissingField("payment_means"))?;

    let currency = if invoice.currency.trim().is_empty() {
        options.default_currency.as_str()
    } else {
        invoice.currency.trim()
    };
    let model = if payment.model.is_empty() {
        DEFAULT_PAYMENT_MODEL
    } else {
        payment.model.as_str()
    };

    let payload = Hub3Payload {
        header: HUB3_HEADER.to_string(),
        currency: format!("{currency:<3}"),
        amount: format!("{:0>width$}", to_subunits(Some(payable)), width = AMOUNT_WIDTH),
        payer_name: truncate_hr(&customer.name, NAME_MAX),
        payer_street: truncate_hr(customer.street.as_deref().unwrap_or(""), ADDRESS_MAX),
        payer_place: truncate_hr(&place(customer), ADDRESS_MAX),
        payee_name: truncate_hr(&supplier.name, NAME_MAX),
        payee_street: truncate_hr(supplier.street.as_deref().unwrap_or(""), ADDRESS_MAX),
        payee_place: truncate_hr(&place(supplier), ADDRESS_MAX),
        iban: payment.iban.clone(),
        model: model.to_string(),
        reference: payment.reference.clone(),
        purpose_code: options.purpose_code.clone(),
        description: truncate_hr(
            &format!("{}{}", options.description_prefix, invoice.id),
            DESCRIPTION_MAX,
        ),
    };
    debug!(id = %invoice.id, amount = %payload.amount, "built HUB3 payload");
    Ok(payload)
}

/// "postal code + space + city", skipping empty parts.
fn place(party: &Party) -> String {
    [party.postal_code.as_deref(), party.city.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
