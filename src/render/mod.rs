//! Template context for document rendering.
//!
//! Flattens an [`Invoice`] into a nested JSON mapping of display strings, the
//! only shape a templating engine gets to see. Dates become `DD.MM.YYYY`,
//! decimals plain base-10 text, unit codes Croatian abbreviations, and every
//! absent value an empty string.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::core::{Invoice, LineItem, Party, PaymentMeans, TaxSubtotal, Totals, unit_abbreviation};

/// Currency shown when the invoice declares none.
pub const DEFAULT_CURRENCY: &str = "EUR";

const DATE_FORMAT: &str = "%d.%m.%Y";

/// Build the template context for `invoice`.
pub fn to_template_context(invoice: &Invoice) -> Value {
    let currency = if invoice.currency.trim().is_empty() {
        DEFAULT_CURRENCY
    } else {
        invoice.currency.as_str()
    };
    let lines: Vec<Value> = invoice.lines.iter().map(line).collect();
    let tax_subtotals: Vec<Value> = invoice.tax_subtotals.iter().map(subtotal).collect();
    json!({
        "id": invoice.id,
        "issue_date": date(invoice.issue_date),
        "due_date": date(invoice.due_date),
        "delivery_date": date(invoice.delivery_date),
        "currency": currency,
        "type_code": invoice.type_code,
        "notes": invoice.notes,
        "payment_terms": text(invoice.payment_terms.as_deref()),
        "supplier": party(invoice.supplier.as_ref()),
        "customer": party(invoice.customer.as_ref()),
        "payment_means": payment(invoice.payment_means.as_ref()),
        "lines": lines,
        "tax_subtotals": tax_subtotals,
        "totals": totals(invoice.totals.as_ref()),
    })
}

/// Format a date as `DD.MM.YYYY`, or `""` when absent.
pub fn format_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Format a decimal as plain base-10 text, or `""` when absent.
pub fn format_decimal(d: Option<Decimal>) -> String {
    d.map(|d| d.to_string()).unwrap_or_default()
}

fn date(d: Option<NaiveDate>) -> Value {
    Value::String(format_date(d))
}

fn amount(d: Option<Decimal>) -> Value {
    Value::String(format_decimal(d))
}

fn text(s: Option<&str>) -> Value {
    Value::String(s.unwrap_or_default().to_string())
}

fn party(p: Option<&Party>) -> Value {
    let default = Party::default();
    let p = p.unwrap_or(&default);
    json!({
        "name": p.name,
        "street": text(p.street.as_deref()),
        "city": text(p.city.as_deref()),
        "postal_code": text(p.postal_code.as_deref()),
        "country_code": p.country_code,
        "tax_id": p.tax_id,
        "oib": text(p.oib.as_deref()),
        "legal_form": text(p.legal_form.as_deref()),
        "email": text(p.email.as_deref()),
    })
}

fn payment(pm: Option<&PaymentMeans>) -> Value {
    let default = PaymentMeans::default();
    let pm = pm.unwrap_or(&default);
    json!({
        "iban": pm.iban,
        "model": pm.model,
        "reference": pm.reference,
        "note": text(pm.note.as_deref()),
    })
}

fn line(l: &LineItem) -> Value {
    json!({
        "id": l.id,
        "name": l.name,
        "description": text(l.description.as_deref()),
        "quantity": amount(l.quantity),
        "unit": unit_abbreviation(&l.unit_code),
        "unit_code": l.unit_code,
        "unit_price": amount(l.unit_price),
        "line_total": amount(l.line_total),
        "vat_percent": amount(l.vat_percent),
        "vat_category": l.vat_category,
    })
}

fn subtotal(st: &TaxSubtotal) -> Value {
    json!({
        "category": st.category,
        "percent": amount(st.percent),
        "taxable_amount": amount(st.taxable_amount),
        "tax_amount": amount(st.tax_amount),
        "exemption_reason": text(st.exemption_reason.as_deref()),
    })
}

fn totals(t: Option<&Totals>) -> Value {
    let default = Totals::default();
    let t = t.unwrap_or(&default);
    json!({
        "line_extension": amount(t.line_extension),
        "tax_exclusive": amount(t.tax_exclusive),
        "tax_inclusive": amount(t.tax_inclusive),
        "tax_amount": amount(t.tax_amount),
        "payable": amount(t.payable),
        "charge_total": amount(t.charge_total),
        "allowance_total": amount(t.allowance_total),
    })
}
