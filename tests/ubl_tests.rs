#![cfg(feature = "xml")]

use chrono::NaiveDate;
use eracun::core::*;
use eracun::xml::{self, InvoiceFormat};
use rust_decimal_macros::dec;

const UBL: &str = include_str!("fixtures/ubl_invoice.xml");

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// ---------------------------------------------------------------------------
// Document level
// ---------------------------------------------------------------------------

#[test]
fn detects_ubl() {
    assert_eq!(xml::detect_format(UBL), InvoiceFormat::Ubl);
}

#[test]
fn header_fields() {
    let inv = xml::parse_invoice(UBL).unwrap();
    assert_eq!(inv.id, "12-P1-1");
    assert_eq!(inv.issue_date, date(2025, 3, 14));
    assert_eq!(inv.due_date, date(2025, 4, 13));
    assert_eq!(inv.delivery_date, date(2025, 3, 10));
    assert_eq!(inv.currency, "EUR");
    assert_eq!(inv.type_code, "380");
    assert_eq!(inv.notes, vec!["Obveznik nije u sustavu PDV-a".to_string()]);
    assert_eq!(inv.payment_terms.as_deref(), Some("Plativo u roku 30 dana"));
}

#[test]
fn supplier_party() {
    let inv = xml::parse_invoice(UBL).unwrap();
    let s = inv.supplier.unwrap();
    assert_eq!(s.name, "Obrt Šimić");
    assert_eq!(s.street.as_deref(), Some("Ilica 1"));
    assert_eq!(s.city.as_deref(), Some("Zagreb"));
    assert_eq!(s.postal_code.as_deref(), Some("10000"));
    assert_eq!(s.country_code, "HR");
    assert_eq!(s.tax_id, "HR12345678901");
    assert_eq!(s.oib.as_deref(), Some("12345678901"));
    assert_eq!(s.legal_form.as_deref(), Some("obrt"));
    assert_eq!(s.email.as_deref(), Some("ivan@simic.hr"));
}

#[test]
fn customer_party() {
    let inv = xml::parse_invoice(UBL).unwrap();
    let c = inv.customer.unwrap();
    assert_eq!(c.name, "Kupac d.o.o.");
    assert_eq!(c.oib.as_deref(), Some("11111111111"));
    assert_eq!(c.legal_form, None);
}

#[test]
fn payment_means_split() {
    let inv = xml::parse_invoice(UBL).unwrap();
    let pm = inv.payment_means.unwrap();
    assert_eq!(pm.code.as_deref(), Some("30"));
    assert_eq!(pm.iban, "HR1210010051863000160");
    assert_eq!(pm.model, "HR01");
    assert_eq!(pm.reference, "123-456");
    assert_eq!(pm.note.as_deref(), Some("Plaćanje po računu"));
}

#[test]
fn payment_id_without_separator() {
    let xml = UBL.replace("HR01 123-456", "HR0512345");
    let pm = xml::parse_invoice(&xml).unwrap().payment_means.unwrap();
    assert_eq!(pm.model, "HR05");
    assert_eq!(pm.reference, "12345");
}

#[test]
fn bare_reference_gets_hr99() {
    let xml = UBL.replace("HR01 123-456", "12345");
    let pm = xml::parse_invoice(&xml).unwrap().payment_means.unwrap();
    assert_eq!(pm.model, "HR99");
    assert_eq!(pm.reference, "12345");
}

#[test]
fn totals_and_subtotals() {
    let inv = xml::parse_invoice(UBL).unwrap();
    let t = inv.totals.unwrap();
    assert_eq!(t.line_extension, Some(dec!(100.40)));
    assert_eq!(t.tax_exclusive, Some(dec!(100.40)));
    assert_eq!(t.tax_inclusive, Some(dec!(125.50)));
    assert_eq!(t.tax_amount, Some(dec!(25.10)));
    assert_eq!(t.payable, Some(dec!(125.50)));
    assert_eq!(t.charge_total, None);
    assert_eq!(t.allowance_total, None);

    assert_eq!(inv.tax_subtotals.len(), 1);
    let st = &inv.tax_subtotals[0];
    assert_eq!(st.category, "S");
    assert_eq!(st.percent, Some(dec!(25)));
    assert_eq!(st.taxable_amount, Some(dec!(100.40)));
    assert_eq!(st.tax_amount, Some(dec!(25.10)));
    assert_eq!(st.exemption_reason, None);
}

#[test]
fn lines_in_order() {
    let inv = xml::parse_invoice(UBL).unwrap();
    assert_eq!(inv.lines.len(), 2);

    let l1 = &inv.lines[0];
    assert_eq!(l1.id, "1");
    assert_eq!(l1.name, "Košara");
    assert_eq!(l1.description.as_deref(), Some("Ručno rađeno"));
    assert_eq!(l1.quantity, Some(dec!(2)));
    assert_eq!(l1.unit_code, "H87");
    assert_eq!(l1.unit_price, Some(dec!(40.20)));
    assert_eq!(l1.line_total, Some(dec!(80.40)));
    assert_eq!(l1.vat_percent, Some(dec!(25)));
    assert_eq!(l1.vat_category, "S");

    let l2 = &inv.lines[1];
    assert_eq!(l2.id, "2");
    assert_eq!(l2.unit_code, "HUR");
    assert_eq!(l2.description, None);
}

// ---------------------------------------------------------------------------
// Degrading and failing
// ---------------------------------------------------------------------------

#[test]
fn bad_scalars_degrade_to_none() {
    let xml = UBL
        .replace("2025-03-14", "14.03.2025")
        .replace(">125.50</cbc:PayableAmount>", ">n/a</cbc:PayableAmount>");
    let inv = xml::parse_invoice(&xml).unwrap();
    assert_eq!(inv.issue_date, None);
    assert_eq!(inv.totals.unwrap().payable, None);
}

#[test]
fn trailing_garbage_keeps_numeric_prefix() {
    let xml = UBL.replace(">125.50</cbc:PayableAmount>", ">125.50 EUR</cbc:PayableAmount>");
    let inv = xml::parse_invoice(&xml).unwrap();
    assert_eq!(inv.totals.unwrap().payable, Some(dec!(125.50)));
}

#[test]
fn truncated_document_is_malformed() {
    let mid = (0..=UBL.len() / 2)
        .rev()
        .find(|&i| UBL.is_char_boundary(i))
        .unwrap();
    let cut = &UBL[..mid];
    match xml::parse_invoice(cut) {
        Err(RacunError::MalformedDocument(msg)) => assert!(!msg.is_empty()),
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
}

#[test]
fn missing_payment_means_is_default() {
    let start = UBL.find("<cac:PaymentMeans>").unwrap();
    let end = UBL.find("</cac:PaymentMeans>").unwrap() + "</cac:PaymentMeans>".len();
    let xml = format!("{}{}", &UBL[..start], &UBL[end..]);
    let pm = xml::parse_invoice(&xml).unwrap().payment_means.unwrap();
    assert_eq!(pm, PaymentMeans::default());
}

#[test]
fn only_first_payment_means_is_used() {
    let second = "<cac:PaymentMeans><cbc:PaymentMeansCode>58</cbc:PaymentMeansCode>\
        <cbc:PaymentID>HR00 999</cbc:PaymentID>\
        <cac:PayeeFinancialAccount><cbc:ID>HR0000000000000000000</cbc:ID></cac:PayeeFinancialAccount>\
        </cac:PaymentMeans><cac:PaymentTerms>";
    let xml = UBL.replacen("<cac:PaymentTerms>", second, 1);
    let pm = xml::parse_invoice(&xml).unwrap().payment_means.unwrap();
    assert_eq!(pm.iban, "HR1210010051863000160");
    assert_eq!(pm.model, "HR01");
}

#[test]
fn line_level_tax_total_does_not_leak() {
    let extra = "<cac:TaxTotal><cbc:TaxAmount currencyID=\"EUR\">999</cbc:TaxAmount></cac:TaxTotal>\
        <cac:Item>";
    let xml = UBL.replacen("<cac:Item>", extra, 1);
    let inv = xml::parse_invoice(&xml).unwrap();
    assert_eq!(inv.totals.unwrap().tax_amount, Some(dec!(25.10)));
    assert_eq!(inv.tax_subtotals.len(), 1);
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

#[test]
fn default_namespace_without_prefixes() {
    let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2">
  <ID>X-1</ID>
  <IssueDate>2025-01-02</IssueDate>
  <AccountingSupplierParty><Party><PartyName><Name>Dobavljač</Name></PartyName></Party></AccountingSupplierParty>
</Invoice>"#;
    let inv = xml::parse_invoice(xml).unwrap();
    assert_eq!(inv.id, "X-1");
    assert_eq!(inv.issue_date, date(2025, 1, 2));
    assert_eq!(inv.supplier.unwrap().name, "Dobavljač");
}

#[test]
fn delivery_date_found_under_line() {
    let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
    xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
    xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>X-2</cbc:ID>
  <cac:InvoiceLine>
    <cbc:ID>1</cbc:ID>
    <cac:Delivery><cbc:ActualDeliveryDate>2025-01-02</cbc:ActualDeliveryDate></cac:Delivery>
    <cac:Item><cbc:Name>Usluga</cbc:Name></cac:Item>
  </cac:InvoiceLine>
  <cac:InvoiceLine>
    <cbc:ID>2</cbc:ID>
    <cac:Delivery><cbc:ActualDeliveryDate>2025-01-09</cbc:ActualDeliveryDate></cac:Delivery>
  </cac:InvoiceLine>
</Invoice>"#;
    let inv = xml::parse_invoice(xml).unwrap();
    assert_eq!(inv.delivery_date, date(2025, 1, 2));
    assert_eq!(inv.lines.len(), 2);
    assert_eq!(inv.lines[0].name, "Usluga");
}

#[test]
fn registration_name_is_fallback_name() {
    let xml = UBL.replace("<cac:PartyName><cbc:Name>Obrt Šimić</cbc:Name></cac:PartyName>", "");
    let inv = xml::parse_invoice(&xml).unwrap();
    assert_eq!(inv.supplier.unwrap().name, "Obrt Šimić, vl. Ivan Šimić");
}

#[test]
fn credit_note() {
    let xml = r#"<CreditNote xmlns="urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2"
    xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
    xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
  <cbc:ID>CN-1</cbc:ID>
  <cbc:CreditNoteTypeCode>381</cbc:CreditNoteTypeCode>
  <cac:PaymentMeans>
    <cbc:PaymentDueDate>2025-05-01</cbc:PaymentDueDate>
  </cac:PaymentMeans>
  <cac:CreditNoteLine>
    <cbc:ID>1</cbc:ID>
    <cbc:CreditedQuantity unitCode="C62">1</cbc:CreditedQuantity>
    <cac:Item><cbc:Name>Povrat</cbc:Name></cac:Item>
  </cac:CreditNoteLine>
</CreditNote>"#;
    assert_eq!(xml::detect_format(xml), InvoiceFormat::Ubl);
    let inv = xml::parse_invoice(xml).unwrap();
    assert_eq!(inv.id, "CN-1");
    assert_eq!(inv.type_code, "381");
    assert_eq!(inv.due_date, date(2025, 5, 1));
    assert_eq!(inv.lines.len(), 1);
    assert_eq!(inv.lines[0].unit_code, "C62");
    assert_eq!(inv.lines[0].name, "Povrat");
}

#[test]
fn parsing_is_deterministic() {
    let a = xml::parse_invoice(UBL).unwrap();
    let b = xml::parse_invoice(UBL).unwrap();
    assert_eq!(a, b);
}

#[test]
fn direct_parser_skips_detection() {
    let inv = xml::from_ubl_xml("<Invoice><ID>plain</ID></Invoice>").unwrap();
    assert_eq!(inv.id, "plain");
    assert_eq!(
        xml::parse_invoice("<Invoice><ID>plain</ID></Invoice>"),
        Err(RacunError::UnknownFormat)
    );
}
