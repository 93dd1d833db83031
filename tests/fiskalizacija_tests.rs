#![cfg(feature = "xml")]

use chrono::NaiveDate;
use eracun::core::*;
use eracun::xml::{self, InvoiceFormat};
use rust_decimal_macros::dec;

const RACUN: &str = include_str!("fixtures/fiskalizacija_racun.xml");

#[test]
fn detects_fiskalizacija() {
    assert_eq!(xml::detect_format(RACUN), InvoiceFormat::Fiskalizacija);
}

#[test]
fn first_invoice_of_batch() {
    let inv = xml::parse_invoice(RACUN).unwrap();
    assert_eq!(inv.id, "7/POS1/1");
    assert_eq!(inv.issue_date, NaiveDate::from_ymd_opt(2025, 2, 1));
    assert_eq!(inv.due_date, NaiveDate::from_ymd_opt(2025, 2, 15));
    assert_eq!(inv.delivery_date, NaiveDate::from_ymd_opt(2025, 1, 31));
    assert_eq!(inv.currency, "EUR");
    assert_eq!(inv.type_code, "380");
    assert_eq!(inv.notes, vec!["Hvala na povjerenju".to_string()]);
    assert_eq!(inv.payment_terms, None);
}

#[test]
fn parties_have_no_address() {
    let inv = xml::parse_invoice(RACUN).unwrap();
    let s = inv.supplier.unwrap();
    assert_eq!(s.name, "Đurđevac Trgovina j.d.o.o.");
    assert_eq!(s.tax_id, "HR98765432109");
    assert_eq!(s.oib.as_deref(), Some("98765432109"));
    assert_eq!(s.legal_form.as_deref(), Some("j.d.o.o."));
    assert_eq!(s.street, None);
    assert_eq!(s.city, None);
    assert_eq!(s.postal_code, None);
    assert_eq!(s.country_code, "HR");

    let c = inv.customer.unwrap();
    assert_eq!(c.name, "Žitnjak d.d.");
    assert_eq!(c.tax_id, "11111111111");
    assert_eq!(c.oib.as_deref(), Some("11111111111"));
    assert_eq!(c.email.as_deref(), Some("racuni@zitnjak.hr"));
    assert_eq!(c.country_code, "HR");
}

#[test]
fn payment_means_uses_fixed_model() {
    let inv = xml::parse_invoice(RACUN).unwrap();
    let pm = inv.payment_means.unwrap();
    assert_eq!(pm.iban, "HR1723600001101234565");
    assert_eq!(pm.model, "HR99");
    assert_eq!(pm.reference, "");
    assert_eq!(pm.note.as_deref(), Some("Đurđevac Trgovina poslovni račun"));
    assert_eq!(pm.code, None);
}

#[test]
fn lines_are_numbered() {
    let inv = xml::parse_invoice(RACUN).unwrap();
    assert_eq!(inv.lines.len(), 2);
    let l1 = &inv.lines[0];
    assert_eq!(l1.id, "1");
    assert_eq!(l1.name, "Brašno T-550");
    assert_eq!(l1.quantity, Some(dec!(10)));
    assert_eq!(l1.unit_code, "KGM");
    assert_eq!(l1.unit_price, Some(dec!(1.20)));
    assert_eq!(l1.line_total, Some(dec!(12.00)));
    assert_eq!(l1.vat_percent, Some(dec!(5)));
    assert_eq!(l1.vat_category, "AA");
    let l2 = &inv.lines[1];
    assert_eq!(l2.id, "2");
    assert_eq!(l2.description.as_deref(), Some("Papirnata"));
}

#[test]
fn subtotals_and_totals() {
    let inv = xml::parse_invoice(RACUN).unwrap();
    assert_eq!(inv.tax_subtotals.len(), 2);
    assert_eq!(inv.tax_subtotals[0].category, "AA");
    assert_eq!(inv.tax_subtotals[0].tax_amount, Some(dec!(0.60)));
    assert_eq!(inv.tax_subtotals[1].percent, Some(dec!(25)));
    assert_eq!(inv.tax_subtotals[1].taxable_amount, Some(dec!(0.40)));

    let t = inv.totals.unwrap();
    assert_eq!(t.line_extension, Some(dec!(12.40)));
    assert_eq!(t.tax_exclusive, Some(dec!(12.40)));
    assert_eq!(t.tax_inclusive, Some(dec!(13.10)));
    assert_eq!(t.tax_amount, Some(dec!(0.70)));
    assert_eq!(t.payable, Some(dec!(13.10)));
    assert_eq!(t.charge_total, None);
}

#[test]
fn minimal_document_fills_required_strings() {
    let xml = r#"<eRacuni xmlns="urn:porezna-uprava.hr:efiskalizacija:eracun:1"><Racun/></eRacuni>"#;
    let inv = xml::parse_invoice(xml).unwrap();
    assert_eq!(inv.id, "");
    assert_eq!(inv.currency, "");
    let s = inv.supplier.unwrap();
    assert_eq!(s.name, "");
    assert_eq!(s.tax_id, "");
    assert_eq!(s.oib, None);
    assert!(inv.payment_means.is_some());
    assert!(inv.totals.is_some());
}

#[test]
fn malformed_document() {
    let xml = r#"<eRacuni xmlns="urn:porezna-uprava.hr:efiskalizacija:eracun:1"><Racun><BrojRacuna>1</Racun></eRacuni>"#;
    assert!(matches!(
        xml::parse_invoice(xml),
        Err(RacunError::MalformedDocument(_))
    ));
}

#[test]
fn parsing_is_deterministic() {
    assert_eq!(
        xml::parse_invoice(RACUN).unwrap(),
        xml::parse_invoice(RACUN).unwrap()
    );
}
