use eracun::hub3::{self, Hub3OptionsBuilder};
use eracun::xml::{self, InvoiceFormat};

fn main() {
    let xml = include_str!("../tests/fixtures/ubl_invoice.xml");

    let format = xml::detect_format(xml);
    assert_eq!(format, InvoiceFormat::Ubl);
    println!("Detected: {format}");

    let invoice = xml::parse_invoice(xml).unwrap();
    println!("Invoice {} ({} lines)", invoice.id, invoice.lines.len());
    if let Some(supplier) = &invoice.supplier {
        println!("  Supplier: {} (OIB {})", supplier.name, supplier.oib.as_deref().unwrap_or("-"));
    }
    if let Some(payable) = invoice.totals.as_ref().and_then(|t| t.payable) {
        println!("  Payable:  {payable} {}", invoice.currency);
    }

    let options = Hub3OptionsBuilder::new()
        .purpose_code("GDSV")
        .description_prefix("Račun ")
        .build();
    let payload = hub3::build_hub3_with(&invoice, &options).unwrap();

    println!("\nHUB3 payload:");
    println!("{payload}");
}
