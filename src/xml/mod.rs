//! Format detection and XML parsing for both Croatian e-invoice dialects.
//!
//! # Supported dialects
//!
//! - **UBL 2.1**: OASIS Universal Business Language as profiled by the
//!   Croatian CIUS (`from_ubl_xml`)
//! - **eFiskalizacija**: the Tax Authority's national schema
//!   (`from_fiskalizacija_xml`)
//!
//! # Example
//!
//! ```no_run
//! let xml = std::fs::read_to_string("racun.xml").unwrap();
//! let invoice = eracun::xml::parse_invoice(&xml).unwrap();
//! println!("{} from {:?}", invoice.id, invoice.supplier.map(|s| s.name));
//! ```

mod detect;
mod fiskalizacija;
mod ubl;
pub(crate) mod xml_utils;

pub use detect::{InvoiceFormat, detect_format};
pub use fiskalizacija::from_fiskalizacija_xml;
pub use ubl::from_ubl_xml;

use crate::core::{Invoice, RacunError};

/// UBL 2.1 namespace URIs.
pub mod ubl_ns {
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    pub const CREDIT_NOTE: &str = "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2";
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}

/// eFiskalizacija namespace URIs.
pub mod fiskalizacija_ns {
    pub const RACUN: &str = "urn:porezna-uprava.hr:efiskalizacija:eracun:1";
}

/// Detect the dialect of `xml` and parse it into the canonical model.
///
/// Returns [`RacunError::UnknownFormat`] when neither dialect matches.
pub fn parse_invoice(xml: &str) -> Result<Invoice, RacunError> {
    match detect_format(xml) {
        InvoiceFormat::Ubl => from_ubl_xml(xml),
        InvoiceFormat::Fiskalizacija => from_fiskalizacija_xml(xml),
        InvoiceFormat::Unknown => Err(RacunError::UnknownFormat),
    }
}

/// Like [`parse_invoice`], for raw bytes. A leading UTF-8 BOM is skipped.
pub fn parse_invoice_bytes(bytes: &[u8]) -> Result<Invoice, RacunError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| RacunError::MalformedDocument(format!("invalid UTF-8: {e}")))?;
    parse_invoice(xml)
}
