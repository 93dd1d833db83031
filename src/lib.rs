//! # eracun
//!
//! Croatian e-invoicing library: reads invoices in either of the two
//! national dialects into one canonical model and derives the HUB3 payment
//! data printed as a PDF417 barcode on the visual invoice.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Every operation is a pure function of its input; parsing and HUB3
//! generation can run concurrently without coordination.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "xml", feature = "hub3"))]
//! # {
//! let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
//!     xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
//!     xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
//!   <cbc:ID>1-P1-1</cbc:ID>
//!   <cbc:DocumentCurrencyCode>EUR</cbc:DocumentCurrencyCode>
//!   <cac:LegalMonetaryTotal>
//!     <cbc:PayableAmount currencyID="EUR">125.50</cbc:PayableAmount>
//!   </cac:LegalMonetaryTotal>
//! </Invoice>"#;
//!
//! let invoice = eracun::xml::parse_invoice(xml).unwrap();
//! let payload = eracun::hub3::build_hub3(&invoice).unwrap();
//! assert_eq!(payload.amount, "000000000012550");
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Canonical model, errors, scalar normalizers |
//! | `xml` | Format detection, UBL 2.1 and eFiskalizacija parsing |
//! | `hub3` | HUB3 payment string with weighted truncation |
//! | `render` | Template context for document rendering |
//! | `all` | Everything (also the default) |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "hub3")]
pub mod hub3;

#[cfg(feature = "render")]
pub mod render;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
