//! HUB3 (HRVHUB30) payment-slip data for PDF417 barcodes.
//!
//! Produces the fixed, newline-separated text record that Croatian banking
//! apps scan from a payment barcode. Turning the text into an image is left
//! to a barcode encoder.
//!
//! # Example
//!
//! ```no_run
//! let xml = std::fs::read_to_string("racun.xml").unwrap();
//! let invoice = eracun::xml::parse_invoice(&xml).unwrap();
//! let payload = eracun::hub3::build_hub3(&invoice).unwrap();
//! let text = payload.to_string(); // hand to a PDF417 encoder
//! ```

mod payload;
mod truncate;

pub use payload::{
    AMOUNT_WIDTH, HUB3_HEADER, Hub3Options, Hub3OptionsBuilder, Hub3Payload, MAX_SUBUNITS,
    build_hub3, build_hub3_with, to_subunits,
};
pub use truncate::{croatian_weight, truncate_hr, truncate_weighted};
