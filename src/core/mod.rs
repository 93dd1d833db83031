//! Canonical invoice model, errors and scalar normalizers.
//!
//! Both dialect parsers populate the types in this module; the HUB3
//! builder and the template mapping only ever read them.

mod error;
pub mod normalize;
mod types;
pub mod units;

pub use error::*;
pub use normalize::{extract_oib, parse_date, parse_decimal, split_payment_id};
pub use types::*;
pub use units::unit_abbreviation;
