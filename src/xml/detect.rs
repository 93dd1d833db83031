use std::fmt;

use tracing::debug;

use super::{fiskalizacija_ns, ubl_ns};

/// Invoice dialect of a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceFormat {
    /// OASIS UBL 2.1 (HR CIUS e-Račun).
    Ubl,
    /// Croatian Tax Authority eFiskalizacija schema.
    Fiskalizacija,
    /// No known namespace signature.
    Unknown,
}

impl InvoiceFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ubl => "UBL 2.1",
            Self::Fiskalizacija => "eFiskalizacija",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InvoiceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a document by the namespace URIs it mentions.
///
/// This is a textual probe for routing only; nothing is validated. UBL wins
/// when a document carries both signatures.
pub fn detect_format(xml: &str) -> InvoiceFormat {
    let format = if xml.contains(ubl_ns::INVOICE) || xml.contains(ubl_ns::CAC) {
        InvoiceFormat::Ubl
    } else if xml.contains(fiskalizacija_ns::RACUN) {
        InvoiceFormat::Fiskalizacija
    } else {
        InvoiceFormat::Unknown
    };
    debug!(%format, "detected invoice format");
    format
}
