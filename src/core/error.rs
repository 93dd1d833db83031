use thiserror::Error;

/// Errors that can occur while parsing an invoice or building payment data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RacunError {
    /// The document matches none of the supported dialect signatures.
    #[error("unknown invoice format: no UBL or eFiskalizacija namespace found")]
    UnknownFormat,

    /// The document was recognized but could not be navigated
    /// (XML syntax error, unbalanced elements, invalid UTF-8).
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A record required for HUB3 generation is absent.
    ///
    /// The payload names the missing entity: `"totals"`, `"totals.payable"`,
    /// `"supplier"`, `"customer"` or `"payment_means"`.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl RacunError {
    /// Name of the missing entity for [`RacunError::MissingField`].
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(field),
            _ => None,
        }
    }
}
