//! UN/CEFACT Recommendation 20 unit codes and their Croatian abbreviations.
//!
//! Only the codes that show up on Croatian invoices in practice are mapped;
//! everything else is displayed as the raw code.

/// Croatian display abbreviation for a unit code.
///
/// Unmapped codes are returned unchanged.
pub fn unit_abbreviation(code: &str) -> &str {
    UNIT_ABBREVIATIONS
        .binary_search_by_key(&code, |&(c, _)| c)
        .map(|i| UNIT_ABBREVIATIONS[i].1)
        .unwrap_or(code)
}

/// Sorted by code for binary search.
static UNIT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("ANN", "god"), // Year
    ("C62", "kom"), // One
    ("DAY", "dan"), // Day
    ("EA", "kom"),  // Each
    ("GRM", "g"),   // Gram
    ("H87", "kom"), // Piece
    ("HUR", "h"),   // Hour
    ("KGM", "kg"),  // Kilogram
    ("KMT", "km"),  // Kilometre
    ("KWH", "kWh"), // Kilowatt-hour
    ("LTR", "l"),   // Litre
    ("MIN", "min"), // Minute
    ("MON", "mj"),  // Month
    ("MTK", "m²"),  // Square metre
    ("MTQ", "m³"),  // Cubic metre
    ("MTR", "m"),   // Metre
    ("PR", "par"),  // Pair
    ("SET", "set"), // Set
    ("XPP", "kom"), // Piece (package code)
];
