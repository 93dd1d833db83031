//! Grapheme-weighted truncation for fixed-width HUB3 fields.

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

const CARON: char = '\u{30C}';
const ACUTE: char = '\u{301}';

/// HUB3 weight of one grapheme: 2 for č, ć, ž, š, đ (either case), else 1.
///
/// Decomposed forms (base letter plus combining caron or acute) segment
/// into a single grapheme and weigh the same as the precomposed letter.
pub fn croatian_weight(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let (Some(base), mark) = (chars.next(), chars.next()) else {
        return 1;
    };
    if chars.next().is_some() {
        return 1;
    }
    let heavy = match mark {
        None => matches!(
            base,
            'č' | 'Č' | 'ć' | 'Ć' | 'ž' | 'Ž' | 'š' | 'Š' | 'đ' | 'Đ'
        ),
        Some(CARON) => matches!(base, 'c' | 'C' | 'z' | 'Z' | 's' | 'S'),
        Some(ACUTE) => matches!(base, 'c' | 'C'),
        Some(_) => false,
    };
    if heavy { 2 } else { 1 }
}

/// Truncate `text` so that its weighted length stays within `max`.
///
/// The input is trimmed first. Graphemes are taken in order until the first
/// one that would exceed `max`; that grapheme and everything after it is
/// dropped, even if a lighter grapheme further on would still fit.
pub fn truncate_weighted<F>(text: &str, max: usize, weight: F) -> String
where
    F: Fn(&str) -> usize,
{
    let text = text.trim();
    let mut total = 0;
    let mut out = String::with_capacity(text.len());
    for g in text.graphemes(true) {
        total += weight(g);
        if total > max {
            trace!(max, kept = %out, "truncated field");
            break;
        }
        out.push_str(g);
    }
    out
}

/// [`truncate_weighted`] with the Croatian HUB3 weights.
pub fn truncate_hr(text: &str, max: usize) -> String {
    truncate_weighted(text, max, croatian_weight)
}
