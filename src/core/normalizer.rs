use crate::domain::model::CanonicalPrice;

/// Reduces a price text to the integer formed by its digits.
///
/// Currency symbols, thousands separators and labels are all dropped, so
/// `"৳ 1,24,999"` becomes `124999`. Absent input, input without digits and
/// digit runs too long for a `u64` yield `CanonicalPrice::Unknown`.
pub fn normalize_price(text: Option<&str>) -> CanonicalPrice {
    let Some(text) = text else {
        return CanonicalPrice::Unknown;
    };

    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return CanonicalPrice::Unknown;
    }

    digits
        .parse::<u64>()
        .map(CanonicalPrice::Known)
        .unwrap_or(CanonicalPrice::Unknown)
}

/// Lower-cases and collapses whitespace so titles compare loosely.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
