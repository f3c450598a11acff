use crate::domain::model::{ComparisonRow, Listing};

/// Cheapest listing by canonical price; the earliest one wins a tie.
///
/// Unknown prices sort after every known price, so they are only returned
/// when no listing has a known price.
pub fn recommend(listings: &[Listing]) -> Option<&Listing> {
    listings.iter().fold(None, |cheapest: Option<&Listing>, current| match cheapest {
        Some(best) if best.canonical_price <= current.canonical_price => Some(best),
        _ => Some(current),
    })
}

/// Price-ascending comparison table. The sort is stable, so equal prices keep
/// the order in which providers were queried.
pub fn compare(listings: &[Listing]) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = listings
        .iter()
        .map(|listing| ComparisonRow {
            source: listing.source_id.clone(),
            title: listing.title.clone(),
            price: listing.canonical_price,
        })
        .collect();
    rows.sort_by_key(|row| row.price);
    rows
}
