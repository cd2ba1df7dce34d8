//! Rendering of entry listings.

use diary_core::Listing;

/// `OFFSET: NAME` lines for dated entries, then one line per named entry.
pub fn listing_lines(listing: &Listing) -> Vec<String> {
    listing
        .dated
        .iter()
        .map(|entry| format!("{}: {}", entry.offset, entry.filename))
        .chain(listing.named.iter().cloned())
        .collect()
}

pub fn listing_json(listing: &Listing) -> anyhow::Result<String> {
    serde_json::to_string_pretty(listing)
        .map_err(|e| anyhow::anyhow!("Failed to serialize listing: {}", e))
}
