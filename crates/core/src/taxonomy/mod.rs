//! Canonical sector (GICS) and country (benchmark location) names.

pub mod fallback;

pub use fallback::{lookup_fallback, resolve_alias, Classification};

pub const UNKNOWN_CATEGORY: &str = "Unknown";

// Vendor (Yahoo-style) sector labels -> GICS.
const SECTOR_MAP: &[(&str, &str)] = &[
    ("Technology", "Information Technology"),
    ("Healthcare", "Health Care"),
    ("Consumer Cyclical", "Consumer Discretionary"),
    ("Consumer Defensive", "Consumer Staples"),
    ("Financial Services", "Financials"),
    ("Financial", "Financials"),
    ("Basic Materials", "Materials"),
    ("Communication", "Communication Services"),
];

const COUNTRY_MAP: &[(&str, &str)] = &[
    ("South Korea", "Korea (South)"),
    ("Korea, Republic of", "Korea (South)"),
    ("Republic of Korea", "Korea (South)"),
    ("Hong Kong SAR", "Hong Kong"),
    ("Hong Kong SAR China", "Hong Kong"),
    ("USA", "United States"),
    ("United States of America", "United States"),
    ("UK", "United Kingdom"),
    ("Great Britain", "United Kingdom"),
    ("Taiwan, Province of China", "Taiwan"),
];

/// Maps a vendor sector label to GICS. Unmapped labels pass through; blank becomes "Unknown".
pub fn normalize_sector(raw: &str) -> String {
    lookup(SECTOR_MAP, raw)
}

/// Maps a vendor country label to the benchmark's location naming.
pub fn normalize_country(raw: &str) -> String {
    lookup(COUNTRY_MAP, raw)
}

pub fn normalize_sector_opt(raw: Option<&str>) -> String {
    normalize_sector(raw.unwrap_or_default())
}

pub fn normalize_country_opt(raw: Option<&str>) -> String {
    normalize_country(raw.unwrap_or_default())
}

fn lookup(table: &[(&str, &str)], raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        return UNKNOWN_CATEGORY.to_string();
    }
    table
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| name.to_string())
}
