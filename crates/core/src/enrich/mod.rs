pub mod batch;
pub mod cache;
pub mod fetcher;
pub mod provider;
pub mod types;

use crate::domain::holding::HoldingRecord;
use crate::taxonomy::lookup_fallback;
use std::collections::{HashMap, HashSet};
use types::TickerEnrichment;

/// Known tickers in first-seen order, without duplicates.
pub fn distinct_tickers(records: &[HoldingRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| r.has_ticker())
        .filter(|r| seen.insert(r.ticker.clone()))
        .map(|r| r.ticker.clone())
        .collect()
}

/// Copies batch results onto matching records (fields already present on a record are
/// kept). Records still lacking a sector afterwards are classified by company name.
pub fn attach_enrichment(
    records: &[HoldingRecord],
    batch: &[TickerEnrichment],
) -> Vec<HoldingRecord> {
    let by_ticker: HashMap<&str, &TickerEnrichment> =
        batch.iter().map(|r| (r.ticker.as_str(), r)).collect();

    records
        .iter()
        .map(|rec| {
            let mut rec = rec.clone();
            if rec.has_ticker() {
                if let Some(found) = by_ticker.get(rec.ticker.as_str()) {
                    rec.enrichment.keep_first(&found.enrichment);
                }
            }
            if rec.enrichment.sector().is_none() {
                if let Some(class) = lookup_fallback(&rec.ticker, Some(&rec.name)) {
                    fetcher::fill_classification(&mut rec.enrichment, class);
                }
            }
            rec
        })
        .collect()
}
