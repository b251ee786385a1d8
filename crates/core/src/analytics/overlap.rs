use crate::analytics::stats::round_to;
use crate::analytics::OrderedGroups;
use crate::domain::holding::HoldingRecord;
use crate::text::display_label;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlapEntry {
    pub ticker: String,
    pub name: String,
    pub display_label: String,
    /// Sorted, distinct.
    pub managers: Vec<String>,
    pub manager_count: usize,
    pub total_value: f64,
    pub avg_pct: f64,
    pub sector: Option<String>,
    pub industry: Option<String>,
}

#[derive(Default)]
struct Acc {
    name: String,
    managers: Vec<String>,
    total_value: f64,
    pct_sum: f64,
    rows: usize,
    sector: Option<String>,
    industry: Option<String>,
}

/// Tickers held by two or more distinct managers, from raw (unweighted) records.
/// Name, sector and industry are the last non-empty values seen.
pub fn compute_overlap(records: &[HoldingRecord]) -> Vec<OverlapEntry> {
    let mut groups = OrderedGroups::<Acc>::default();

    for rec in records.iter().filter(|r| r.has_ticker()) {
        let acc = groups.entry(&rec.ticker, Acc::default);
        acc.name = rec.name.clone();
        if !acc.managers.contains(&rec.manager) {
            acc.managers.push(rec.manager.clone());
        }
        acc.total_value += rec.value_usd;
        acc.pct_sum += rec.pct_of_portfolio;
        acc.rows += 1;
        if let Some(s) = rec.enrichment.sector() {
            acc.sector = Some(s.to_string());
        }
        if let Some(i) = rec.enrichment.industry() {
            acc.industry = Some(i.to_string());
        }
    }

    let mut out: Vec<OverlapEntry> = groups
        .into_vec()
        .into_iter()
        .filter(|(_, acc)| acc.managers.len() >= 2)
        .map(|(ticker, mut acc)| {
            acc.managers.sort();
            OverlapEntry {
                display_label: display_label(&acc.name, &ticker),
                manager_count: acc.managers.len(),
                managers: acc.managers,
                avg_pct: round_to(acc.pct_sum / acc.rows as f64, 2),
                total_value: acc.total_value,
                sector: acc.sector,
                industry: acc.industry,
                name: acc.name,
                ticker,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        b.manager_count.cmp(&a.manager_count).then_with(|| {
            b.total_value
                .partial_cmp(&a.total_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::{Enrichment, UNKNOWN_TICKER};
    use chrono::NaiveDate;

    fn rec(manager: &str, ticker: &str, pct: f64, value: f64) -> HoldingRecord {
        HoldingRecord {
            manager: manager.to_string(),
            ticker: ticker.to_string(),
            name: format!("{ticker} Corp"),
            value_usd: value,
            pct_of_portfolio: pct,
            rank: 1,
            period_of_report: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            enrichment: Enrichment::default(),
            combined_weight: None,
        }
    }

    #[test]
    fn only_multi_manager_tickers() {
        let mut b_row = rec("B", "TICK", 4.0, 40.0);
        b_row.enrichment.sector = Some("Energy".into());
        let records = vec![
            rec("A", "TICK", 3.0, 30.0),
            rec("A", "SOLO", 9.0, 900.0),
            b_row,
            rec("A", UNKNOWN_TICKER, 1.0, 1.0),
            rec("B", UNKNOWN_TICKER, 1.0, 1.0),
        ];

        let out = compute_overlap(&records);
        assert_eq!(out.len(), 1);
        let tick = &out[0];
        assert_eq!(tick.ticker, "TICK");
        assert_eq!(tick.manager_count, 2);
        assert_eq!(tick.avg_pct, 3.5);
        assert_eq!(tick.total_value, 70.0);
        assert_eq!(tick.managers, vec!["A", "B"]);
        assert_eq!(tick.sector.as_deref(), Some("Energy"));
        assert_eq!(tick.display_label, "TICK Corp (TICK)");
    }

    #[test]
    fn same_manager_twice_is_not_overlap() {
        let records = vec![rec("A", "DUP", 1.0, 1.0), rec("A", "DUP", 2.0, 2.0)];
        assert!(compute_overlap(&records).is_empty());
    }

    #[test]
    fn sorted_by_count_then_value() {
        let records = vec![
            rec("A", "LOW", 1.0, 10.0),
            rec("B", "LOW", 1.0, 10.0),
            rec("A", "HIGH", 1.0, 100.0),
            rec("B", "HIGH", 1.0, 100.0),
            rec("A", "WIDE", 1.0, 1.0),
            rec("B", "WIDE", 1.0, 1.0),
            rec("C", "WIDE", 1.0, 1.0),
        ];
        let order: Vec<String> = compute_overlap(&records).into_iter().map(|e| e.ticker).collect();
        assert_eq!(order, vec!["WIDE", "HIGH", "LOW"]);
    }
}
