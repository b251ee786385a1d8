use crate::analytics::stats::round_to;
use crate::analytics::treemap::{build_nodes, Dimension};
use crate::analytics::weighting::{combined_portfolio, CombinedPosition};
use crate::domain::benchmark::BenchmarkSnapshot;
use crate::domain::holding::{HoldingRecord, ManagerWeights};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightDelta {
    pub name: String,
    pub portfolio_pct: f64,
    pub benchmark_pct: f64,
    /// portfolio − benchmark, percentage points.
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkHoldingComparison {
    pub ticker: String,
    pub name: String,
    pub benchmark_pct: f64,
    pub portfolio_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub benchmark: Option<String>,
    pub sectors: Vec<WeightDelta>,
    pub countries: Vec<WeightDelta>,
    pub top_holdings: Vec<BenchmarkHoldingComparison>,
}

fn category_weights(positions: &[CombinedPosition], dimension: Dimension) -> BTreeMap<String, f64> {
    build_nodes(positions, dimension)
        .into_iter()
        .map(|n| (n.name, n.pct))
        .collect()
}

/// Union of both key sets; a side missing a key counts as 0. Sorted by |delta|, largest first.
fn deltas(
    portfolio: &BTreeMap<String, f64>,
    benchmark: &BTreeMap<String, f64>,
) -> Vec<WeightDelta> {
    let mut names: Vec<&String> = portfolio.keys().chain(benchmark.keys()).collect();
    names.sort();
    names.dedup();

    let mut out: Vec<WeightDelta> = names
        .into_iter()
        .map(|name| {
            let p = portfolio.get(name).copied().unwrap_or(0.0);
            let b = benchmark.get(name).copied().unwrap_or(0.0);
            WeightDelta {
                name: name.clone(),
                portfolio_pct: round_to(p, 2),
                benchmark_pct: round_to(b, 2),
                delta: round_to(p - b, 2),
            }
        })
        .collect();
    out.sort_by(|a, b| {
        b.delta
            .abs()
            .partial_cmp(&a.delta.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

/// Compares the combined portfolio's synthetic weights with a benchmark on the canonical
/// sector and country taxonomy.
pub fn compare_to_benchmark(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
    benchmark: &BenchmarkSnapshot,
) -> BenchmarkComparison {
    let benchmark = benchmark.normalized();
    let positions = combined_portfolio(records, weights);

    let top_holdings = benchmark
        .top_holdings
        .iter()
        .map(|h| {
            let held: f64 = positions
                .iter()
                .filter(|p| p.has_ticker() && p.ticker.eq_ignore_ascii_case(h.ticker.trim()))
                .map(|p| p.combined_weight)
                .sum();
            BenchmarkHoldingComparison {
                ticker: h.ticker.clone(),
                name: h.name.clone(),
                benchmark_pct: h.weight,
                portfolio_pct: round_to(held, 2),
            }
        })
        .collect();

    BenchmarkComparison {
        sectors: deltas(&category_weights(&positions, Dimension::Sector), &benchmark.sectors),
        countries: deltas(&category_weights(&positions, Dimension::Country), &benchmark.countries),
        top_holdings,
        benchmark: benchmark.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::benchmark::BenchmarkHolding;
    use crate::domain::holding::Enrichment;
    use chrono::NaiveDate;

    fn rec(ticker: &str, pct: f64, sector: &str, country: &str) -> HoldingRecord {
        HoldingRecord {
            manager: "A".to_string(),
            ticker: ticker.to_string(),
            name: format!("{ticker} Inc"),
            value_usd: pct,
            pct_of_portfolio: pct,
            rank: 1,
            period_of_report: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            enrichment: Enrichment {
                sector: Some(sector.to_string()),
                country: Some(country.to_string()),
                ..Default::default()
            },
            combined_weight: None,
        }
    }

    #[test]
    fn deltas_over_canonical_keys() {
        let records = vec![
            rec("AAPL", 70.0, "Technology", "United States"),
            rec("XOM", 30.0, "Energy", "United States"),
        ];
        let mut sectors = BTreeMap::new();
        sectors.insert("Technology".to_string(), 25.0);
        sectors.insert("Financials".to_string(), 15.0);
        let mut countries = BTreeMap::new();
        countries.insert("USA".to_string(), 60.0);
        let bench = BenchmarkSnapshot {
            name: Some("ACWI".into()),
            sectors,
            countries,
            top_holdings: vec![
                BenchmarkHolding { ticker: "aapl".into(), name: "Apple".into(), weight: 4.0 },
                BenchmarkHolding { ticker: "NVDA".into(), name: "NVIDIA".into(), weight: 5.0 },
            ],
        };

        let cmp = compare_to_benchmark(&records, None, &bench);
        assert_eq!(cmp.benchmark.as_deref(), Some("ACWI"));

        let first = &cmp.sectors[0];
        assert_eq!(first.name, "Information Technology");
        assert_eq!(first.delta, 45.0);
        let fin = cmp.sectors.iter().find(|d| d.name == "Financials").unwrap();
        assert_eq!((fin.portfolio_pct, fin.delta), (0.0, -15.0));
        assert_eq!(cmp.sectors.len(), 3);

        assert_eq!(cmp.countries.len(), 1);
        assert_eq!(cmp.countries[0].delta, 40.0);

        assert_eq!(cmp.top_holdings[0].portfolio_pct, 70.0);
        assert_eq!(cmp.top_holdings[1].portfolio_pct, 0.0);
    }
}
