use chrono::{DateTime, NaiveDate, Utc};
use holdlens_core::analytics::benchmark::{compare_to_benchmark, BenchmarkComparison};
use holdlens_core::analytics::breakdown::{
    compute_geo_breakdown, compute_sector_breakdown, GeoBreakdown, SectorBreakdown,
};
use holdlens_core::analytics::diff::{compute_qoq_diff, QoqDiff};
use holdlens_core::analytics::overlap::{compute_overlap, OverlapEntry};
use holdlens_core::analytics::summary::{compute_summary_stats, PortfolioSummary};
use holdlens_core::analytics::table::{build_combined_table, build_manager_tables, PortfolioTable};
use holdlens_core::analytics::treemap::{
    compute_geo_treemap, compute_sector_treemap, GeoTreemap, SectorTreemap,
};
use holdlens_core::analytics::valuation::{compute_valuation_scatter, ValuationScatter};
use holdlens_core::analytics::weighting::EffectiveWeights;
use holdlens_core::domain::benchmark::BenchmarkSnapshot;
use holdlens_core::domain::holding::{HoldingRecord, ManagerWeights};
use holdlens_core::text::narrative::{self, PortfolioNarrative};
use holdlens_core::text::weighting_note;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ReportInputs<'a> {
    pub records: &'a [HoldingRecord],
    pub previous: Option<&'a [HoldingRecord]>,
    pub weights: Option<&'a ManagerWeights>,
    pub benchmark: Option<&'a BenchmarkSnapshot>,
    pub as_of_date: NaiveDate,
    pub quarter_end: Option<NaiveDate>,
    pub enriched: bool,
    pub top_n: usize,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub as_of_date: NaiveDate,
    pub quarter_end: Option<NaiveDate>,
    pub enriched: bool,
    pub weights: EffectiveWeights,
    pub weighting_note: String,
    pub narrative: PortfolioNarrative,
    pub summary: PortfolioSummary,
    pub overlap: Vec<OverlapEntry>,
    pub sector_breakdown: SectorBreakdown,
    pub geo_breakdown: GeoBreakdown,
    pub sector_treemap: SectorTreemap,
    pub geo_treemap: GeoTreemap,
    pub valuation: ValuationScatter,
    pub combined_table: PortfolioTable,
    pub manager_tables: Vec<PortfolioTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qoq_diff: Option<QoqDiff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkComparison>,
    pub holdings: Vec<HoldingRecord>,
}

pub fn build_report(input: ReportInputs<'_>, generated_at: DateTime<Utc>) -> RunReport {
    let ReportInputs {
        records,
        previous,
        weights,
        benchmark,
        as_of_date,
        quarter_end,
        enriched,
        top_n,
    } = input;

    let summary = compute_summary_stats(records, weights);
    let overlap = compute_overlap(records);
    let valuation = compute_valuation_scatter(records, weights, top_n);
    let qoq_diff = previous.map(|prev| compute_qoq_diff(records, prev));
    let narrative = narrative::build(&summary, &valuation, &overlap, qoq_diff.as_ref());

    let managers: Vec<String> = records.iter().map(|r| r.manager.clone()).collect();

    RunReport {
        run_id: Uuid::new_v4(),
        generated_at,
        as_of_date,
        quarter_end,
        enriched,
        weights: EffectiveWeights::resolve(records, weights),
        weighting_note: weighting_note(&managers, weights),
        narrative,
        summary,
        overlap,
        sector_breakdown: compute_sector_breakdown(records),
        geo_breakdown: compute_geo_breakdown(records),
        sector_treemap: compute_sector_treemap(records, weights),
        geo_treemap: compute_geo_treemap(records, weights),
        valuation,
        combined_table: build_combined_table(records, weights, Some(top_n)),
        manager_tables: build_manager_tables(records, None),
        qoq_diff,
        benchmark: benchmark.map(|b| compare_to_benchmark(records, weights, b)),
        holdings: records.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdlens_core::domain::contract::parse_holdings;
    use serde_json::json;

    fn holdings() -> Vec<HoldingRecord> {
        let v = json!([
            {"manager": "Alpha", "ticker": "AAPL", "name": "Apple Inc", "value_usd": 6000.0,
             "pct_of_portfolio": 60.0, "rank": 1, "period_of_report": "2025-09-30",
             "sector": "Technology", "country": "United States", "forward_pe": 28.0,
             "forward_eps_growth": 9.0},
            {"manager": "Alpha", "ticker": "XOM", "name": "Exxon Mobil Corp", "value_usd": 4000.0,
             "pct_of_portfolio": 40.0, "rank": 2, "period_of_report": "2025-09-30"},
            {"manager": "Beta", "ticker": "AAPL", "name": "Apple Inc", "value_usd": 500.0,
             "pct_of_portfolio": 100.0, "rank": 1, "period_of_report": "2025-09-30"}
        ]);
        parse_holdings(&v.to_string()).unwrap()
    }

    #[test]
    fn report_has_every_section() {
        let records = holdings();
        let as_of = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let report = build_report(
            ReportInputs {
                records: &records,
                previous: Some(&records[..2]),
                weights: None,
                benchmark: None,
                as_of_date: as_of,
                quarter_end: NaiveDate::from_ymd_opt(2025, 9, 30),
                enriched: false,
                top_n: 20,
            },
            Utc::now(),
        );

        assert_eq!(report.summary.total_holdings, 3);
        assert_eq!(report.overlap.len(), 1);
        assert_eq!(report.manager_tables.len(), 2);
        assert_eq!(report.combined_table.rows[0].ticker, "AAPL");
        assert_eq!(report.combined_table.rows[0].pct, 80.0);
        assert_eq!(report.weighting_note, "Weightings: Alpha: equal, Beta: equal");
        assert!(report.weights.equal);
        let diff = report.qoq_diff.as_ref().unwrap();
        assert_eq!(diff["Beta"].new_positions.len(), 1);
        assert!(report.benchmark.is_none());

        let v = serde_json::to_value(&report).unwrap();
        assert!(v.get("run_id").is_some());
        assert!(v.get("benchmark").is_none());
        assert_eq!(v["holdings"].as_array().map(Vec::len), Some(3));
    }
}
