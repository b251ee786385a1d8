//! Portfolio table data: one row per position plus a totals row.
//!
//! Totals always cover every position, even when `rows` is truncated for display.

use crate::analytics::sort_desc_by;
use crate::analytics::stats::{clamp_growth, round_opt, round_to, HarmonicMean, WeightedMean};
use crate::analytics::weighting::{combined_portfolio, CombinedPosition};
use crate::analytics::OrderedGroups;
use crate::domain::holding::{Enrichment, HoldingRecord, ManagerWeights, MonthlyReturn};
use crate::text::{eps_beat_label, shorten_stock_name, weighting_note};
use serde::Serialize;
use std::collections::BTreeMap;

pub const COMBINED_TABLE_TITLE: &str = "Weighted Portfolio";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub pct: f64,
    pub name: String,
    pub ticker: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub filing_price: Option<f64>,
    pub current_price: Option<f64>,
    pub qtd_return: Option<f64>,
    pub forward_pe: Option<f64>,
    pub forward_eps_growth: Option<f64>,
    pub filing_reported_eps: Option<f64>,
    pub eps_beat_dollars: Option<f64>,
    pub eps_beat_pct: Option<f64>,
    pub eps_beat_label: String,
    pub monthly_returns: Vec<MonthlyReturn>,
}

impl TableRow {
    fn new(pct: f64, name: &str, ticker: &str, e: &Enrichment) -> Self {
        Self {
            pct,
            name: shorten_stock_name(name),
            ticker: ticker.to_string(),
            sector: e.sector().map(str::to_string),
            industry: e.industry().map(str::to_string),
            filing_price: e.filing.price_qtr_end,
            current_price: e.current_price,
            qtd_return: e.qtd_return_pct,
            forward_pe: e.forward_pe,
            forward_eps_growth: e.forward_eps_growth,
            filing_reported_eps: e.filing.reported_eps,
            eps_beat_dollars: e.filing.eps_beat_dollars,
            eps_beat_pct: e.filing.eps_beat_pct,
            eps_beat_label: eps_beat_label(e.filing.eps_beat_dollars, e.filing.eps_beat_pct),
            monthly_returns: e.monthly_returns.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableTotals {
    pub total_pct: f64,
    pub qtd_return: Option<f64>,
    /// Harmonic; non-positive P/E excluded.
    pub forward_pe: Option<f64>,
    /// Clamped to ±50 per row before weighting.
    pub forward_eps_growth: Option<f64>,
    pub monthly_returns: Vec<MonthlyReturn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioTable {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_note: Option<String>,
    pub rows: Vec<TableRow>,
    pub total_rows: usize,
    pub totals: TableTotals,
}

pub fn compute_totals(rows: &[TableRow]) -> TableTotals {
    let mut qtd = WeightedMean::default();
    let mut pe = HarmonicMean::default();
    let mut growth = WeightedMean::default();
    let mut months = OrderedGroups::<WeightedMean>::default();

    for row in rows.iter().filter(|r| r.pct > 0.0) {
        let w = row.pct;
        qtd.add_opt(row.qtd_return, w);
        pe.add_opt(row.forward_pe, w);
        growth.add_opt(row.forward_eps_growth.map(clamp_growth), w);
        for m in &row.monthly_returns {
            let acc = months.entry(&m.month, WeightedMean::default);
            acc.add_opt(m.return_pct, w);
        }
    }

    TableTotals {
        total_pct: round_to(rows.iter().map(|r| r.pct).sum(), 2),
        qtd_return: round_opt(qtd.value(), 2),
        forward_pe: round_opt(pe.value(), 2),
        forward_eps_growth: round_opt(growth.value(), 2),
        monthly_returns: months
            .into_vec()
            .into_iter()
            .map(|(month, acc)| MonthlyReturn {
                month,
                return_pct: round_opt(acc.value(), 2),
            })
            .collect(),
    }
}

fn finish(
    title: String,
    weight_note: Option<String>,
    rows: Vec<TableRow>,
    top_n: Option<usize>,
) -> PortfolioTable {
    let totals = compute_totals(&rows);
    let total_rows = rows.len();
    let mut rows = rows;
    if let Some(n) = top_n {
        rows.truncate(n);
    }
    PortfolioTable {
        title,
        weight_note,
        rows,
        total_rows,
        totals,
    }
}

/// The synthetic portfolio, one row per de-duplicated position, by combined weight.
pub fn build_combined_table(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
    top_n: Option<usize>,
) -> PortfolioTable {
    let mut positions = combined_portfolio(records, weights);
    sort_desc_by(&mut positions, |p| p.combined_weight);
    let rows = positions
        .iter()
        .map(|p: &CombinedPosition| {
            TableRow::new(p.combined_weight, &p.name, &p.ticker, &p.enrichment)
        })
        .collect();

    let managers: Vec<String> = records.iter().map(|r| r.manager.clone()).collect();
    let note = weighting_note(&managers, weights);
    finish(
        COMBINED_TABLE_TITLE.to_string(),
        (!note.is_empty()).then_some(note),
        rows,
        top_n,
    )
}

/// One table per manager from that manager's raw rows, in manager name order.
pub fn build_manager_tables(
    records: &[HoldingRecord],
    top_n: Option<usize>,
) -> Vec<PortfolioTable> {
    let mut by_manager: BTreeMap<&str, Vec<&HoldingRecord>> = BTreeMap::new();
    for r in records {
        by_manager.entry(r.manager.as_str()).or_default().push(r);
    }

    by_manager
        .into_iter()
        .map(|(manager, mut rows)| {
            sort_desc_by(&mut rows, |r| r.pct_of_portfolio);
            let rows = rows
                .into_iter()
                .map(|r| TableRow::new(r.pct_of_portfolio, &r.name, &r.ticker, &r.enrichment))
                .collect();
            finish(manager.to_string(), None, rows, top_n)
        })
        .collect()
}
