//! Headline statistics for a run: counts, EPS beat rate, top stocks, weighted returns
//! and the combined portfolio's forward metrics.

use crate::analytics::sort_desc_by;
use crate::analytics::stats::{round_opt, round_to, WeightedMean};
use crate::analytics::valuation::{position_metrics, PortfolioValuation};
use crate::analytics::weighting::{combined_portfolio, CombinedPosition};
use crate::analytics::OrderedGroups;
use crate::domain::holding::{HoldingRecord, ManagerWeights};
use crate::text::{quarter_label, shorten_stock_name};
use crate::time::quarter::prior_quarter_end;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const TOP_STOCKS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MostCommonStock {
    pub ticker: String,
    pub name: String,
    pub manager_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockByValue {
    pub ticker: String,
    /// Last name seen for the ticker.
    pub name: String,
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockByWeight {
    pub ticker: String,
    pub name: String,
    pub short_name: String,
    pub pct: f64,
    pub manager_count: usize,
    pub sector: Option<String>,
}

/// Returns weighted by each row's own `pct_of_portfolio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightedReturn {
    pub filing_qtr_weighted_return: Option<f64>,
    pub prior_qtr_weighted_return: Option<f64>,
    pub qtd_weighted_return: Option<f64>,
    pub stocks_with_return: usize,
    pub stocks_without_return: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_holdings: usize,
    pub unique_stocks: usize,
    pub unique_managers: usize,
    pub most_common_stock: Option<MostCommonStock>,
    pub avg_quarter_return: Option<f64>,
    pub eps_beat_rate: Option<f64>,
    pub eps_beat_count: usize,
    pub eps_total_count: usize,
    pub total_value: f64,
    pub top_stocks_by_value: Vec<StockByValue>,
    pub top_stocks_by_pct: Vec<StockByWeight>,
    pub weighted_return: WeightedReturn,
    pub weighted_return_by_manager: BTreeMap<String, WeightedReturn>,
    pub filing_quarter: Option<String>,
    pub prior_quarter: Option<String>,
    pub filing_period: Option<NaiveDate>,
    pub forward: PortfolioValuation,
}

pub fn compute_weighted_return<'a>(
    rows: impl IntoIterator<Item = &'a HoldingRecord>,
) -> WeightedReturn {
    let mut filing = WeightedMean::default();
    let mut prior = WeightedMean::default();
    let mut qtd = WeightedMean::default();
    let mut out = WeightedReturn::default();

    for r in rows {
        let w = r.pct_of_portfolio;
        let e = &r.enrichment;
        filing.add_opt(e.filing.return_pct, w);
        prior.add_opt(e.prior.return_pct, w);
        qtd.add_opt(e.qtd_return_pct, w);
        if e.filing.return_pct.is_some() {
            out.stocks_with_return += 1;
        } else {
            out.stocks_without_return += 1;
        }
    }

    out.filing_qtr_weighted_return = round_opt(filing.value(), 2);
    out.prior_qtr_weighted_return = round_opt(prior.value(), 2);
    out.qtd_weighted_return = round_opt(qtd.value(), 2);
    out
}

pub fn compute_weighted_return_by_manager(
    records: &[HoldingRecord],
) -> BTreeMap<String, WeightedReturn> {
    let mut by_manager: BTreeMap<&str, Vec<&HoldingRecord>> = BTreeMap::new();
    for r in records {
        by_manager.entry(r.manager.as_str()).or_default().push(r);
    }
    by_manager
        .into_iter()
        .map(|(m, rows)| (m.to_string(), compute_weighted_return(rows)))
        .collect()
}

/// Most frequent `period_of_report`; the first one encountered wins ties.
pub fn main_filing_period(records: &[HoldingRecord]) -> Option<NaiveDate> {
    let mut counts = OrderedGroups::<(NaiveDate, usize)>::default();
    for r in records {
        let p = r.period_of_report;
        counts.entry(&p.to_string(), || (p, 0)).1 += 1;
    }
    let mut best: Option<(NaiveDate, usize)> = None;
    for (_, (period, n)) in counts.into_vec() {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((period, n));
        }
    }
    best.map(|(p, _)| p)
}

fn most_common_stock(records: &[HoldingRecord]) -> Option<MostCommonStock> {
    let mut holders = OrderedGroups::<(String, BTreeSet<&str>)>::default();
    for r in records.iter().filter(|r| r.has_ticker()) {
        holders
            .entry(&r.ticker, || (r.name.clone(), BTreeSet::new()))
            .1
            .insert(r.manager.as_str());
    }

    let mut best: Option<MostCommonStock> = None;
    for (ticker, (name, managers)) in holders.into_vec() {
        if managers.len() > best.as_ref().map_or(0, |b| b.manager_count) {
            best = Some(MostCommonStock {
                ticker,
                name,
                manager_count: managers.len(),
            });
        }
    }
    best
}

fn top_by_value(records: &[HoldingRecord]) -> Vec<StockByValue> {
    let mut groups = OrderedGroups::<StockByValue>::default();
    for r in records.iter().filter(|r| r.has_ticker()) {
        let s = groups.entry(&r.ticker, || StockByValue {
            ticker: r.ticker.clone(),
            name: String::new(),
            value: 0.0,
            count: 0,
        });
        s.value += r.value_usd;
        s.name = r.name.clone();
        s.count += 1;
    }
    let mut out: Vec<StockByValue> = groups.into_vec().into_iter().map(|(_, s)| s).collect();
    sort_desc_by(&mut out, |s| s.value);
    out.truncate(TOP_STOCKS);
    out
}

fn top_by_weight(positions: &[CombinedPosition]) -> Vec<StockByWeight> {
    let mut ranked: Vec<&CombinedPosition> = positions.iter().collect();
    sort_desc_by(&mut ranked, |p| p.combined_weight);
    ranked
        .into_iter()
        .take(TOP_STOCKS)
        .map(|p| StockByWeight {
            ticker: p.ticker.clone(),
            name: p.name.clone(),
            short_name: shorten_stock_name(&p.name),
            pct: round_to(p.combined_weight, 2),
            manager_count: p.manager_count(),
            sector: p.enrichment.sector().map(str::to_string),
        })
        .collect()
}

pub fn compute_summary_stats(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
) -> PortfolioSummary {
    if records.is_empty() {
        return PortfolioSummary::default();
    }

    let unique_stocks = records
        .iter()
        .filter(|r| r.has_ticker())
        .map(|r| r.ticker.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    let unique_managers = records
        .iter()
        .map(|r| r.manager.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    let mut avg_return = WeightedMean::default();
    for r in records {
        avg_return.add_opt(r.enrichment.filing.return_pct, 1.0);
    }

    let beats: Vec<f64> = records
        .iter()
        .filter_map(|r| r.enrichment.filing.eps_beat_dollars)
        .collect();
    let eps_beat_count = beats.iter().filter(|b| **b > 0.0).count();
    let eps_beat_rate = (!beats.is_empty())
        .then(|| round_to(eps_beat_count as f64 / beats.len() as f64 * 100.0, 1));

    let positions: Vec<CombinedPosition> = combined_portfolio(records, weights)
        .into_iter()
        .filter(CombinedPosition::has_ticker)
        .collect();

    let filing_period = main_filing_period(records);

    PortfolioSummary {
        total_holdings: records.len(),
        unique_stocks,
        unique_managers,
        most_common_stock: most_common_stock(records),
        avg_quarter_return: round_opt(avg_return.value(), 2),
        eps_beat_rate,
        eps_beat_count,
        eps_total_count: beats.len(),
        total_value: records.iter().map(|r| r.value_usd).sum(),
        top_stocks_by_value: top_by_value(records),
        top_stocks_by_pct: top_by_weight(&positions),
        weighted_return: compute_weighted_return(records),
        weighted_return_by_manager: compute_weighted_return_by_manager(records),
        filing_quarter: filing_period.map(quarter_label),
        prior_quarter: filing_period.map(|p| quarter_label(prior_quarter_end(p))),
        filing_period,
        forward: PortfolioValuation::from_metrics(&position_metrics(&positions)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::{Enrichment, UNKNOWN_TICKER};

    fn rec(manager: &str, ticker: &str, pct: f64, filing_return: Option<f64>) -> HoldingRecord {
        HoldingRecord {
            manager: manager.to_string(),
            ticker: ticker.to_string(),
            name: format!("{ticker} Inc"),
            value_usd: pct * 10.0,
            pct_of_portfolio: pct,
            rank: 1,
            period_of_report: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            enrichment: Enrichment {
                filing: crate::domain::holding::QuarterFigures {
                    return_pct: filing_return,
                    ..Default::default()
                },
                ..Default::default()
            },
            combined_weight: None,
        }
    }

    #[test]
    fn counts_and_most_common() {
        let records = vec![
            rec("A", "AAA", 50.0, Some(10.0)),
            rec("A", "BBB", 50.0, None),
            rec("B", "BBB", 60.0, Some(-2.0)),
            rec("B", "AAA", 40.0, Some(4.0)),
            rec("C", "CCC", 100.0, None),
            rec("C", UNKNOWN_TICKER, 1.0, None),
        ];
        let s = compute_summary_stats(&records, None);
        assert_eq!(s.total_holdings, 6);
        assert_eq!(s.unique_stocks, 3);
        assert_eq!(s.unique_managers, 3);
        // AAA and BBB both have two holders; AAA was seen first
        let mc = s.most_common_stock.unwrap();
        assert_eq!((mc.ticker.as_str(), mc.manager_count), ("AAA", 2));
        assert_eq!(s.avg_quarter_return, Some(4.0));
        assert_eq!(s.filing_quarter.as_deref(), Some("3Q25"));
        assert_eq!(s.prior_quarter.as_deref(), Some("2Q25"));
        assert_eq!(s.top_stocks_by_value[0].ticker, "BBB");
        assert_eq!(s.top_stocks_by_value[0].count, 2);
        assert!(s.top_stocks_by_value.iter().all(|t| t.ticker != UNKNOWN_TICKER));
    }

    #[test]
    fn weighted_return_uses_manager_pct() {
        let records = vec![
            rec("A", "AAA", 75.0, Some(8.0)),
            rec("A", "BBB", 25.0, Some(-4.0)),
            rec("A", "CCC", 5.0, None),
        ];
        let wr = compute_weighted_return(&records);
        assert_eq!(wr.filing_qtr_weighted_return, Some(5.0));
        assert_eq!(wr.prior_qtr_weighted_return, None);
        assert_eq!(wr.stocks_with_return, 2);
        assert_eq!(wr.stocks_without_return, 1);

        let by_manager = compute_weighted_return_by_manager(&records);
        assert_eq!(by_manager["A"], wr);
    }

    #[test]
    fn eps_beat_rate_counts_rows_with_figures() {
        let mut records = vec![
            rec("A", "AAA", 10.0, None),
            rec("A", "BBB", 10.0, None),
            rec("A", "CCC", 10.0, None),
        ];
        records[0].enrichment.filing.eps_beat_dollars = Some(0.2);
        records[1].enrichment.filing.eps_beat_dollars = Some(-0.1);
        let s = compute_summary_stats(&records, None);
        assert_eq!(s.eps_beat_rate, Some(50.0));
        assert_eq!(s.eps_beat_count, 1);
        assert_eq!(s.eps_total_count, 2);
    }

    #[test]
    fn top_by_weight_is_deduplicated() {
        let mut a = rec("A", "AAA", 40.0, None);
        a.enrichment.forward_pe = Some(20.0);
        let records = vec![a, rec("A", "BBB", 60.0, None), rec("B", "AAA", 100.0, None)];
        let s = compute_summary_stats(&records, None);
        let top = &s.top_stocks_by_pct[0];
        assert_eq!(top.ticker, "AAA");
        assert_eq!(top.pct, 70.0);
        assert_eq!(top.manager_count, 2);
        assert_eq!(s.forward.forward_pe, Some(20.0));
    }

    #[test]
    fn main_period_prefers_majority() {
        let mut records = vec![
            rec("A", "AAA", 1.0, None),
            rec("A", "BBB", 1.0, None),
            rec("B", "CCC", 1.0, None),
        ];
        records[0].period_of_report = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert_eq!(main_filing_period(&records), NaiveDate::from_ymd_opt(2025, 9, 30));
        assert_eq!(main_filing_period(&[]), None);
    }

    #[test]
    fn empty_is_neutral() {
        assert_eq!(compute_summary_stats(&[], None), PortfolioSummary::default());
    }
}
