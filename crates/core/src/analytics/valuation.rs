use crate::analytics::sort_desc_by;
use crate::analytics::stats::{round_opt, round_to, ForwardMetrics};
use crate::analytics::weighting::{combined_portfolio, CombinedPosition};
use crate::domain::holding::{HoldingRecord, ManagerWeights};
use crate::taxonomy::normalize_sector_opt;
use crate::text::shorten_stock_name;
use serde::Serialize;

pub const DEFAULT_SCATTER_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationPoint {
    pub ticker: String,
    pub name: String,
    pub short_name: String,
    pub pct: f64,
    pub forward_pe: f64,
    pub forward_eps_growth: f64,
    pub dividend_yield: Option<f64>,
    pub sector: String,
}

/// Weighted forward metrics of the whole combined portfolio, not just the plotted points.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioValuation {
    pub forward_pe: Option<f64>,
    pub forward_ps: Option<f64>,
    pub eps_growth: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub expected_return: Option<f64>,
}

impl PortfolioValuation {
    pub fn from_metrics(m: &ForwardMetrics) -> Self {
        Self {
            forward_pe: round_opt(m.pe.value(), 2),
            forward_ps: round_opt(m.ps.value(), 2),
            eps_growth: round_opt(m.eps_growth.value(), 2),
            revenue_growth: round_opt(m.revenue_growth.value(), 2),
            dividend_yield: round_opt(m.dividend_yield.value(), 2),
            expected_return: round_opt(m.expected_return(), 2),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValuationScatter {
    pub stocks: Vec<ValuationPoint>,
    pub portfolio_avg: PortfolioValuation,
}

pub fn position_metrics<'a>(
    positions: impl IntoIterator<Item = &'a CombinedPosition>,
) -> ForwardMetrics {
    let mut metrics = ForwardMetrics::default();
    for p in positions {
        let e = &p.enrichment;
        metrics.add(
            p.combined_weight,
            e.forward_pe,
            e.forward_ps,
            e.forward_eps_growth,
            e.forward_revenue_growth,
            e.dividend_yield,
        );
    }
    metrics
}

/// Top `top_n` positions by combined weight that have both a forward P/E and a
/// forward EPS growth figure. Positions missing either are skipped and do not
/// count toward `top_n`.
pub fn compute_valuation_scatter(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
    top_n: usize,
) -> ValuationScatter {
    let mut positions: Vec<CombinedPosition> = combined_portfolio(records, weights)
        .into_iter()
        .filter(CombinedPosition::has_ticker)
        .collect();
    sort_desc_by(&mut positions, |p| p.combined_weight);

    let stocks = positions
        .iter()
        .filter_map(|p| {
            let e = &p.enrichment;
            let (pe, growth) = (e.forward_pe?, e.forward_eps_growth?);
            Some(ValuationPoint {
                ticker: p.ticker.clone(),
                name: p.name.clone(),
                short_name: shorten_stock_name(&p.name),
                pct: round_to(p.combined_weight, 2),
                forward_pe: round_to(pe, 2),
                forward_eps_growth: round_to(growth, 2),
                dividend_yield: round_opt(e.dividend_yield, 2),
                sector: normalize_sector_opt(e.sector()),
            })
        })
        .take(top_n)
        .collect();

    ValuationScatter {
        stocks,
        portfolio_avg: PortfolioValuation::from_metrics(&position_metrics(&positions)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::Enrichment;
    use chrono::NaiveDate;

    fn rec(ticker: &str, pct: f64, pe: Option<f64>, growth: Option<f64>) -> HoldingRecord {
        HoldingRecord {
            manager: "A".to_string(),
            ticker: ticker.to_string(),
            name: format!("{ticker} Corp"),
            value_usd: pct * 100.0,
            pct_of_portfolio: pct,
            rank: 1,
            period_of_report: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            enrichment: Enrichment {
                forward_pe: pe,
                forward_eps_growth: growth,
                ..Default::default()
            },
            combined_weight: None,
        }
    }

    #[test]
    fn harmonic_pe_over_equal_weights() {
        let records = vec![
            rec("AAA", 50.0, Some(10.0), Some(5.0)),
            rec("BBB", 50.0, Some(20.0), Some(5.0)),
        ];
        let v = compute_valuation_scatter(&records, None, DEFAULT_SCATTER_SIZE);
        assert_eq!(v.portfolio_avg.forward_pe, Some(13.33));
        assert_eq!(v.stocks.len(), 2);
    }

    #[test]
    fn rows_missing_either_metric_do_not_count_toward_n() {
        let records = vec![
            rec("BIG", 40.0, Some(30.0), None),
            rec("MID", 30.0, Some(15.0), Some(10.0)),
            rec("NOPE", 20.0, None, Some(10.0)),
            rec("LOW", 10.0, Some(12.0), Some(120.0)),
        ];
        let v = compute_valuation_scatter(&records, None, 2);
        let tickers: Vec<&str> = v.stocks.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["MID", "LOW"]);
        // plotted value is raw; the portfolio average uses the clamped figure
        assert_eq!(v.stocks[1].forward_eps_growth, 120.0);
        // (30·10 + 20·10 + 10·50) / 60
        assert_eq!(v.portfolio_avg.eps_growth, Some(16.67));
        assert_eq!(v.portfolio_avg.expected_return, None);
    }

    #[test]
    fn expected_return_adds_dividend_yield() {
        let mut r = rec("DIV", 100.0, Some(10.0), Some(6.0));
        r.enrichment.dividend_yield = Some(2.5);
        let v = compute_valuation_scatter(&[r], None, 5);
        assert_eq!(v.portfolio_avg.expected_return, Some(8.5));
    }

    #[test]
    fn empty_portfolio() {
        let v = compute_valuation_scatter(&[], None, 5);
        assert!(v.stocks.is_empty());
        assert_eq!(v.portfolio_avg, PortfolioValuation::default());
    }
}
