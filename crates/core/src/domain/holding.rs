use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ticker placeholder used by the filings collector when CUSIP resolution failed.
pub const UNKNOWN_TICKER: &str = "N/A";

/// Manager id -> relative allocation (0..100).
pub type ManagerWeights = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub manager: String,
    pub ticker: String,
    pub name: String,
    pub value_usd: f64,
    /// Share within this manager's own top-N, in percent.
    pub pct_of_portfolio: f64,
    pub rank: u32,
    pub period_of_report: NaiveDate,
    #[serde(default, flatten)]
    pub enrichment: Enrichment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_weight: Option<f64>,
}

impl HoldingRecord {
    pub fn has_ticker(&self) -> bool {
        has_known_ticker(&self.ticker)
    }

    /// Grouping key: the ticker, or the company name when the ticker is unknown.
    pub fn position_key(&self) -> &str {
        if self.has_ticker() {
            &self.ticker
        } else {
            &self.name
        }
    }
}

pub fn has_known_ticker(ticker: &str) -> bool {
    let t = ticker.trim();
    !t.is_empty() && t != UNKNOWN_TICKER
}

/// Price, return and earnings figures for one reporting quarter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterFigures {
    pub price_qtr_end: Option<f64>,
    pub return_pct: Option<f64>,
    pub reported_eps: Option<f64>,
    pub consensus_eps: Option<f64>,
    pub eps_beat_dollars: Option<f64>,
    pub eps_beat_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    pub month: String,
    pub return_pct: Option<f64>,
}

/// Market data attached to a holding. Every field degrades to `None` independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enrichment {
    pub prior: QuarterFigures,
    pub filing: QuarterFigures,
    pub forward_pe: Option<f64>,
    pub forward_eps_growth: Option<f64>,
    pub forward_revenue_growth: Option<f64>,
    pub forward_ps: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub forward_eps: Option<f64>,
    pub qtd_return_pct: Option<f64>,
    pub qtd_price_start: Option<f64>,
    pub current_price: Option<f64>,
    pub monthly_returns: Option<Vec<MonthlyReturn>>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn sector(&self) -> Option<&str> {
        non_blank(self.sector.as_deref())
    }

    pub fn industry(&self) -> Option<&str> {
        non_blank(self.industry.as_deref())
    }

    pub fn country(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }

    /// Fills every empty field from `other`, leaving populated fields untouched.
    pub fn keep_first(&mut self, other: &Enrichment) {
        self.prior.keep_first(&other.prior);
        self.filing.keep_first(&other.filing);
        fill(&mut self.forward_pe, &other.forward_pe);
        fill(&mut self.forward_eps_growth, &other.forward_eps_growth);
        fill(&mut self.forward_revenue_growth, &other.forward_revenue_growth);
        fill(&mut self.forward_ps, &other.forward_ps);
        fill(&mut self.dividend_yield, &other.dividend_yield);
        fill(&mut self.trailing_eps, &other.trailing_eps);
        fill(&mut self.forward_eps, &other.forward_eps);
        fill(&mut self.qtd_return_pct, &other.qtd_return_pct);
        fill(&mut self.qtd_price_start, &other.qtd_price_start);
        fill(&mut self.current_price, &other.current_price);
        if self.monthly_returns.as_ref().map_or(true, |m| m.is_empty()) {
            if let Some(m) = other.monthly_returns.as_ref().filter(|m| !m.is_empty()) {
                self.monthly_returns = Some(m.clone());
            }
        }
        fill_text(&mut self.sector, &other.sector);
        fill_text(&mut self.industry, &other.industry);
        fill_text(&mut self.country, &other.country);
    }
}

impl QuarterFigures {
    fn keep_first(&mut self, other: &QuarterFigures) {
        fill(&mut self.price_qtr_end, &other.price_qtr_end);
        fill(&mut self.return_pct, &other.return_pct);
        fill(&mut self.reported_eps, &other.reported_eps);
        fill(&mut self.consensus_eps, &other.consensus_eps);
        fill(&mut self.eps_beat_dollars, &other.eps_beat_dollars);
        fill(&mut self.eps_beat_pct, &other.eps_beat_pct);
    }
}

fn fill<T: Clone>(slot: &mut Option<T>, candidate: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(candidate);
    }
}

fn fill_text(slot: &mut Option<String>, candidate: &Option<String>) {
    if non_blank(slot.as_deref()).is_none() {
        if let Some(v) = non_blank(candidate.as_deref()) {
            *slot = Some(v.to_string());
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_bare_collector_record() {
        let v = json!({
            "manager": "Alpha Capital",
            "ticker": "AAPL",
            "name": "Apple Inc",
            "value_usd": 1_000_000.0,
            "pct_of_portfolio": 12.5,
            "rank": 1,
            "period_of_report": "2025-09-30"
        });

        let rec: HoldingRecord = serde_json::from_value(v).unwrap();
        assert!(rec.enrichment.is_empty());
        assert_eq!(rec.combined_weight, None);
        assert_eq!(rec.position_key(), "AAPL");
    }

    #[test]
    fn position_key_falls_back_to_name() {
        let v = json!({
            "manager": "Alpha Capital",
            "ticker": "N/A",
            "name": "Private Holdco",
            "value_usd": 10.0,
            "pct_of_portfolio": 1.0,
            "rank": 9,
            "period_of_report": "2025-09-30"
        });
        let rec: HoldingRecord = serde_json::from_value(v).unwrap();
        assert!(!rec.has_ticker());
        assert_eq!(rec.position_key(), "Private Holdco");
    }

    #[test]
    fn keep_first_never_overwrites() {
        let mut first = Enrichment {
            forward_pe: Some(10.0),
            sector: Some("".to_string()),
            ..Default::default()
        };
        let second = Enrichment {
            forward_pe: Some(99.0),
            forward_eps_growth: Some(12.0),
            sector: Some("Technology".to_string()),
            ..Default::default()
        };

        first.keep_first(&second);
        assert_eq!(first.forward_pe, Some(10.0));
        assert_eq!(first.forward_eps_growth, Some(12.0));
        assert_eq!(first.sector(), Some("Technology"));
    }
}
