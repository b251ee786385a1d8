use crate::analytics::stats::round_to;
use crate::analytics::OrderedGroups;
use crate::domain::holding::{has_known_ticker, Enrichment, HoldingRecord, ManagerWeights};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-manager allocation actually applied, plus the normalising total (never 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveWeights {
    pub by_manager: BTreeMap<String, f64>,
    pub total: f64,
    pub equal: bool,
}

impl EffectiveWeights {
    pub fn resolve(records: &[HoldingRecord], weights: Option<&ManagerWeights>) -> Self {
        let mut managers: Vec<&str> = records.iter().map(|r| r.manager.as_str()).collect();
        managers.sort_unstable();
        managers.dedup();

        let explicit = weights.filter(|w| w.values().any(|v| *v > 0.0));
        let by_manager: BTreeMap<String, f64> = match explicit {
            Some(w) => managers
                .iter()
                .map(|m| (m.to_string(), w.get(*m).copied().unwrap_or(0.0)))
                .collect(),
            None => {
                let share = 100.0 / managers.len().max(1) as f64;
                managers.iter().map(|m| (m.to_string(), share)).collect()
            }
        };

        let sum: f64 = by_manager.values().sum();
        Self {
            by_manager,
            total: if sum == 0.0 { 1.0 } else { sum },
            equal: explicit.is_none(),
        }
    }

    pub fn weight(&self, manager: &str) -> f64 {
        self.by_manager.get(manager).copied().unwrap_or(0.0)
    }
}

/// Copies every record with `combined_weight` set to its share of the synthetic
/// portfolio: `pct/100 × manager_weight/total × 100`, rounded to 4 decimals.
pub fn apply_manager_weights(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
) -> (Vec<HoldingRecord>, f64) {
    let effective = EffectiveWeights::resolve(records, weights);
    let weighted = records
        .iter()
        .map(|rec| {
            let share = effective.weight(&rec.manager) / effective.total;
            let mut rec = rec.clone();
            rec.combined_weight = Some(round_to(rec.pct_of_portfolio / 100.0 * share * 100.0, 4));
            rec
        })
        .collect();
    (weighted, effective.total)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerContribution {
    pub manager: String,
    pub value_usd: f64,
    pub pct_of_portfolio: f64,
    pub combined_weight: f64,
}

/// One instrument in the synthetic portfolio after de-duplication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedPosition {
    pub ticker: String,
    pub name: String,
    pub combined_weight: f64,
    pub value_usd: f64,
    /// Distinct managers in first-seen order.
    pub managers: Vec<String>,
    pub contributions: Vec<ManagerContribution>,
    pub period_of_report: NaiveDate,
    pub enrichment: Enrichment,
}

impl CombinedPosition {
    fn start(rec: &HoldingRecord) -> Self {
        Self {
            ticker: rec.ticker.clone(),
            name: rec.name.clone(),
            combined_weight: 0.0,
            value_usd: 0.0,
            managers: Vec::new(),
            contributions: Vec::new(),
            period_of_report: rec.period_of_report,
            enrichment: Enrichment::default(),
        }
    }

    fn absorb(&mut self, rec: &HoldingRecord) {
        let weight = rec.combined_weight.unwrap_or(0.0);
        self.combined_weight += weight;
        self.value_usd += rec.value_usd;
        if self.name.trim().is_empty() {
            self.name = rec.name.clone();
        }
        self.enrichment.keep_first(&rec.enrichment);

        match self.contributions.iter_mut().find(|c| c.manager == rec.manager) {
            Some(c) => {
                c.value_usd += rec.value_usd;
                c.pct_of_portfolio += rec.pct_of_portfolio;
                c.combined_weight += weight;
            }
            None => {
                self.managers.push(rec.manager.clone());
                self.contributions.push(ManagerContribution {
                    manager: rec.manager.clone(),
                    value_usd: rec.value_usd,
                    pct_of_portfolio: rec.pct_of_portfolio,
                    combined_weight: weight,
                });
            }
        }
    }

    pub fn has_ticker(&self) -> bool {
        has_known_ticker(&self.ticker)
    }

    pub fn manager_count(&self) -> usize {
        self.managers.len()
    }

    pub fn key(&self) -> &str {
        if self.has_ticker() {
            &self.ticker
        } else {
            &self.name
        }
    }
}

/// Groups weighted records by ticker (name when the ticker is unknown), in first-seen
/// order. Weights, values and contributions are summed; every other field keeps the
/// first non-empty value encountered.
pub fn combine_positions(weighted: &[HoldingRecord]) -> Vec<CombinedPosition> {
    let mut groups = OrderedGroups::<CombinedPosition>::default();
    for rec in weighted {
        groups
            .entry(rec.position_key(), || CombinedPosition::start(rec))
            .absorb(rec);
    }
    groups.into_vec().into_iter().map(|(_, p)| p).collect()
}

/// `apply_manager_weights` followed by `combine_positions`.
pub fn combined_portfolio(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
) -> Vec<CombinedPosition> {
    let (weighted, _) = apply_manager_weights(records, weights);
    combine_positions(&weighted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::UNKNOWN_TICKER;

    fn rec(manager: &str, ticker: &str, pct: f64) -> HoldingRecord {
        HoldingRecord {
            manager: manager.to_string(),
            ticker: ticker.to_string(),
            name: format!("{ticker} Inc"),
            value_usd: pct * 10.0,
            pct_of_portfolio: pct,
            rank: 1,
            period_of_report: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            enrichment: Enrichment::default(),
            combined_weight: None,
        }
    }

    fn weight_of(positions: &[CombinedPosition], ticker: &str) -> f64 {
        positions.iter().find(|p| p.ticker == ticker).unwrap().combined_weight
    }

    #[test]
    fn full_portfolios_sum_to_100() {
        let records = vec![
            rec("A", "AAPL", 33.3333),
            rec("A", "MSFT", 33.3333),
            rec("A", "NVDA", 33.3334),
            rec("B", "AAPL", 12.5),
            rec("B", "XOM", 87.5),
            rec("C", "JPM", 100.0),
        ];
        let mut w = ManagerWeights::new();
        w.insert("A".into(), 20.0);
        w.insert("B".into(), 45.0);
        w.insert("C".into(), 35.0);

        for weights in [None, Some(&w)] {
            let (weighted, _) = apply_manager_weights(&records, weights);
            let total: f64 = weighted.iter().filter_map(|r| r.combined_weight).sum();
            assert!((total - 100.0).abs() <= 0.01, "total {total}");
        }
    }

    #[test]
    fn equal_weights_halve_single_manager_position() {
        let records = vec![rec("A", "TICK", 10.0), rec("A", "OTHR", 90.0), rec("B", "ELSE", 100.0)];
        let positions = combined_portfolio(&records, None);
        assert_eq!(weight_of(&positions, "TICK"), 5.0);
    }

    #[test]
    fn explicit_weights_blend_managers() {
        let records = vec![rec("A", "TICK", 40.0), rec("B", "TICK", 20.0)];
        let mut w = ManagerWeights::new();
        w.insert("A".into(), 70.0);
        w.insert("B".into(), 30.0);

        let positions = combined_portfolio(&records, Some(&w));
        assert_eq!(positions.len(), 1);
        assert!((weight_of(&positions, "TICK") - 34.0).abs() < 1e-9);
        assert_eq!(positions[0].managers, vec!["A", "B"]);
        assert_eq!(positions[0].value_usd, 600.0);
    }

    #[test]
    fn zero_or_missing_weights_fall_back() {
        let records = vec![rec("A", "X", 50.0), rec("B", "Y", 50.0)];
        let mut zeros = ManagerWeights::new();
        zeros.insert("A".into(), 0.0);
        let eff = EffectiveWeights::resolve(&records, Some(&zeros));
        assert!(eff.equal);
        assert_eq!(eff.weight("A"), 50.0);

        let mut only_a = ManagerWeights::new();
        only_a.insert("A".into(), 60.0);
        let (weighted, total) = apply_manager_weights(&records, Some(&only_a));
        assert_eq!(total, 60.0);
        assert_eq!(weighted[1].combined_weight, Some(0.0));

        let mut unknown = ManagerWeights::new();
        unknown.insert("Z".into(), 10.0);
        let (weighted, total) = apply_manager_weights(&records, Some(&unknown));
        assert_eq!(total, 1.0);
        assert!(weighted.iter().all(|r| r.combined_weight == Some(0.0)));
    }

    #[test]
    fn dedup_keeps_first_non_empty_fields() {
        let mut first = rec("A", "TICK", 10.0);
        first.enrichment.forward_pe = Some(15.0);
        let mut second = rec("B", "TICK", 10.0);
        second.name = "Tick Corporation".into();
        second.enrichment.forward_pe = Some(99.0);
        second.enrichment.sector = Some("Energy".into());

        let positions = combined_portfolio(&[first, second], None);
        let p = &positions[0];
        assert_eq!(p.name, "TICK Inc");
        assert_eq!(p.enrichment.forward_pe, Some(15.0));
        assert_eq!(p.enrichment.sector(), Some("Energy"));
        assert_eq!(p.manager_count(), 2);
    }

    #[test]
    fn unknown_tickers_group_by_name() {
        let mut a = rec("A", UNKNOWN_TICKER, 5.0);
        a.name = "Private Holdco".into();
        let mut b = rec("B", UNKNOWN_TICKER, 5.0);
        b.name = "Private Holdco".into();
        let mut c = rec("B", UNKNOWN_TICKER, 5.0);
        c.name = "Other Holdco".into();

        let positions = combined_portfolio(&[a, b, c], None);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].key(), "Private Holdco");
        assert_eq!(positions[0].manager_count(), 2);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let records = vec![rec("A", "X", 50.0)];
        let _ = apply_manager_weights(&records, None);
        assert_eq!(records[0].combined_weight, None);
    }
}
