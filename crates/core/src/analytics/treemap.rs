//! Synthetic-portfolio share by sector, industry and country.
//!
//! Works on the weighted, de-duplicated portfolio: a category's `pct` is the sum of its
//! positions' combined weights, not a share of raw dollars (see [`super::breakdown`]).

use crate::analytics::stats::round_to;
use crate::analytics::weighting::{combined_portfolio, CombinedPosition};
use crate::analytics::{sort_desc_by, OrderedGroups};
use crate::domain::holding::{Enrichment, HoldingRecord, ManagerWeights};
use crate::taxonomy::{normalize_country_opt, normalize_sector_opt, UNKNOWN_CATEGORY};
use crate::text::{display_label, shorten_stock_name};
use serde::Serialize;

const TOP_STOCKS_PER_NODE: usize = 10;
const TOP_STOCKS_PER_CATEGORY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Sector,
    Industry,
    Country,
}

impl Dimension {
    /// Sectors and countries use canonical names; industries are provider labels.
    pub fn category(self, enrichment: &Enrichment) -> String {
        match self {
            Self::Sector => normalize_sector_opt(enrichment.sector()),
            Self::Industry => enrichment.industry().unwrap_or(UNKNOWN_CATEGORY).to_string(),
            Self::Country => normalize_country_opt(enrichment.country()),
        }
    }
}

impl std::str::FromStr for Dimension {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sector" => Ok(Self::Sector),
            "industry" => Ok(Self::Industry),
            "country" => Ok(Self::Country),
            other => anyhow::bail!("unknown category dimension: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerShare {
    pub manager: String,
    pub value: f64,
    pub pct_of_category: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapStock {
    pub ticker: String,
    pub name: String,
    pub display_label: String,
    pub value: f64,
    pub managers: Vec<String>,
    pub filing_quarter_return: Option<f64>,
    pub weight_in_combined: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapNode {
    pub name: String,
    pub pct: f64,
    pub total_value: f64,
    pub count: usize,
    pub manager_shares: Vec<ManagerShare>,
    pub top_stocks: Vec<TreemapStock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectorTreemap {
    pub sectors: Vec<TreemapNode>,
    pub industries: Vec<TreemapNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoTreemap {
    pub countries: Vec<TreemapNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerWeightShare {
    pub name: String,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStock {
    pub ticker: String,
    pub name: String,
    pub short_name: String,
    pub pct: f64,
    pub managers: Vec<ManagerWeightShare>,
}

pub fn compute_sector_treemap(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
) -> SectorTreemap {
    let positions = combined_portfolio(records, weights);
    SectorTreemap {
        sectors: build_nodes(&positions, Dimension::Sector),
        industries: build_nodes(&positions, Dimension::Industry),
    }
}

pub fn compute_geo_treemap(
    records: &[HoldingRecord],
    weights: Option<&ManagerWeights>,
) -> GeoTreemap {
    let positions = combined_portfolio(records, weights);
    GeoTreemap {
        countries: build_nodes(&positions, Dimension::Country),
    }
}

pub fn build_nodes(positions: &[CombinedPosition], dimension: Dimension) -> Vec<TreemapNode> {
    let mut groups = OrderedGroups::<Vec<&CombinedPosition>>::default();
    for p in positions {
        groups.entry(&dimension.category(&p.enrichment), Vec::new).push(p);
    }

    let mut nodes: Vec<(f64, TreemapNode)> = groups
        .into_vec()
        .into_iter()
        .map(|(name, members)| {
            let weight: f64 = members.iter().map(|p| p.combined_weight).sum();
            (weight, node(name, &members, weight))
        })
        .collect();
    sort_desc_by(&mut nodes, |(w, _)| *w);
    nodes.into_iter().map(|(_, n)| n).collect()
}

fn node(name: String, members: &[&CombinedPosition], weight: f64) -> TreemapNode {
    let total_value: f64 = members.iter().map(|p| p.value_usd).sum();

    let mut by_manager = OrderedGroups::<f64>::default();
    for p in members {
        for c in &p.contributions {
            *by_manager.entry(&c.manager, || 0.0) += c.value_usd;
        }
    }
    let denom = if total_value == 0.0 { 1.0 } else { total_value };
    let mut manager_shares: Vec<ManagerShare> = by_manager
        .into_vec()
        .into_iter()
        .map(|(manager, value)| ManagerShare {
            manager,
            value,
            pct_of_category: round_to(value / denom * 100.0, 1),
        })
        .collect();
    sort_desc_by(&mut manager_shares, |m| m.value);

    let mut ranked: Vec<&CombinedPosition> = members.to_vec();
    sort_desc_by(&mut ranked, |p| p.combined_weight);
    let top_stocks = ranked
        .into_iter()
        .take(TOP_STOCKS_PER_NODE)
        .map(|p| TreemapStock {
            ticker: p.ticker.clone(),
            name: p.name.clone(),
            display_label: display_label(&p.name, &p.ticker),
            value: p.value_usd,
            managers: p.managers.clone(),
            filing_quarter_return: p.enrichment.filing.return_pct,
            weight_in_combined: round_to(p.combined_weight, 4),
        })
        .collect();

    TreemapNode {
        name,
        pct: round_to(weight, 2),
        total_value,
        count: members.len(),
        manager_shares,
        top_stocks,
    }
}

/// Top positions inside one category, with each manager's combined-weight contribution.
pub fn compute_category_stocks(
    records: &[HoldingRecord],
    dimension: Dimension,
    category: &str,
    weights: Option<&ManagerWeights>,
) -> Vec<CategoryStock> {
    let positions = combined_portfolio(records, weights);
    let mut members: Vec<&CombinedPosition> = positions
        .iter()
        .filter(|p| p.has_ticker() && dimension.category(&p.enrichment) == category)
        .collect();
    sort_desc_by(&mut members, |p| p.combined_weight);

    members
        .into_iter()
        .take(TOP_STOCKS_PER_CATEGORY)
        .map(|p| {
            let mut managers: Vec<ManagerWeightShare> = p
                .contributions
                .iter()
                .map(|c| ManagerWeightShare {
                    name: c.manager.clone(),
                    pct: round_to(c.combined_weight, 2),
                })
                .collect();
            sort_desc_by(&mut managers, |m| m.pct);
            CategoryStock {
                ticker: p.ticker.clone(),
                name: p.name.clone(),
                short_name: shorten_stock_name(&p.name),
                pct: round_to(p.combined_weight, 2),
                managers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(
        manager: &str,
        ticker: &str,
        pct: f64,
        value: f64,
        sector: &str,
        country: &str,
    ) -> HoldingRecord {
        HoldingRecord {
            manager: manager.to_string(),
            ticker: ticker.to_string(),
            name: format!("{ticker} Inc"),
            value_usd: value,
            pct_of_portfolio: pct,
            rank: 1,
            period_of_report: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            enrichment: Enrichment {
                sector: Some(sector.to_string()),
                industry: Some(format!("{sector} Industry")),
                country: Some(country.to_string()),
                ..Default::default()
            },
            combined_weight: None,
        }
    }

    fn sample() -> Vec<HoldingRecord> {
        vec![
            rec("A", "AAPL", 60.0, 6000.0, "Technology", "United States"),
            rec("A", "XOM", 40.0, 4000.0, "Energy", "United States"),
            rec("B", "AAPL", 20.0, 100.0, "Technology", "United States"),
            rec("B", "TSM", 80.0, 400.0, "Technology", "Taiwan"),
        ]
    }

    #[test]
    fn sector_pct_sums_combined_weight() {
        let t = compute_sector_treemap(&sample(), None);
        let it = &t.sectors[0];
        assert_eq!(it.name, "Information Technology");
        // AAPL 30 + 10, TSM 40
        assert_eq!(it.pct, 80.0);
        assert_eq!(it.count, 2);
        assert_eq!(it.top_stocks[0].ticker, "AAPL");
        assert_eq!(it.top_stocks[0].managers, vec!["A", "B"]);
        assert_eq!(it.manager_shares[0].manager, "A");
        assert_eq!(it.manager_shares[0].pct_of_category, 92.3);

        let total: f64 = t.sectors.iter().map(|n| n.pct).sum();
        assert!((total - 100.0).abs() < 0.01);
    }

    #[test]
    fn geo_treemap_by_canonical_country() {
        let g = compute_geo_treemap(&sample(), None);
        assert_eq!(g.countries[0].name, "United States");
        assert_eq!(g.countries[0].pct, 60.0);
        assert_eq!(g.countries[1].name, "Taiwan");
    }

    #[test]
    fn category_drill_down() {
        let stocks =
            compute_category_stocks(&sample(), Dimension::Sector, "Information Technology", None);
        assert_eq!(stocks.len(), 2);
        // tie at 40: first-seen wins
        assert_eq!(stocks[0].ticker, "AAPL");
        assert_eq!(stocks[0].short_name, "AAPL");
        assert_eq!(stocks[0].managers.len(), 2);
        assert_eq!(stocks[0].managers[0].name, "A");
        assert_eq!(stocks[0].managers[0].pct, 30.0);
        assert_eq!(stocks[1].ticker, "TSM");
        assert_eq!(stocks[1].pct, 40.0);

        assert!(compute_category_stocks(&sample(), Dimension::Country, "Japan", None).is_empty());
    }

    #[test]
    fn parses_dimensions() {
        assert_eq!("Sector".parse::<Dimension>().unwrap(), Dimension::Sector);
        assert!("region".parse::<Dimension>().is_err());
    }
}
