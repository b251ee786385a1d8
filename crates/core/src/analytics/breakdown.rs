//! Raw-dollar exposure by sector, industry and country.
//!
//! Percentages here are shares of the summed `value_usd` of every record, regardless of
//! manager weighting. The weight-based view lives in [`super::treemap`].

use crate::analytics::stats::round_to;
use crate::analytics::{sort_desc_by, OrderedGroups};
use crate::domain::holding::HoldingRecord;
use crate::taxonomy::{normalize_country_opt, normalize_sector_opt, UNKNOWN_CATEGORY};
use crate::text::display_label;
use serde::Serialize;
use std::collections::BTreeMap;

const TOP_STOCKS_PER_SECTOR: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockValue {
    pub ticker: String,
    pub name: String,
    pub display_label: String,
    pub manager: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total_value: f64,
    pub pct: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSlice {
    #[serde(flatten)]
    pub total: CategoryTotal,
    pub top_stocks: Vec<StockValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustrySlice {
    #[serde(flatten)]
    pub total: CategoryTotal,
    /// Canonical sector of the last record seen in this industry.
    pub sector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerExposure {
    pub sector: String,
    pub value: f64,
    /// Share of that manager's own summed value.
    pub pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectorBreakdown {
    /// Canonical (GICS) sectors.
    pub sectors: Vec<SectorSlice>,
    /// Sector labels exactly as the provider returned them.
    pub vendor_sectors: Vec<CategoryTotal>,
    pub industries: Vec<IndustrySlice>,
    pub by_manager: BTreeMap<String, Vec<ManagerExposure>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoBreakdown {
    /// Canonical (benchmark) country names.
    pub countries: Vec<CategoryTotal>,
    pub vendor_countries: Vec<CategoryTotal>,
}

#[derive(Default)]
struct Acc {
    value: f64,
    count: usize,
    stocks: Vec<StockValue>,
    sector: String,
}

fn raw_label(label: Option<&str>) -> &str {
    label.unwrap_or(UNKNOWN_CATEGORY)
}

fn grand_total(records: &[HoldingRecord]) -> f64 {
    let total: f64 = records.iter().map(|r| r.value_usd).sum();
    if total == 0.0 {
        1.0
    } else {
        total
    }
}

fn totals(groups: OrderedGroups<Acc>, grand: f64) -> Vec<(CategoryTotal, Acc)> {
    let mut out: Vec<(CategoryTotal, Acc)> = groups
        .into_vec()
        .into_iter()
        .map(|(name, acc)| {
            (
                CategoryTotal {
                    name,
                    total_value: acc.value,
                    pct: round_to(acc.value / grand * 100.0, 2),
                    count: acc.count,
                },
                acc,
            )
        })
        .collect();
    sort_desc_by(&mut out, |(t, _)| t.total_value);
    out
}

fn stock_value(rec: &HoldingRecord) -> StockValue {
    StockValue {
        ticker: rec.ticker.clone(),
        name: rec.name.clone(),
        display_label: display_label(&rec.name, &rec.ticker),
        manager: rec.manager.clone(),
        value: rec.value_usd,
    }
}

pub fn compute_sector_breakdown(records: &[HoldingRecord]) -> SectorBreakdown {
    let grand = grand_total(records);
    let mut sectors = OrderedGroups::<Acc>::default();
    let mut vendor = OrderedGroups::<Acc>::default();
    let mut industries = OrderedGroups::<Acc>::default();
    let mut managers = OrderedGroups::<OrderedGroups<f64>>::default();

    for rec in records {
        let sector = normalize_sector_opt(rec.enrichment.sector());

        let s = sectors.entry(&sector, Acc::default);
        s.value += rec.value_usd;
        s.count += 1;
        s.stocks.push(stock_value(rec));

        let v = vendor.entry(raw_label(rec.enrichment.sector()), Acc::default);
        v.value += rec.value_usd;
        v.count += 1;

        let i = industries.entry(raw_label(rec.enrichment.industry()), Acc::default);
        i.value += rec.value_usd;
        i.count += 1;
        i.sector = sector.clone();

        *managers
            .entry(&rec.manager, OrderedGroups::default)
            .entry(&sector, || 0.0) += rec.value_usd;
    }

    let sectors = totals(sectors, grand)
        .into_iter()
        .map(|(total, mut acc)| {
            sort_desc_by(&mut acc.stocks, |s| s.value);
            acc.stocks.truncate(TOP_STOCKS_PER_SECTOR);
            SectorSlice {
                total,
                top_stocks: acc.stocks,
            }
        })
        .collect();

    let industries = totals(industries, grand)
        .into_iter()
        .map(|(total, acc)| IndustrySlice {
            total,
            sector: acc.sector,
        })
        .collect();

    let by_manager = managers
        .into_vec()
        .into_iter()
        .map(|(manager, by_sector)| {
            let rows = by_sector.into_vec();
            let sum: f64 = rows.iter().map(|(_, v)| *v).sum();
            let denom = if sum == 0.0 { 1.0 } else { sum };
            let mut exposures: Vec<ManagerExposure> = rows
                .into_iter()
                .map(|(sector, value)| ManagerExposure {
                    sector,
                    value,
                    pct: round_to(value / denom * 100.0, 2),
                })
                .collect();
            sort_desc_by(&mut exposures, |e| e.value);
            (manager, exposures)
        })
        .collect();

    SectorBreakdown {
        sectors,
        vendor_sectors: totals(vendor, grand).into_iter().map(|(t, _)| t).collect(),
        industries,
        by_manager,
    }
}

pub fn compute_geo_breakdown(records: &[HoldingRecord]) -> GeoBreakdown {
    let grand = grand_total(records);
    let mut countries = OrderedGroups::<Acc>::default();
    let mut vendor = OrderedGroups::<Acc>::default();

    for rec in records {
        let c = countries.entry(&normalize_country_opt(rec.enrichment.country()), Acc::default);
        c.value += rec.value_usd;
        c.count += 1;

        let v = vendor.entry(raw_label(rec.enrichment.country()), Acc::default);
        v.value += rec.value_usd;
        v.count += 1;
    }

    GeoBreakdown {
        countries: totals(countries, grand).into_iter().map(|(t, _)| t).collect(),
        vendor_countries: totals(vendor, grand).into_iter().map(|(t, _)| t).collect(),
    }
}
