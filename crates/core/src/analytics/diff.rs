//! Quarter-over-quarter position changes per manager.

use crate::analytics::stats::round_to;
use crate::domain::holding::HoldingRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Weight moves smaller than this (in percentage points) count as unchanged.
pub const CHANGE_THRESHOLD_PCT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRef {
    pub name: String,
    pub ticker: String,
    pub value: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangedPosition {
    pub name: String,
    pub ticker: String,
    pub prev_pct: f64,
    pub curr_pct: f64,
    pub change_pct: f64,
    pub prev_value: f64,
    pub curr_value: f64,
    pub prev_rank: u32,
    pub curr_rank: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManagerDiff {
    pub new_positions: Vec<PositionRef>,
    pub exited_positions: Vec<PositionRef>,
    pub changed_positions: Vec<ChangedPosition>,
    pub unchanged_count: usize,
}

pub type QoqDiff = BTreeMap<String, ManagerDiff>;

type Snapshot<'a> = BTreeMap<&'a str, BTreeMap<&'a str, &'a HoldingRecord>>;

/// manager -> position key -> record; a repeated key within one manager keeps the last row.
fn index(records: &[HoldingRecord]) -> Snapshot<'_> {
    let mut out: Snapshot<'_> = BTreeMap::new();
    for r in records {
        out.entry(r.manager.as_str())
            .or_default()
            .insert(r.position_key(), r);
    }
    out
}

fn position_ref(r: &HoldingRecord) -> PositionRef {
    PositionRef {
        name: r.name.clone(),
        ticker: r.ticker.clone(),
        value: r.value_usd,
        pct: r.pct_of_portfolio,
    }
}

pub fn compute_qoq_diff(current: &[HoldingRecord], previous: &[HoldingRecord]) -> QoqDiff {
    let curr_idx = index(current);
    let prev_idx = index(previous);
    let empty = BTreeMap::new();

    let managers: BTreeSet<&str> = curr_idx.keys().chain(prev_idx.keys()).copied().collect();

    managers
        .into_iter()
        .map(|manager| {
            let curr = curr_idx.get(manager).unwrap_or(&empty);
            let prev = prev_idx.get(manager).unwrap_or(&empty);
            let mut diff = ManagerDiff::default();

            for (key, r) in curr {
                match prev.get(key) {
                    None => diff.new_positions.push(position_ref(r)),
                    Some(p) => {
                        let change = round_to(r.pct_of_portfolio - p.pct_of_portfolio, 2);
                        if change.abs() >= CHANGE_THRESHOLD_PCT {
                            diff.changed_positions.push(ChangedPosition {
                                name: r.name.clone(),
                                ticker: r.ticker.clone(),
                                prev_pct: p.pct_of_portfolio,
                                curr_pct: r.pct_of_portfolio,
                                change_pct: change,
                                prev_value: p.value_usd,
                                curr_value: r.value_usd,
                                prev_rank: p.rank,
                                curr_rank: r.rank,
                            });
                        } else {
                            diff.unchanged_count += 1;
                        }
                    }
                }
            }
            diff.exited_positions = prev
                .iter()
                .filter(|(key, _)| !curr.contains_key(*key))
                .map(|(_, r)| position_ref(r))
                .collect();

            diff.changed_positions.sort_by(|a, b| {
                b.change_pct
                    .abs()
                    .partial_cmp(&a.change_pct.abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            (manager.to_string(), diff)
        })
        .collect()
}
