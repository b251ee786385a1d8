use crate::domain::holding::{HoldingRecord, ManagerWeights, UNKNOWN_TICKER};
use anyhow::{bail, ensure, Context};
use std::collections::BTreeMap;

// Collectors round each pct to a few decimals, so a full top-N can sum slightly above 100.
const PCT_SUM_TOLERANCE: f64 = 0.05;

/// Parses a JSON array of holdings produced by the filings collector and validates it.
pub fn parse_holdings(text: &str) -> anyhow::Result<Vec<HoldingRecord>> {
    let records = serde_json::from_str::<Vec<HoldingRecord>>(text)
        .context("holdings snapshot is not a valid JSON array of holding records")?;
    validate_holdings(records)
}

pub fn validate_holdings(records: Vec<HoldingRecord>) -> anyhow::Result<Vec<HoldingRecord>> {
    let mut pct_by_manager = BTreeMap::<String, f64>::new();
    let mut out = Vec::with_capacity(records.len());

    for (idx, mut rec) in records.into_iter().enumerate() {
        rec.manager = rec.manager.trim().to_string();
        ensure!(!rec.manager.is_empty(), "record {idx}: manager must be non-empty");

        rec.name = rec.name.trim().to_string();
        rec.ticker = rec.ticker.trim().to_ascii_uppercase();
        if rec.ticker.is_empty() {
            rec.ticker = UNKNOWN_TICKER.to_string();
        }
        ensure!(
            !rec.name.is_empty() || rec.ticker != UNKNOWN_TICKER,
            "record {idx}: either ticker or name is required"
        );

        ensure!(
            rec.value_usd.is_finite() && rec.value_usd >= 0.0,
            "record {idx} ({}): value_usd must be a non-negative number (got {})",
            rec.ticker,
            rec.value_usd
        );
        ensure!(
            rec.pct_of_portfolio.is_finite() && (0.0..=100.0).contains(&rec.pct_of_portfolio),
            "record {idx} ({}): pct_of_portfolio must be between 0 and 100 (got {})",
            rec.ticker,
            rec.pct_of_portfolio
        );

        *pct_by_manager.entry(rec.manager.clone()).or_insert(0.0) += rec.pct_of_portfolio;
        out.push(rec);
    }

    for (manager, total) in &pct_by_manager {
        if *total > 100.0 + PCT_SUM_TOLERANCE {
            bail!("manager {manager}: pct_of_portfolio sums to {total:.4}, expected at most 100");
        }
    }

    Ok(out)
}

/// Parses `"Name A=70,Name B=30"` into manager weights.
pub fn parse_weight_pairs(s: &str) -> anyhow::Result<ManagerWeights> {
    let mut out = ManagerWeights::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (name, weight) = part
            .rsplit_once('=')
            .with_context(|| format!("manager weight must look like NAME=WEIGHT (got {part})"))?;
        let weight = weight
            .trim()
            .parse::<f64>()
            .with_context(|| format!("invalid weight for {}: {weight}", name.trim()))?;
        out.insert(name.trim().to_string(), weight);
    }
    validate_weights(out)
}

/// Parses a JSON object of manager -> weight.
pub fn parse_weights_json(text: &str) -> anyhow::Result<ManagerWeights> {
    let weights = serde_json::from_str::<ManagerWeights>(text)
        .context("manager weights must be a JSON object of name -> number")?;
    validate_weights(weights)
}

pub fn validate_weights(weights: ManagerWeights) -> anyhow::Result<ManagerWeights> {
    for (manager, w) in &weights {
        ensure!(!manager.trim().is_empty(), "manager weight with empty name");
        ensure!(
            w.is_finite() && (0.0..=100.0).contains(w),
            "manager {manager}: weight must be between 0 and 100 (got {w})"
        );
    }
    Ok(weights)
}
