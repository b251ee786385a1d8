use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::holding::Enrichment;

/// Numbers, numeric strings and nulls; anything else, or a non-finite result, becomes `None`.
fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|x| x.is_finite()))
}

fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(de)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Keeps the entries that parse and drops the rest.
fn lenient_list<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(de)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Bars with a missing or non-numeric close are dropped on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistoryResponse {
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub bars: Vec<PriceBar>,
}

/// Forward estimates and profile fields for one ticker. Growth figures are fractions
/// (0.12 = 12%); `dividend_yield` is already in percent. A malformed field reads as `None`
/// without affecting its neighbours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoBundle {
    #[serde(deserialize_with = "lenient_f64")]
    pub forward_pe: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub sector: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub industry: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub dividend_yield: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub forward_eps: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub trailing_eps: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub earnings_growth: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub revenue_growth: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_revenue: Option<f64>,
    /// Analyst consensus EPS growth for the next fiscal year.
    #[serde(deserialize_with = "lenient_f64")]
    pub growth_estimate_next_year: Option<f64>,
    /// Analyst consensus revenue growth for the next fiscal year.
    #[serde(deserialize_with = "lenient_f64")]
    pub revenue_estimate_next_year: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningsEvent {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reported_eps: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub eps_estimate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsResponse {
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub events: Vec<EarningsEvent>,
}

/// One batch result; `enrichment` is all-null when the ticker could not be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerEnrichment {
    pub ticker: String,
    pub enrichment: Enrichment,
}
