use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::taxonomy::{normalize_country, normalize_sector};

/// Reference portfolio supplied by the benchmark collaborator. Weights are in percent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sectors: BTreeMap<String, f64>,
    #[serde(default)]
    pub countries: BTreeMap<String, f64>,
    #[serde(default)]
    pub top_holdings: Vec<BenchmarkHolding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkHolding {
    pub ticker: String,
    pub name: String,
    pub weight: f64,
}

impl BenchmarkSnapshot {
    /// Re-keys the sector and country maps onto the canonical taxonomy, summing collisions.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            sectors: rekey(&self.sectors, normalize_sector),
            countries: rekey(&self.countries, normalize_country),
            top_holdings: self.top_holdings.clone(),
        }
    }
}

fn rekey(map: &BTreeMap<String, f64>, f: fn(&str) -> String) -> BTreeMap<String, f64> {
    let mut out = BTreeMap::new();
    for (k, v) in map {
        *out.entry(f(k)).or_insert(0.0) += *v;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalized_merges_vendor_and_canonical_keys() {
        let v = json!({
            "name": "ACWI",
            "sectors": {"Technology": 20.0, "Information Technology": 5.0, "Energy": 4.0},
            "countries": {"South Korea": 1.2, "Korea, Republic of": 0.3},
            "top_holdings": [{"ticker": "AAPL", "name": "Apple", "weight": 4.1}]
        });
        let snap: BenchmarkSnapshot = serde_json::from_value(v).unwrap();
        let norm = snap.normalized();

        assert_eq!(norm.sectors.get("Information Technology").copied(), Some(25.0));
        assert_eq!(norm.sectors.get("Energy").copied(), Some(4.0));
        assert!(!norm.sectors.contains_key("Technology"));
        let korea = norm.countries.get("Korea (South)").copied().unwrap();
        assert!((korea - 1.5).abs() < 1e-9);
    }
}
