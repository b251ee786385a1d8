//! Display strings derived from holdings: short names, labels and notes.

pub mod narrative;

use crate::domain::holding::{has_known_ticker, ManagerWeights};

pub use crate::time::quarter::quarter_label;

const NAME_SUFFIXES: &[&str] = &[
    "corporation", "corp", "corp.", "inc", "inc.", "ltd", "ltd.", "limited", "platforms",
    "holdings", "group", "incorporated", "co", "co.", "plc", "lp", "l.p.", "nv", "sa", "ag",
    "se", "international", "intl", "technologies", "technology", "enterprises", "enterprise",
    "solutions", "services", "industries", "financial", "bancorp", "therapeutics",
    "pharmaceuticals", "semiconductor", "class", "cl",
];

/// Drops trailing corporate suffixes and "Class X"/"Cl X" share-class markers,
/// always keeping at least one word. `"Alphabet Inc Class A"` -> `"Alphabet"`.
pub fn shorten_stock_name(name: &str) -> String {
    let cleaned = name.replace(',', "");
    let mut parts: Vec<&str> = cleaned.split_whitespace().collect();
    if parts.len() <= 1 {
        return name.to_string();
    }

    while parts.len() > 2 {
        let last = parts[parts.len() - 1].to_ascii_uppercase();
        let before = parts[parts.len() - 2].to_ascii_lowercase();
        if matches!(last.as_str(), "A" | "B" | "C") && matches!(before.as_str(), "class" | "cl") {
            parts.truncate(parts.len() - 2);
        } else {
            break;
        }
    }

    while parts.len() > 1 {
        let last = parts[parts.len() - 1]
            .to_lowercase()
            .trim_end_matches(['.', ','])
            .to_string();
        if NAME_SUFFIXES.contains(&last.as_str()) {
            parts.pop();
        } else {
            break;
        }
    }

    let short = parts.join(" ");
    if short.trim().is_empty() {
        name.to_string()
    } else {
        short
    }
}

/// `"Apple Inc (AAPL)"`, or just the name when the ticker is unknown.
pub fn display_label(name: &str, ticker: &str) -> String {
    if has_known_ticker(ticker) {
        format!("{name} ({ticker})")
    } else {
        name.to_string()
    }
}

/// Arrow label for the filing-quarter EPS surprise; empty when there is no figure.
pub fn eps_beat_label(beat_dollars: Option<f64>, beat_pct: Option<f64>) -> String {
    let Some(beat) = beat_dollars else {
        return String::new();
    };
    if beat > 0.0 {
        match beat_pct {
            Some(p) => format!("↑ +{p:.0}%"),
            None => "↑ Beat".to_string(),
        }
    } else if beat < 0.0 {
        match beat_pct {
            Some(p) => format!("↓ {p:.0}%"),
            None => "↓ Miss".to_string(),
        }
    } else {
        "→ Met".to_string()
    }
}

/// `"Weightings: A: 70%, B: equal"` over the managers in name order.
pub fn weighting_note(managers: &[String], weights: Option<&ManagerWeights>) -> String {
    let mut names: Vec<&str> = managers.iter().map(String::as_str).collect();
    names.sort_unstable();
    names.dedup();
    if names.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = names
        .iter()
        .map(|m| match weights.and_then(|w| w.get(*m)).copied() {
            Some(w) if w != 0.0 => format!("{m}: {w:.0}%"),
            _ => format!("{m}: equal"),
        })
        .collect();
    format!("Weightings: {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_names() {
        assert_eq!(shorten_stock_name("Alphabet Inc Class A"), "Alphabet");
        assert_eq!(shorten_stock_name("META PLATFORMS INC"), "META");
        assert_eq!(
            shorten_stock_name("Taiwan Semiconductor Mfg Co Ltd"),
            "Taiwan Semiconductor Mfg"
        );
        assert_eq!(shorten_stock_name("Berkshire Hathaway Inc, Cl B"), "Berkshire Hathaway");
        assert_eq!(shorten_stock_name("Group Holdings"), "Group");
        assert_eq!(shorten_stock_name("Visa"), "Visa");
        assert_eq!(shorten_stock_name(""), "");
    }

    #[test]
    fn labels() {
        assert_eq!(display_label("Apple Inc", "AAPL"), "Apple Inc (AAPL)");
        assert_eq!(display_label("Private Co", "N/A"), "Private Co");
        assert_eq!(quarter_label(chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()), "2Q25");
    }

    #[test]
    fn eps_labels() {
        assert_eq!(eps_beat_label(Some(0.12), Some(12.4)), "↑ +12%");
        assert_eq!(eps_beat_label(Some(-0.1), Some(-5.0)), "↓ -5%");
        assert_eq!(eps_beat_label(Some(0.0), Some(0.0)), "→ Met");
        assert_eq!(eps_beat_label(Some(0.02), None), "↑ Beat");
        assert_eq!(eps_beat_label(Some(-0.02), None), "↓ Miss");
        assert_eq!(eps_beat_label(None, Some(3.0)), "");
    }

    #[test]
    fn weighting_note_marks_missing_as_equal() {
        let managers = vec!["B".to_string(), "A".to_string(), "B".to_string()];
        let mut w = ManagerWeights::new();
        w.insert("A".into(), 70.0);
        assert_eq!(weighting_note(&managers, Some(&w)), "Weightings: A: 70%, B: equal");
        assert_eq!(weighting_note(&managers, None), "Weightings: A: equal, B: equal");
        assert_eq!(weighting_note(&[], None), "");
    }
}
