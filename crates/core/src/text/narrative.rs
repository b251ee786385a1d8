use crate::analytics::diff::QoqDiff;
use crate::analytics::overlap::OverlapEntry;
use crate::analytics::summary::PortfolioSummary;
use crate::analytics::valuation::ValuationScatter;
use crate::text::display_label;
use serde::Serialize;

const MAX_MOVES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioNarrative {
    pub headline: String,
    pub highlights: Vec<String>,
}

fn signed(x: f64) -> String {
    if x > 0.0 {
        format!("+{x:.2}")
    } else {
        format!("{x:.2}")
    }
}

/// Plain-English bullets over already computed payloads. Same inputs, same text.
pub fn build(
    summary: &PortfolioSummary,
    valuation: &ValuationScatter,
    overlap: &[OverlapEntry],
    diff: Option<&QoqDiff>,
) -> PortfolioNarrative {
    if summary.total_holdings == 0 {
        return PortfolioNarrative {
            headline: "No holdings to analyse".to_string(),
            highlights: Vec::new(),
        };
    }

    let period = summary
        .filing_quarter
        .as_deref()
        .map(|q| format!(" for {q}"))
        .unwrap_or_default();
    let headline = format!(
        "{} managers, {} holdings across {} stocks{period}",
        summary.unique_managers, summary.total_holdings, summary.unique_stocks
    );

    let mut highlights = Vec::new();

    if let Some(top) = summary.top_stocks_by_pct.first() {
        highlights.push(format!(
            "Largest combined position: {} at {:.2}% of the weighted portfolio",
            display_label(&top.name, &top.ticker),
            top.pct
        ));
    }

    let avg = &valuation.portfolio_avg;
    if let Some(pe) = avg.forward_pe {
        let mut line = format!("Weighted forward P/E {pe:.1}x");
        if let Some(g) = avg.eps_growth {
            line.push_str(&format!(", EPS growth {}%", signed(g)));
        }
        if let Some(y) = avg.dividend_yield {
            line.push_str(&format!(", dividend yield {y:.2}%"));
        }
        if let Some(r) = avg.expected_return {
            line.push_str(&format!(" (expected return {}%)", signed(r)));
        }
        highlights.push(line);
    }

    if let Some(r) = summary.weighted_return.filing_qtr_weighted_return {
        let quarter = summary.filing_quarter.as_deref().unwrap_or("filing quarter");
        highlights.push(format!("{quarter} weighted return {}%", signed(r)));
    }

    if let Some(rate) = summary.eps_beat_rate {
        highlights.push(format!(
            "{rate:.1}% of holdings beat EPS estimates ({} of {})",
            summary.eps_beat_count, summary.eps_total_count
        ));
    }

    if let Some(first) = overlap.first() {
        highlights.push(format!(
            "{} stocks held by two or more managers; most widely held is {} ({} managers)",
            overlap.len(),
            display_label(&first.name, &first.ticker),
            first.manager_count
        ));
    }

    if let Some(diff) = diff {
        let new: usize = diff.values().map(|d| d.new_positions.len()).sum();
        let exited: usize = diff.values().map(|d| d.exited_positions.len()).sum();
        highlights.push(format!("Quarter over quarter: {new} new positions, {exited} exits"));

        let mut moves: Vec<(&str, &str, f64)> = diff
            .iter()
            .flat_map(|(manager, d)| {
                d.changed_positions
                    .iter()
                    .map(move |c| (manager.as_str(), c.ticker.as_str(), c.change_pct))
            })
            .collect();
        moves.sort_by(|a, b| {
            b.2.abs()
                .partial_cmp(&a.2.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (manager, ticker, change) in moves.into_iter().take(MAX_MOVES) {
            highlights.push(format!("{manager} moved {ticker} by {}pp", signed(change)));
        }
    }

    PortfolioNarrative { headline, highlights }
}
