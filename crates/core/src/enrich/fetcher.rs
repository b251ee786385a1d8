use crate::analytics::stats::round_to;
use crate::domain::holding::{Enrichment, MonthlyReturn, QuarterFigures};
use crate::enrich::cache::{CacheKey, EnrichmentCache};
use crate::enrich::provider::MarketDataClient;
use crate::enrich::types::{EarningsEvent, InfoBundle, PriceBar};
use crate::taxonomy::{lookup_fallback, Classification};
use crate::time::quarter::{
    month_windows_after, prior_quarter_bounds, quarter_bounds, QuarterBounds,
};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

const HISTORY_PAD_DAYS: i64 = 10;
const CLOSE_SEARCH_DAYS: i64 = 5;
const EARNINGS_DAYS_BEFORE: i64 = 30;
const EARNINGS_DAYS_AFTER: i64 = 90;
const MIN_ABS_DENOMINATOR: f64 = 0.001;

/// Fetches and caches per-ticker enrichment. Cheap to clone; clones share the client and cache.
#[derive(Clone)]
pub struct EnrichmentFetcher {
    client: Arc<dyn MarketDataClient>,
    cache: Arc<dyn EnrichmentCache>,
    today: Option<NaiveDate>,
}

impl EnrichmentFetcher {
    pub fn new(client: Arc<dyn MarketDataClient>, cache: Arc<dyn EnrichmentCache>) -> Self {
        Self {
            client,
            cache,
            today: None,
        }
    }

    /// Pins "today" for QTD and monthly figures instead of the UTC clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn cache(&self) -> &dyn EnrichmentCache {
        self.cache.as_ref()
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Never fails: every field the provider cannot supply stays `None`.
    pub async fn fetch_one(&self, ticker: &str, quarter_end: NaiveDate) -> Enrichment {
        let key = CacheKey::new(ticker, quarter_end);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(ticker = %key.ticker, %quarter_end, "enrichment cache hit");
            return hit;
        }

        let out = self.fetch_uncached(&key.ticker, quarter_end).await;
        self.cache.put(key, out.clone());
        out
    }

    async fn fetch_uncached(&self, ticker: &str, quarter_end: NaiveDate) -> Enrichment {
        let filing = quarter_bounds(quarter_end);
        let prior = prior_quarter_bounds(quarter_end);
        let history_start = prior.start - Duration::days(HISTORY_PAD_DAYS);
        let history_end = filing.end + Duration::days(HISTORY_PAD_DAYS);

        let (history, info, earnings) = tokio::join!(
            self.client.price_history(ticker, history_start, history_end),
            self.client.info(ticker),
            self.client.earnings(ticker),
        );
        let history =
            PriceSeries::from_bars(ok_or_log(ticker, "price_history", history).unwrap_or_default());
        let info = ok_or_log(ticker, "info", info).unwrap_or_default();
        let earnings = ok_or_log(ticker, "earnings", earnings).unwrap_or_default();

        let mut out = Enrichment {
            prior: quarter_figures(&history, &earnings, prior),
            filing: quarter_figures(&history, &earnings, filing),
            ..Default::default()
        };
        apply_info(&mut out, ticker, &info);

        let today = self.today();
        if today > filing.end {
            let qtd = self
                .client
                .price_history(ticker, filing.end + Duration::days(1), today)
                .await;
            if let Some(bars) = ok_or_log(ticker, "qtd_price_history", qtd) {
                apply_qtd(&mut out, &PriceSeries::from_bars(bars), filing.end, today);
            }
        }

        out
    }
}

fn ok_or_log<T>(ticker: &str, call: &'static str, res: anyhow::Result<T>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::debug!(
                ticker,
                call,
                error = %err,
                "market data unavailable; leaving fields empty"
            );
            None
        }
    }
}

/// Daily closes keyed by date.
#[derive(Debug, Clone, Default)]
struct PriceSeries(BTreeMap<NaiveDate, f64>);

impl PriceSeries {
    fn from_bars(bars: Vec<PriceBar>) -> Self {
        Self(
            bars.into_iter()
                .filter(|b| b.close.is_finite() && b.close > 0.0)
                .map(|b| (b.date, b.close))
                .collect(),
        )
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    /// Exact date, then one day earlier, then one day later, widening up to the search window.
    fn close_near(&self, target: NaiveDate) -> Option<f64> {
        for offset in 0..=CLOSE_SEARCH_DAYS {
            for direction in [0, -1, 1] {
                let day = target + Duration::days(offset * direction);
                if let Some(close) = self.0.get(&day) {
                    return Some(*close);
                }
            }
        }
        None
    }

    fn first_close(&self) -> Option<f64> {
        self.0.values().next().copied()
    }

    fn last_close(&self) -> Option<f64> {
        self.0.values().next_back().copied()
    }

    fn last_before(&self, date: NaiveDate) -> Option<f64> {
        self.0.range(..date).next_back().map(|(_, c)| *c)
    }

    fn last_in(&self, start: NaiveDate, end_exclusive: NaiveDate) -> Option<f64> {
        self.0.range(start..end_exclusive).next_back().map(|(_, c)| *c)
    }
}

fn pct_change(start: Option<f64>, end: Option<f64>) -> Option<f64> {
    match (start, end) {
        (Some(s), Some(e)) if s > 0.0 => Some(round_to((e / s - 1.0) * 100.0, 2)),
        _ => None,
    }
}

fn quarter_figures(
    history: &PriceSeries,
    earnings: &[EarningsEvent],
    q: QuarterBounds,
) -> QuarterFigures {
    let start = history.close_near(q.start);
    let end = history.close_near(q.end);

    let mut figures = QuarterFigures {
        price_qtr_end: end.map(|p| round_to(p, 2)),
        return_pct: pct_change(start, end),
        ..Default::default()
    };

    if let Some(event) = nearest_earnings(earnings, q.end) {
        figures.reported_eps = finite(event.reported_eps);
        figures.consensus_eps = finite(event.eps_estimate);
        if let (Some(reported), Some(consensus)) = (figures.reported_eps, figures.consensus_eps) {
            figures.eps_beat_dollars = Some(round_to(reported - consensus, 4));
            if consensus.abs() > MIN_ABS_DENOMINATOR {
                let surprise = (reported - consensus) / consensus.abs() * 100.0;
                figures.eps_beat_pct = Some(round_to(surprise, 2));
            }
        }
    }

    figures
}

/// Closest report to the quarter end within [-30, +90] days; the earliest listed wins ties.
fn nearest_earnings(events: &[EarningsEvent], quarter_end: NaiveDate) -> Option<&EarningsEvent> {
    let mut best: Option<(&EarningsEvent, i64)> = None;
    for event in events {
        let delta = (event.date - quarter_end).num_days();
        if !(-EARNINGS_DAYS_BEFORE..=EARNINGS_DAYS_AFTER).contains(&delta) {
            continue;
        }
        let dist = delta.abs();
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((event, dist));
        }
    }
    best.map(|(event, _)| event)
}

fn apply_info(out: &mut Enrichment, ticker: &str, info: &InfoBundle) {
    out.forward_pe = finite(info.forward_pe);
    out.sector = info.sector.clone();
    out.industry = info.industry.clone();
    out.country = info.country.clone();

    if out.sector().is_none() {
        if let Some(class) = lookup_fallback(ticker, None) {
            fill_classification(out, class);
        }
    }

    out.dividend_yield = finite(info.dividend_yield).map(|v| round_to(v, 2));
    out.trailing_eps = finite(info.trailing_eps).map(|v| round_to(v, 2));
    out.forward_eps = finite(info.forward_eps).map(|v| round_to(v, 2));
    out.forward_eps_growth = forward_eps_growth(info);

    let revenue_growth = revenue_growth_fraction(info);
    out.forward_revenue_growth = revenue_growth.map(|g| round_to(g * 100.0, 2));
    out.forward_ps = forward_ps(
        finite(info.market_cap),
        finite(info.total_revenue),
        revenue_growth,
    );
}

/// Fills the sector and any missing industry/country from a curated classification.
pub(crate) fn fill_classification(out: &mut Enrichment, class: Classification) {
    out.sector = Some(class.sector.to_string());
    if out.industry().is_none() {
        out.industry = Some(class.industry.to_string());
    }
    if out.country().is_none() {
        out.country = Some(class.country.to_string());
    }
}

/// Percent. Analyst next-year consensus, then the current earnings growth, then forward vs
/// trailing EPS.
fn forward_eps_growth(info: &InfoBundle) -> Option<f64> {
    if let Some(g) = finite(info.growth_estimate_next_year) {
        return Some(round_to(g * 100.0, 2));
    }
    if let Some(g) = finite(info.earnings_growth) {
        return Some(round_to(g * 100.0, 2));
    }
    match (finite(info.forward_eps), finite(info.trailing_eps)) {
        (Some(fwd), Some(trail)) if trail.abs() > MIN_ABS_DENOMINATOR => {
            Some(round_to((fwd - trail) / trail.abs() * 100.0, 2))
        }
        _ => None,
    }
}

/// Fraction. Next-year revenue estimate, then current revenue growth.
fn revenue_growth_fraction(info: &InfoBundle) -> Option<f64> {
    finite(info.revenue_estimate_next_year).or_else(|| finite(info.revenue_growth))
}

fn forward_ps(
    market_cap: Option<f64>,
    total_revenue: Option<f64>,
    growth: Option<f64>,
) -> Option<f64> {
    let (mc, revenue) = match (market_cap, total_revenue) {
        (Some(mc), Some(rev)) if mc > 0.0 && rev > 0.0 => (mc, rev),
        _ => return None,
    };
    match growth {
        Some(g) if g > -1.0 => Some(round_to(mc / (revenue * (1.0 + g)), 2)),
        Some(_) => None,
        None => Some(round_to(mc / revenue, 2)),
    }
}

fn apply_qtd(out: &mut Enrichment, qtd: &PriceSeries, quarter_end: NaiveDate, today: NaiveDate) {
    if qtd.len() < 2 {
        return;
    }
    let (Some(start), Some(last)) = (qtd.first_close(), qtd.last_close()) else {
        return;
    };

    out.qtd_return_pct = pct_change(Some(start), Some(last));
    out.qtd_price_start = Some(round_to(start, 2));
    out.current_price = Some(round_to(last, 2));

    let monthly: Vec<MonthlyReturn> = month_windows_after(quarter_end, today)
        .into_iter()
        .map(|window| {
            let base = qtd.last_before(window.start).unwrap_or(start);
            let return_pct = qtd
                .last_in(window.start, window.end)
                .and_then(|end| pct_change(Some(base), Some(end)));
            MonthlyReturn {
                month: window.label,
                return_pct,
            }
        })
        .collect();

    if !monthly.is_empty() {
        out.monthly_returns = Some(monthly);
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::cache::InMemoryEnrichmentCache;
    use crate::enrich::mock::MockMarketData;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bar(date: NaiveDate, close: f64) -> PriceBar {
        PriceBar { date, close }
    }

    fn event(date: NaiveDate, reported: f64, estimate: f64) -> EarningsEvent {
        EarningsEvent {
            date,
            reported_eps: Some(reported),
            eps_estimate: Some(estimate),
        }
    }

    #[test]
    fn close_lookup_prefers_earlier_day_at_same_offset() {
        // 2025-06-30 missing; 06-29 and 07-01 both one day away.
        let series =
            PriceSeries::from_bars(vec![bar(d(2025, 6, 29), 10.0), bar(d(2025, 7, 1), 11.0)]);
        assert_eq!(series.close_near(d(2025, 6, 30)), Some(10.0));
        assert_eq!(series.close_near(d(2025, 7, 10)), None);
    }

    #[test]
    fn earnings_match_uses_asymmetric_window() {
        let qe = d(2025, 9, 30);
        let events = vec![
            event(d(2025, 8, 15), 1.0, 1.0),
            event(d(2025, 10, 30), 2.0, 1.6),
            event(d(2026, 1, 29), 3.0, 3.0),
        ];
        let hit = nearest_earnings(&events, qe).unwrap();
        assert_eq!(hit.reported_eps, Some(2.0));

        let too_early = vec![event(d(2025, 8, 1), 1.0, 1.0)];
        assert!(nearest_earnings(&too_early, qe).is_none());
    }

    #[test]
    fn beat_pct_skipped_for_tiny_consensus() {
        let series = PriceSeries::default();
        let q = quarter_bounds(d(2025, 9, 30));
        let figures = quarter_figures(&series, &[event(d(2025, 10, 20), 0.05, 0.0005)], q);
        assert_eq!(figures.eps_beat_dollars, Some(0.0495));
        assert_eq!(figures.eps_beat_pct, None);

        let figures = quarter_figures(&series, &[event(d(2025, 10, 20), 2.2, 2.0)], q);
        assert_eq!(figures.eps_beat_pct, Some(10.0));
    }

    #[test]
    fn eps_growth_fallback_chain() {
        let mut info = InfoBundle {
            forward_eps: Some(6.0),
            trailing_eps: Some(5.0),
            ..Default::default()
        };
        assert_eq!(forward_eps_growth(&info), Some(20.0));

        info.earnings_growth = Some(0.15);
        assert_eq!(forward_eps_growth(&info), Some(15.0));

        info.growth_estimate_next_year = Some(0.081);
        assert_eq!(forward_eps_growth(&info), Some(8.1));

        let tiny_trailing = InfoBundle {
            forward_eps: Some(1.0),
            trailing_eps: Some(0.0001),
            ..Default::default()
        };
        assert_eq!(forward_eps_growth(&tiny_trailing), None);
    }

    #[test]
    fn forward_ps_rules() {
        assert_eq!(forward_ps(Some(1000.0), Some(100.0), Some(0.25)), Some(8.0));
        assert_eq!(forward_ps(Some(1000.0), Some(100.0), None), Some(10.0));
        assert_eq!(forward_ps(Some(1000.0), Some(100.0), Some(-1.0)), None);
        assert_eq!(forward_ps(None, Some(100.0), None), None);
        assert_eq!(forward_ps(Some(1000.0), Some(0.0), None), None);
    }

    fn sample_client() -> MockMarketData {
        let mut mock = MockMarketData::default();
        mock.bars.insert(
            "AAPL".to_string(),
            vec![
                bar(d(2025, 4, 1), 200.0),
                bar(d(2025, 6, 30), 210.0),
                bar(d(2025, 7, 1), 210.0),
                bar(d(2025, 9, 30), 231.0),
                bar(d(2025, 10, 1), 100.0),
                bar(d(2025, 10, 31), 110.0),
                bar(d(2025, 11, 3), 121.0),
                bar(d(2025, 11, 10), 99.0),
            ],
        );
        mock.info.insert(
            "AAPL".to_string(),
            InfoBundle {
                forward_pe: Some(28.5),
                dividend_yield: Some(0.444),
                earnings_growth: Some(0.1),
                market_cap: Some(3000.0),
                total_revenue: Some(400.0),
                ..Default::default()
            },
        );
        mock.earnings.insert(
            "AAPL".to_string(),
            vec![event(d(2025, 7, 31), 1.57, 1.43), event(d(2025, 10, 30), 1.85, 1.77)],
        );
        mock
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_one_assembles_record() {
        let client = Arc::new(sample_client());
        let fetcher = EnrichmentFetcher::new(client, Arc::new(InMemoryEnrichmentCache::new()))
            .with_today(d(2025, 11, 12));

        let e = fetcher.fetch_one("AAPL", d(2025, 9, 30)).await;

        assert_eq!(e.prior.price_qtr_end, Some(210.0));
        assert_eq!(e.prior.return_pct, Some(5.0));
        assert_eq!(e.filing.return_pct, Some(10.0));
        assert_eq!(e.filing.reported_eps, Some(1.85));
        assert_eq!(e.prior.eps_beat_dollars, Some(0.14));
        assert_eq!(e.forward_pe, Some(28.5));
        assert_eq!(e.forward_eps_growth, Some(10.0));
        assert_eq!(e.dividend_yield, Some(0.44));
        assert_eq!(e.forward_ps, Some(7.5));
        // Provider had no sector, so the curated table fills it.
        assert_eq!(e.sector(), Some("Technology"));
        assert_eq!(e.country(), Some("United States"));

        assert_eq!(e.qtd_price_start, Some(100.0));
        assert_eq!(e.current_price, Some(99.0));
        assert_eq!(e.qtd_return_pct, Some(-1.0));
        let monthly = e.monthly_returns.unwrap();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].month, "Oct");
        assert_eq!(monthly[0].return_pct, Some(10.0));
        assert_eq!(monthly[1].month, "Nov MTD");
        assert_eq!(monthly[1].return_pct, Some(-10.0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_one_is_cached_per_quarter() {
        let client = Arc::new(sample_client());
        let cache = Arc::new(InMemoryEnrichmentCache::new());
        let fetcher =
            EnrichmentFetcher::new(client.clone(), cache.clone()).with_today(d(2025, 11, 12));

        let first = fetcher.fetch_one("AAPL", d(2025, 9, 30)).await;
        let calls = client.calls();
        let second = fetcher.fetch_one("aapl", d(2025, 9, 30)).await;

        assert_eq!(first, second);
        assert_eq!(client.calls(), calls);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn provider_failures_degrade_to_empty_fields() {
        let fetcher = EnrichmentFetcher::new(
            Arc::new(MockMarketData::default()),
            Arc::new(InMemoryEnrichmentCache::new()),
        )
        .with_today(d(2025, 11, 12));

        let e = fetcher.fetch_one("ZZZZ", d(2025, 9, 30)).await;
        assert!(e.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn no_qtd_before_quarter_closes() {
        let fetcher = EnrichmentFetcher::new(
            Arc::new(sample_client()),
            Arc::new(InMemoryEnrichmentCache::new()),
        )
        .with_today(d(2025, 9, 30));

        let e = fetcher.fetch_one("AAPL", d(2025, 9, 30)).await;
        assert_eq!(e.qtd_return_pct, None);
        assert_eq!(e.monthly_returns, None);
        assert_eq!(e.filing.return_pct, Some(10.0));
    }
}
