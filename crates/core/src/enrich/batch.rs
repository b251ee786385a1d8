use crate::domain::holding::Enrichment;
use crate::enrich::fetcher::EnrichmentFetcher;
use crate::enrich::types::TickerEnrichment;
use chrono::NaiveDate;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const DEFAULT_CONCURRENCY: usize = 10;

impl EnrichmentFetcher {
    /// Fetches every ticker on at most `concurrency` workers and returns one result per
    /// ticker in completion order. `progress(done, total)` runs once per completion with
    /// `done` counting up from 1; a panicking callback is ignored. A worker that panics
    /// yields an all-null record for its ticker.
    pub async fn fetch_batch<P>(
        &self,
        tickers: &[String],
        quarter_end: NaiveDate,
        concurrency: usize,
        mut progress: P,
    ) -> Vec<TickerEnrichment>
    where
        P: FnMut(usize, usize),
    {
        let total = tickers.len();
        let mut out = Vec::with_capacity(total);
        if total == 0 {
            return out;
        }

        let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
        let mut set = JoinSet::new();

        for (idx, ticker) in tickers.iter().enumerate() {
            let fetcher = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let ticker = ticker.clone();

            set.spawn(async move {
                // The semaphore is never closed, so a failed acquire cannot happen in practice.
                let _permit = semaphore.acquire_owned().await.ok();
                let res = AssertUnwindSafe(fetcher.fetch_one(&ticker, quarter_end))
                    .catch_unwind()
                    .await;
                let enrichment = res.unwrap_or_else(|_| {
                    tracing::warn!(
                        ticker = %ticker,
                        "enrichment worker panicked; using empty record"
                    );
                    Enrichment::default()
                });
                (idx, enrichment)
            });
        }

        let mut finished = vec![false; total];
        let mut done = 0usize;

        while let Some(joined) = set.join_next().await {
            done += 1;
            match joined {
                Ok((idx, enrichment)) => {
                    finished[idx] = true;
                    out.push(TickerEnrichment {
                        ticker: tickers[idx].clone(),
                        enrichment,
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "enrichment worker did not complete");
                }
            }

            if std::panic::catch_unwind(AssertUnwindSafe(|| progress(done, total))).is_err() {
                tracing::warn!(done, total, "progress callback panicked; ignoring");
            }
        }

        for (idx, ticker) in tickers.iter().enumerate() {
            if !finished[idx] {
                out.push(TickerEnrichment {
                    ticker: ticker.clone(),
                    enrichment: Enrichment::default(),
                });
            }
        }

        out
    }
}

/// Progress callback that logs the first, last and every `every`-th completion.
pub fn log_progress(every: usize) -> impl FnMut(usize, usize) {
    let every = every.max(1);
    move |done, total| {
        if done == 1 || done == total || done % every == 0 {
            tracing::info!(processed = done, total, "enrichment progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::cache::{EnrichmentCache, InMemoryEnrichmentCache};
    use crate::enrich::mock::MockMarketData;
    use crate::enrich::provider::MarketDataClient;
    use crate::enrich::types::{EarningsEvent, InfoBundle, PriceBar};
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn qe() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 30).unwrap()
    }

    fn client_with(tickers: &[&str], panic_on: Option<&str>) -> MockMarketData {
        let mut mock = MockMarketData::default();
        for t in tickers {
            mock.bars.insert(
                t.to_string(),
                vec![
                    PriceBar {
                        date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                        close: 10.0,
                    },
                    PriceBar {
                        date: qe(),
                        close: 12.0,
                    },
                ],
            );
        }
        mock.panic_on = panic_on.map(str::to_string);
        mock
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn one_panicking_worker_does_not_abort_batch() {
        let tickers = symbols(&["AAA", "BBB", "CCC", "DDD", "EEE"]);
        let client = client_with(&["AAA", "BBB", "CCC", "DDD", "EEE"], Some("CCC"));
        let fetcher = EnrichmentFetcher::new(
            Arc::new(client),
            Arc::new(InMemoryEnrichmentCache::new()),
        )
        .with_today(qe());

        let mut seen = Vec::new();
        let results = fetcher
            .fetch_batch(&tickers, qe(), 3, |done, total| {
                assert_eq!(total, 5);
                seen.push(done);
            })
            .await;

        assert_eq!(results.len(), 5);
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);

        let failed = results.iter().find(|r| r.ticker == "CCC").unwrap();
        assert!(failed.enrichment.is_empty());
        let ok = results.iter().find(|r| r.ticker == "AAA").unwrap();
        assert_eq!(ok.enrichment.filing.return_pct, Some(20.0));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn panicking_progress_callback_is_swallowed() {
        let tickers = symbols(&["AAA", "BBB"]);
        let fetcher = EnrichmentFetcher::new(
            Arc::new(client_with(&["AAA", "BBB"], None)),
            Arc::new(InMemoryEnrichmentCache::new()),
        )
        .with_today(qe());

        let mut calls = 0;
        let results = fetcher
            .fetch_batch(&tickers, qe(), 10, |_, _| {
                calls += 1;
                panic!("callback failure");
            })
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(calls, 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn batch_fills_shared_cache() {
        let tickers = symbols(&["AAA", "BBB", "AAA"]);
        let cache = Arc::new(InMemoryEnrichmentCache::new());
        let fetcher = EnrichmentFetcher::new(
            Arc::new(client_with(&["AAA", "BBB"], None)),
            cache.clone(),
        )
        .with_today(qe());

        let results = fetcher.fetch_batch(&tickers, qe(), 1, |_, _| {}).await;
        assert_eq!(results.len(), 3);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn empty_batch_never_reports_progress() {
        let fetcher = EnrichmentFetcher::new(
            Arc::new(MockMarketData::default()),
            Arc::new(InMemoryEnrichmentCache::new()),
        );
        let mut calls = 0;
        let results = fetcher.fetch_batch(&[], qe(), 4, |_, _| calls += 1).await;
        assert!(results.is_empty());
        assert_eq!(calls, 0);
    }

    /// Counts overlapping price lookups. Each ticker makes exactly one when `today` is the
    /// quarter end, so the peak equals the number of tickers being worked on at once.
    #[derive(Default)]
    struct SlowMarketData {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl MarketDataClient for SlowMarketData {
        fn provider_name(&self) -> &'static str {
            "slow"
        }

        async fn price_history(
            &self,
            _ticker: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> anyhow::Result<Vec<PriceBar>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn info(&self, ticker: &str) -> anyhow::Result<InfoBundle> {
            Err(anyhow!("no info for {ticker}"))
        }

        async fn earnings(&self, ticker: &str) -> anyhow::Result<Vec<EarningsEvent>> {
            Err(anyhow!("no earnings for {ticker}"))
        }
    }

    async fn peak_workers(count: usize, concurrency: usize) -> usize {
        let client = Arc::new(SlowMarketData::default());
        let fetcher =
            EnrichmentFetcher::new(client.clone(), Arc::new(InMemoryEnrichmentCache::new()))
                .with_today(qe());
        let tickers: Vec<String> = (0..count).map(|i| format!("T{i:02}")).collect();

        let results = fetcher.fetch_batch(&tickers, qe(), concurrency, |_, _| {}).await;
        assert_eq!(results.len(), count);
        assert_eq!(client.in_flight.load(Ordering::SeqCst), 0);
        client.peak.load(Ordering::SeqCst)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn workers_never_exceed_concurrency() {
        let peak = peak_workers(12, 3).await;
        assert!(peak <= 3, "peak {peak} exceeded 3 workers");
        assert!(peak > 1, "batch ran serially");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn zero_concurrency_runs_one_worker() {
        assert_eq!(peak_workers(5, 0).await, 1);
    }
}
