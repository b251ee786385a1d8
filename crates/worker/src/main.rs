use anyhow::Context;
use clap::Parser;
use holdlens_core::analytics::summary::main_filing_period;
use holdlens_core::analytics::valuation::DEFAULT_SCATTER_SIZE;
use holdlens_core::config::Settings;
use holdlens_core::domain::benchmark::BenchmarkSnapshot;
use holdlens_core::domain::contract::{parse_holdings, parse_weight_pairs, parse_weights_json};
use holdlens_core::domain::holding::{HoldingRecord, ManagerWeights};
use holdlens_core::enrich::batch::log_progress;
use holdlens_core::enrich::cache::InMemoryEnrichmentCache;
use holdlens_core::enrich::fetcher::EnrichmentFetcher;
use holdlens_core::enrich::provider::{HttpJsonMarketData, MarketDataClient};
use holdlens_core::enrich::{attach_enrichment, distinct_tickers};
use holdlens_core::time::quarter::resolve_as_of_date;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Debug, Parser)]
#[command(name = "holdlens_worker")]
struct Args {
    /// Holdings snapshot: JSON array of holding records.
    #[arg(long)]
    holdings: PathBuf,

    /// Previous quarter's snapshot, for the quarter-over-quarter diff.
    #[arg(long)]
    previous: Option<PathBuf>,

    /// JSON object of manager -> weight.
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Manager weight as NAME=WEIGHT; repeatable, overrides --weights.
    #[arg(long = "weight")]
    weight: Vec<String>,

    /// Benchmark snapshot (sector map, country map, top holdings).
    #[arg(long)]
    benchmark: Option<PathBuf>,

    /// As-of date (YYYY-MM-DD). Defaults to the latest weekday.
    #[arg(long)]
    as_of: Option<String>,

    /// Enrichment workers. Defaults to ENRICH_CONCURRENCY.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Positions in the valuation scatter and the combined table.
    #[arg(long, default_value_t = DEFAULT_SCATTER_SIZE)]
    top_n: usize,

    /// Use the snapshot as-is without calling the market-data provider.
    #[arg(long)]
    skip_enrich: bool,

    /// Report path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %format!("{err:#}"), "holdings run failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &Settings, args: Args) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    let as_of_date = resolve_as_of_date(args.as_of.as_deref(), now)?;

    let records = read_holdings(&args.holdings)?;
    let previous = args.previous.as_deref().map(read_holdings).transpose()?;
    let weights = resolve_weights(settings, args.weights.as_deref(), &args.weight)?;
    let benchmark = args
        .benchmark
        .as_deref()
        .map(read_benchmark)
        .transpose()?;

    let quarter_end = main_filing_period(&records);
    tracing::info!(
        %as_of_date,
        records = records.len(),
        quarter_end = ?quarter_end,
        weighted = weights.is_some(),
        "loaded holdings snapshot"
    );

    let (records, enriched) = match quarter_end {
        Some(quarter_end) if !args.skip_enrich => {
            let concurrency = args.concurrency.unwrap_or(settings.enrich_concurrency);
            let records = enrich(settings, &records, quarter_end, as_of_date, concurrency).await?;
            (records, true)
        }
        _ => (records, false),
    };

    let report = report::build_report(
        report::ReportInputs {
            records: &records,
            previous: previous.as_deref(),
            weights: weights.as_ref(),
            benchmark: benchmark.as_ref(),
            as_of_date,
            quarter_end,
            enriched,
            top_n: args.top_n,
        },
        now,
    );

    let json = serde_json::to_string_pretty(&report).context("serialize report failed")?;
    match args.out.as_deref() {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write {} failed", path.display()))?;
            tracing::info!(run_id = %report.run_id, path = %path.display(), "wrote report");
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn enrich(
    settings: &Settings,
    records: &[HoldingRecord],
    quarter_end: chrono::NaiveDate,
    as_of_date: chrono::NaiveDate,
    concurrency: usize,
) -> anyhow::Result<Vec<HoldingRecord>> {
    let client = HttpJsonMarketData::from_settings(settings)?;
    let provider = client.provider_name();
    let fetcher = EnrichmentFetcher::new(Arc::new(client), Arc::new(InMemoryEnrichmentCache::new()))
        .with_today(as_of_date);

    let tickers = distinct_tickers(records);
    tracing::info!(
        provider,
        tickers = tickers.len(),
        concurrency,
        %quarter_end,
        "enriching holdings"
    );

    let batch = fetcher
        .fetch_batch(
            &tickers,
            quarter_end,
            concurrency,
            log_progress(settings.enrich_progress_every),
        )
        .await;

    let missing = batch.iter().filter(|r| r.enrichment.is_empty()).count();
    if missing > 0 {
        tracing::warn!(missing, total = batch.len(), "some tickers returned no market data");
    }
    Ok(attach_enrichment(records, &batch))
}

fn read_holdings(path: &Path) -> anyhow::Result<Vec<HoldingRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read holdings {} failed", path.display()))?;
    parse_holdings(&text).with_context(|| format!("invalid holdings {}", path.display()))
}

fn read_benchmark(path: &Path) -> anyhow::Result<BenchmarkSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read benchmark {} failed", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid benchmark {}", path.display()))
}

/// `--weight` flags win over `--weights`, which wins over `MANAGER_WEIGHTS`.
fn resolve_weights(
    settings: &Settings,
    file: Option<&Path>,
    flags: &[String],
) -> anyhow::Result<Option<ManagerWeights>> {
    let mut out: Option<ManagerWeights> = match settings.manager_weights.as_deref() {
        Some(s) => Some(parse_weight_pairs(s).context("invalid MANAGER_WEIGHTS")?),
        None => None,
    };

    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read weights {} failed", path.display()))?;
        out = Some(parse_weights_json(&text)?);
    }

    if !flags.is_empty() {
        let from_flags = parse_weight_pairs(&flags.join(","))?;
        out.get_or_insert_with(ManagerWeights::new).extend(from_flags);
    }
    Ok(out)
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
