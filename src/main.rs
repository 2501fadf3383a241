//! Scorely CLI entrypoint: filter and rank a candidate export in one pass.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;
use tokio::signal;

use scorely::candidate::{CandidateStore, RawColumns};
use scorely::config::{Config, PipelineConfig};
use scorely::filter::{RejectionFilter, RuleSet};
use scorely::provider::{OpenAiProvider, ScoringProvider};
use scorely::ranking::{ControlHandle, RankingOrchestrator, RowRange};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Screen and rank candidates against ideal profiles.
#[derive(Debug, Parser)]
#[command(name = "scorely", version)]
struct Args {
    /// Candidate rows as a JSON array of `column -> value` objects.
    rows: PathBuf,

    /// Saved pipeline configuration (JSON).
    #[arg(long, env = "SCORELY_PIPELINE_PATH")]
    pipeline: Option<PathBuf>,

    /// First sheet row to rank (row 1 is the header).
    #[arg(long)]
    start: Option<usize>,

    /// Last sheet row to rank, inclusive.
    #[arg(long)]
    end: Option<usize>,

    /// Write the JSON report here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let pipeline_path = args
        .pipeline
        .clone()
        .or_else(|| config.pipeline_path.clone())
        .context("no pipeline configuration given (use --pipeline or SCORELY_PIPELINE_PATH)")?;
    let pipeline = PipelineConfig::from_json_file(&pipeline_path)?;
    pipeline.validate()?;

    let range = RowRange::new(
        args.start.unwrap_or(pipeline.row_range.start),
        args.end.unwrap_or(pipeline.row_range.end),
    )?;

    tracing::info!(
        rows = %args.rows.display(),
        pipeline = %pipeline_path.display(),
        range = %range,
        economy_mode = pipeline.economy_mode,
        "Scorely starting"
    );

    let text = std::fs::read_to_string(&args.rows)
        .with_context(|| format!("failed to read {}", args.rows.display()))?;
    let rows: Vec<RawColumns> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of rows", args.rows.display()))?;

    let mut store = CandidateStore::ingest(rows, &pipeline.column_mapping)?;
    let rules = RuleSet::from_config(&pipeline)?;
    let filtered = RejectionFilter::new(rules).filter(store.records());
    store.apply_tags(&filtered.tags);

    tracing::info!(
        input = filtered.stats.input,
        survivors = filtered.stats.survivors,
        rejected = filtered.stats.rejected(),
        "Filtering complete"
    );

    let provider: Arc<dyn ScoringProvider> = Arc::new(OpenAiProvider::new(&config)?);
    let mut orchestrator = RankingOrchestrator::from_config(provider, &config, &pipeline)?;

    let control = orchestrator.control();
    tokio::spawn(stop_on_shutdown(control.clone()));
    tokio::spawn(report_progress(control));

    let summary = orchestrator.run(&store, &filtered, range).await?;

    let report = serde_json::json!({
        "summary": summary,
        "filter": filtered.stats,
        "rejections": filtered.rejections,
        "results": orchestrator.results().snapshot(),
    });
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }

    tracing::info!(next_range = %summary.next_range, "Scorely finished");
    Ok(())
}

/// Logs once per reporting batch until the progress channel closes.
async fn report_progress(control: ControlHandle) {
    let mut progress = control.subscribe();
    let mut last_batch = 0;
    while progress.changed().await.is_ok() {
        let snapshot = progress.borrow_and_update().clone();
        if snapshot.batches() != last_batch {
            last_batch = snapshot.batches();
            tracing::info!(
                status = %snapshot.status,
                processed = snapshot.processed,
                total = snapshot.total,
                ranked = snapshot.ranked,
                eta_secs = snapshot.eta().map(|d| d.as_secs()),
                "Ranking progress"
            );
        }
    }
}

async fn stop_on_shutdown(control: ControlHandle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, stopping after the current candidate");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, stopping after the current candidate");
        }
    }

    control.stop();
}
