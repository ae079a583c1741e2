// runpro – spill av en innspilt fix-strøm og skriv ut sammendrag.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use runpro_core::storage::{load_config, load_fixes, save_gpx, save_summary};
use runpro_core::summary::fmt_mmss;
use runpro_core::{HardeningConfig, Metrics, RunSession};

#[derive(Parser, Debug)]
#[command(name = "runpro", about = "Replay a recorded GPS fix stream through the hardening engine")]
struct Args {
    /// Fix-strøm (.json eller .csv)
    input: PathBuf,

    /// Konfigfil (JSON); mangler den brukes default
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    max_accuracy: Option<f64>,
    #[arg(long)]
    max_speed: Option<f64>,
    #[arg(long)]
    max_jump: Option<f64>,
    #[arg(long)]
    max_stale_ms: Option<i64>,
    #[arg(long)]
    alpha: Option<f64>,

    /// Skriv rutefil (GPX)
    #[arg(long)]
    gpx: Option<PathBuf>,

    /// Skriv sammendrag (JSON) til fil i tillegg til stdout
    #[arg(long)]
    summary: Option<PathBuf>,

    #[arg(long, default_value = "RunPro")]
    name: String,

    /// Skriv Prometheus-tellere til stderr
    #[arg(long)]
    metrics: bool,
}

fn resolve_config(args: &Args) -> Result<HardeningConfig> {
    let mut cfg = match &args.config {
        Some(p) => load_config(p).with_context(|| format!("loading config {}", p.display()))?,
        None => HardeningConfig::default(),
    };
    if let Some(v) = args.max_accuracy { cfg.max_accuracy_m = v; }
    if let Some(v) = args.max_speed { cfg.max_speed_mps = v; }
    if let Some(v) = args.max_jump { cfg.max_jump_m = v; }
    if let Some(v) = args.max_stale_ms { cfg.max_stale_ms = v; }
    if let Some(v) = args.alpha { cfg.smooth_alpha = v; }
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = resolve_config(&args)?;
    let fixes = load_fixes(&args.input)
        .with_context(|| format!("reading fixes from {}", args.input.display()))?;

    let started_at = fixes.first().map(|f| f.timestamp_ms).unwrap_or(0);
    let metrics = Arc::new(Metrics::new().context("registering metrics")?);
    let mut session = RunSession::start(cfg, started_at)
        .context("starting run session")?
        .with_metrics(Arc::clone(&metrics));

    let accepted = session.push_all(fixes.iter().copied());
    info!("{} of {} fixes accepted", accepted, fixes.len());

    let ended_at = fixes.last().map(|f| f.timestamp_ms).unwrap_or(started_at);
    let run = session.finish(ended_at);
    let summary = run.summary();

    for (i, s) in summary.splits_sec_per_km.iter().enumerate() {
        info!("km {:>2}: {} /km", i + 1, fmt_mmss(*s));
    }

    println!("{}", summary.to_json()?);

    if let Some(p) = &args.summary {
        save_summary(&summary, p).with_context(|| format!("writing {}", p.display()))?;
    }
    if let Some(p) = &args.gpx {
        save_gpx(&run.to_gpx(&args.name)?, p).with_context(|| format!("writing {}", p.display()))?;
    }
    if args.metrics {
        eprint!("{}", metrics.encode_text().context("encoding metrics")?);
    }

    Ok(())
}
