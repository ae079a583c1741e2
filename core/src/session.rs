use std::sync::Arc;

use log::{debug, info};

use crate::coach::coach_score;
use crate::error::Result;
use crate::route::to_gpx;
use crate::hardening::{apply_fix, HardeningState};
use crate::models::{RunFix, RunStats, SmoothedPosition};
use crate::summary::build_summary;
use crate::telemetry::Metrics;
use crate::types::{CoachScore, FixVerdict, HardeningConfig, RunSummary};

/// Aktiv økt: eier konfig, akkumulator og fix-historikken.
///
/// Én skriver (`push`), lesere henter snapshots ved behov. Ingen global tilstand;
/// en ny økt er bare en ny `RunSession`.
///
/// Tre historikker i ankomstrekkefølge:
/// - `raw`: alle fixer slik de kom inn
/// - `accepted_raw`: rå-fixene som passerte porten (grunnlag for pace, stabilitet, coach)
/// - `track`: de samme fixene etter glatting (rutefil, kart)
#[derive(Debug)]
pub struct RunSession {
    cfg: HardeningConfig,
    state: HardeningState,
    raw: Vec<RunFix>,
    accepted_raw: Vec<RunFix>,
    track: Vec<RunFix>,
    metrics: Option<Arc<Metrics>>,
}

impl RunSession {
    /// Start en økt. Ugyldig konfig avvises her, før første fix.
    pub fn start(cfg: HardeningConfig, started_at_ms: i64) -> Result<Self> {
        cfg.validate()?;
        info!(
            "run session started at {} (max_accuracy={}m, max_speed={}m/s, alpha={})",
            started_at_ms, cfg.max_accuracy_m, cfg.max_speed_mps, cfg.smooth_alpha
        );
        Ok(Self {
            cfg,
            state: HardeningState::new(started_at_ms),
            raw: Vec::new(),
            accepted_raw: Vec::new(),
            track: Vec::new(),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Eneste inngang for rå fixer fra posisjonskilden.
    pub fn push(&mut self, raw: RunFix) -> FixVerdict {
        self.raw.push(raw);
        let splits_before = self.state.stats().splits_sec_per_km.len();

        let verdict = apply_fix(&mut self.state, &raw, &self.cfg);

        match verdict {
            FixVerdict::Accepted => {
                self.accepted_raw.push(raw);
                if let Some(fix) = self.state.last_fix() {
                    self.track.push(*fix);
                }
            }
            FixVerdict::Rejected(reason) => {
                debug!("fix @{} dropped: {}", raw.timestamp_ms, reason);
            }
        }

        let new_splits = self.state.stats().splits_sec_per_km.len() - splits_before;
        if new_splits > 0 {
            debug!(
                "km {} closed: {:.1}s",
                self.state.stats().splits_sec_per_km.len(),
                self.state.stats().splits_sec_per_km.last().copied().unwrap_or_default()
            );
        }

        if let Some(m) = &self.metrics {
            m.observe_verdict(&verdict);
            m.observe_splits(new_splits);
        }

        verdict
    }

    /// Mat inn en hel serie (replay).
    pub fn push_all<I>(&mut self, fixes: I) -> usize
    where
        I: IntoIterator<Item = RunFix>,
    {
        fixes.into_iter().map(|f| self.push(f)).filter(|v| v.is_accepted()).count()
    }

    #[inline] pub fn config(&self) -> &HardeningConfig { &self.cfg }
    #[inline] pub fn state(&self) -> &HardeningState { &self.state }
    #[inline] pub fn stats(&self) -> &RunStats { self.state.stats() }
    #[inline] pub fn raw_fixes(&self) -> &[RunFix] { &self.raw }
    #[inline] pub fn accepted_fixes(&self) -> &[RunFix] { &self.accepted_raw }
    #[inline] pub fn smoothed_fixes(&self) -> &[RunFix] { &self.track }
    #[inline] pub fn raw_fix_count(&self) -> u32 { self.raw.len() as u32 }
    #[inline] pub fn smoothed_position(&self) -> Option<SmoothedPosition> { self.state.smoothed() }

    pub fn coach_score(&self) -> CoachScore {
        coach_score(&self.accepted_raw, self.stats().dropped_fixes)
    }

    pub fn summary(&self) -> RunSummary {
        build_summary(self.stats(), &self.accepted_raw)
    }

    /// Avslutt økta. Konsumerer sesjonen, så ingen fix kan legges til etterpå.
    pub fn finish(mut self, ended_at_ms: i64) -> FinishedRun {
        self.state.stats_mut().ended_at_ms = Some(ended_at_ms);
        let stats = self.state.stats().clone();
        info!(
            "run session finished: {:.0} m, {} accepted / {} dropped, {} splits",
            stats.distance_m,
            stats.accepted_fixes,
            stats.dropped_fixes,
            stats.splits_sec_per_km.len()
        );
        FinishedRun {
            cfg: self.cfg,
            stats,
            raw: self.raw,
            fixes: self.accepted_raw,
            track: self.track,
        }
    }
}

/// Frosset resultat etter `finish`. Kun lesing; trygt å dele med eksport/UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedRun {
    cfg: HardeningConfig,
    stats: RunStats,
    raw: Vec<RunFix>,
    fixes: Vec<RunFix>,
    track: Vec<RunFix>,
}

impl FinishedRun {
    #[inline] pub fn config(&self) -> &HardeningConfig { &self.cfg }
    #[inline] pub fn stats(&self) -> &RunStats { &self.stats }
    #[inline] pub fn raw_fixes(&self) -> &[RunFix] { &self.raw }
    /// Aksepterte fixer, urørt av glatting.
    #[inline] pub fn fixes(&self) -> &[RunFix] { &self.fixes }
    #[inline] pub fn track(&self) -> &[RunFix] { &self.track }

    pub fn coach_score(&self) -> CoachScore {
        coach_score(&self.fixes, self.stats.dropped_fixes)
    }

    pub fn summary(&self) -> RunSummary {
        build_summary(&self.stats, &self.fixes)
    }

    pub fn summary_json(&self) -> Result<String> {
        self.summary().to_json()
    }

    /// Rutefil fra det glattede sporet.
    pub fn to_gpx(&self, name: &str) -> Result<String> {
        to_gpx(&self.track, name)
    }
}

/// Spill av en innspilt strøm i én operasjon. Start-tid: `started_at_ms`,
/// ellers første fix sin tid; sluttid: siste fix.
pub fn replay(cfg: HardeningConfig, fixes: &[RunFix], started_at_ms: Option<i64>) -> Result<FinishedRun> {
    let start = started_at_ms
        .or_else(|| fixes.first().map(|f| f.timestamp_ms))
        .unwrap_or(0);
    let mut session = RunSession::start(cfg, start)?;
    session.push_all(fixes.iter().copied());
    let end = fixes.last().map(|f| f.timestamp_ms).unwrap_or(start);
    Ok(session.finish(end))
}
