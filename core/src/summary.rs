use chrono::{DateTime, SecondsFormat, Utc};
use ordered_float::OrderedFloat;

use crate::coach::coach_score;
use crate::error::Result;
use crate::geomath::RoundTo;
use crate::metrics::{detect_pauses, pace_stats, segment_paces, signal_grade};
use crate::models::{RunFix, RunStats};
use crate::types::RunSummary;

fn best_split(splits: &[f64]) -> Option<f64> {
    splits.iter().copied().map(OrderedFloat).min().map(|x| x.0)
}

fn worst_split(splits: &[f64]) -> Option<f64> {
    splits.iter().copied().map(OrderedFloat).max().map(|x| x.0)
}

/// Epoch ms → ISO-8601 (UTC, millisekunder). `None` utenfor chrono sitt område.
pub fn iso_time(ts_ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ts_ms)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Bygg eksport-sammendrag fra frosne stats + aksepterte rå-fixer.
/// Enveis lesing; skriver aldri tilbake til akkumulatoren.
pub fn build_summary(stats: &RunStats, fixes: &[RunFix]) -> RunSummary {
    let paces = segment_paces(fixes);
    let stability = pace_stats(&paces).map(|s| s.sd.round_to(1));
    let pauses = detect_pauses(fixes);

    RunSummary {
        started_at: iso_time(stats.started_at_ms),
        ended_at: stats.ended_at_ms.and_then(iso_time),
        distance_km: (stats.distance_m / 1000.0).round_to(3),
        elapsed_sec: (stats.elapsed_ms.max(0) as f64 / 1000.0).round_to(1),
        moving_time_sec: (pauses.moving_ms > 0).then(|| (pauses.moving_ms as f64 / 1000.0).round_to(1)),
        paused_time_sec: (pauses.paused_ms as f64 / 1000.0).round_to(1),
        pauses_count: pauses.count,
        avg_pace_sec_per_km: stats.pace_sec_per_km.map(|p| p.round_to(1)),
        best_split_sec: best_split(&stats.splits_sec_per_km).map(|s| s.round_to(1)),
        worst_split_sec: worst_split(&stats.splits_sec_per_km).map(|s| s.round_to(1)),
        splits_sec_per_km: stats.splits_sec_per_km.iter().map(|s| s.round_to(1)).collect(),
        stability_sec: stability,
        signal_grade: signal_grade(fixes, stats.dropped_fixes),
        accepted_fixes: stats.accepted_fixes,
        dropped_fixes: stats.dropped_fixes,
        coach: coach_score(fixes, stats.dropped_fixes),
    }
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// mm:ss for visning av pace/split.
pub fn fmt_mmss(sec: f64) -> String {
    if !sec.is_finite() {
        return "--:--".to_string();
    }
    let s = sec.max(0.0).round() as u64;
    format!("{}:{:02}", s / 60, s % 60)
}
