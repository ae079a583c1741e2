use serde::{Deserialize, Serialize};

use crate::models::RunFix;
use crate::types::SignalGrade;

/// Korteste segment (ms) som gir en brukbar pace.
pub const MIN_SEGMENT_DT_MS: i64 = 800;
/// Fysisk rimelig pace-vindu (s/km).
pub const MIN_SEGMENT_PACE: f64 = 150.0;
pub const MAX_SEGMENT_PACE: f64 = 1200.0;
/// Under dette antallet segmenter kan ikke variasjon estimeres.
pub const MIN_PACE_SEGMENTS: usize = 4;

/// Under denne farten regnes segmentet som pause.
pub const PAUSE_SPEED_MPS: f64 = 0.6;
/// En sammenhengende pause teller først etter så lang tid.
pub const MIN_PAUSE_MS: i64 = 12_000;

/// Pace (s/km) per segment mellom påfølgende fixer.
/// Segmenter med dt < 800 ms, d == 0 eller pace utenfor [150, 1200] forkastes.
pub fn segment_paces(fixes: &[RunFix]) -> Vec<f64> {
    let mut out = Vec::with_capacity(fixes.len().saturating_sub(1));
    for w in fixes.windows(2) {
        let dt_ms = w[1].timestamp_ms.saturating_sub(w[0].timestamp_ms);
        if dt_ms < MIN_SEGMENT_DT_MS {
            continue;
        }
        let d = w[0].distance_to(&w[1]);
        if !d.is_finite() || d <= 0.0 {
            continue;
        }
        let pace = (dt_ms as f64 / 1000.0) / (d / 1000.0);
        if (MIN_SEGMENT_PACE..=MAX_SEGMENT_PACE).contains(&pace) {
            out.push(pace);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceStats {
    pub mean: f64,
    /// Populasjons-standardavvik
    pub sd: f64,
    /// Variasjonskoeffisient sd/mean
    pub cv: f64,
    pub n: usize,
}

/// Snitt, standardavvik og CV. `None` med for få verdier.
pub fn pace_stats(paces: &[f64]) -> Option<PaceStats> {
    if paces.len() < MIN_PACE_SEGMENTS {
        return None;
    }
    let n = paces.len() as f64;
    let mean = paces.iter().sum::<f64>() / n;
    if !(mean > 0.0) {
        return None;
    }
    let var = paces.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
    let sd = var.sqrt();
    Some(PaceStats { mean, sd, cv: sd / mean, n: paces.len() })
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PauseInfo {
    pub count: u32,
    pub paused_ms: i64,
    /// Tid i segmenter over pausefarten
    pub moving_ms: i64,
}

impl PauseInfo {
    #[inline]
    pub fn paused_minutes(&self) -> f64 {
        self.paused_ms as f64 / 60_000.0
    }
}

/// Pausedeteksjon: segmenter med fart < 0.6 m/s summeres som pausetid, resten som
/// bevegelsestid; en sammenhengende strekning på minst 12 s teller som én pause.
pub fn detect_pauses(fixes: &[RunFix]) -> PauseInfo {
    let mut info = PauseInfo::default();
    let mut current_ms = 0i64;

    for w in fixes.windows(2) {
        let dt_ms = w[1].timestamp_ms.saturating_sub(w[0].timestamp_ms);
        if dt_ms <= 0 {
            continue;
        }
        let d = w[0].distance_to(&w[1]);
        let speed = d / (dt_ms as f64 / 1000.0);

        if speed < PAUSE_SPEED_MPS {
            info.paused_ms = info.paused_ms.saturating_add(dt_ms);
            current_ms = current_ms.saturating_add(dt_ms);
        } else {
            info.moving_ms = info.moving_ms.saturating_add(dt_ms);
            if current_ms >= MIN_PAUSE_MS {
                info.count += 1;
            }
            current_ms = 0;
        }
    }
    if current_ms >= MIN_PAUSE_MS {
        info.count += 1;
    }

    info
}

/// Snitt-nøyaktighet (m) over fixene.
pub fn avg_accuracy(fixes: &[RunFix]) -> Option<f64> {
    let mut sum = 0.0;
    let mut cnt = 0usize;
    for f in fixes {
        if f.accuracy_m.is_finite() {
            sum += f.accuracy_m;
            cnt += 1;
        }
    }
    if cnt == 0 { None } else { Some(sum / cnt as f64) }
}

/// Signalkarakter fra snitt-nøyaktighet, degradert av andel droppede fixer.
pub fn signal_grade(fixes: &[RunFix], dropped_fixes: u32) -> SignalGrade {
    let by_accuracy = match avg_accuracy(fixes) {
        Some(a) if a <= 15.0 => SignalGrade::A,
        Some(a) if a <= 30.0 => SignalGrade::B,
        _ => SignalGrade::C,
    };

    let total = fixes.len() as f64 + dropped_fixes as f64;
    let drop_ratio = if total > 0.0 { dropped_fixes as f64 / total } else { 0.0 };
    let by_drops = if drop_ratio >= 0.25 {
        SignalGrade::C
    } else if drop_ratio >= 0.10 {
        SignalGrade::B
    } else {
        SignalGrade::A
    };

    by_accuracy.max(by_drops)
}
