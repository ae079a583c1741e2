// core/src/hardening.rs
use serde::{Deserialize, Serialize};

use crate::gate::assess_fix;
use crate::models::{RunFix, RunStats, SmoothedPosition};
use crate::smoothing::smooth_position;
use crate::types::{FixVerdict, HardeningConfig};

/// Under denne totaldistansen regnes ikke pace/fart (unngår deling på ~0).
pub const MIN_PACE_DISTANCE_M: f64 = 10.0;
/// Lengde på én split.
pub const SPLIT_DISTANCE_M: f64 = 1000.0;

/// Muterbar akkumulator for én økt. Eies av aktiv økt, én skriver om gangen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardeningState {
    smoothed: Option<SmoothedPosition>,
    /// Forrige aksepterte fix (glattet).
    last_fix: Option<RunFix>,
    // km-bøtte for splits
    bucket_distance_m: f64,
    bucket_elapsed_ms: f64,
    stats: RunStats,
}

impl HardeningState {
    pub fn new(started_at_ms: i64) -> Self {
        Self {
            smoothed: None,
            last_fix: None,
            bucket_distance_m: 0.0,
            bucket_elapsed_ms: 0.0,
            stats: RunStats::new(started_at_ms),
        }
    }

    #[inline] pub fn stats(&self) -> &RunStats { &self.stats }
    #[inline] pub fn smoothed(&self) -> Option<SmoothedPosition> { self.smoothed }
    #[inline] pub fn last_fix(&self) -> Option<&RunFix> { self.last_fix.as_ref() }
    #[inline] pub fn bucket_distance_m(&self) -> f64 { self.bucket_distance_m }
    #[inline] pub fn bucket_elapsed_ms(&self) -> f64 { self.bucket_elapsed_ms }

    pub(crate) fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }
}

/// Kjør én rå fix gjennom port → glatting → akkumulator.
///
/// Avviste fixer teller kun i `dropped_fixes`; de rører aldri posisjon,
/// distanse eller splits.
///
/// # Panics
/// Hvis `cfg` bryter konfig-invariantene (se [`HardeningConfig::validate`]).
pub fn apply_fix(state: &mut HardeningState, raw: &RunFix, cfg: &HardeningConfig) -> FixVerdict {
    if let Err(e) = cfg.validate() {
        panic!("apply_fix called with {e}");
    }

    let prev = state.last_fix;
    let verdict = assess_fix(prev.as_ref(), raw, cfg);
    if !verdict.is_accepted() {
        state.stats.dropped_fixes += 1;
        return verdict;
    }

    // 1) glatting
    let pos = smooth_position(state.smoothed, raw, cfg.smooth_alpha);
    state.smoothed = Some(pos);
    let fix = RunFix { lat: pos.lat, lon: pos.lon, ..*raw };

    // 2) tid
    state.stats.elapsed_ms = fix.timestamp_ms.saturating_sub(state.stats.started_at_ms);

    // 3) distanse + snittpace
    if let Some(prev) = prev {
        let d = prev.distance_to(&fix);
        if d.is_finite() && d > 0.0 {
            state.stats.distance_m += d;

            let sec = state.stats.elapsed_ms as f64 / 1000.0;
            if state.stats.distance_m > MIN_PACE_DISTANCE_M && sec > 0.0 {
                state.stats.pace_sec_per_km = Some(sec / (state.stats.distance_m / 1000.0));
                state.stats.speed_mps = Some(state.stats.distance_m / sec);
            }

            // 4) km-bøtte
            let dt_ms = fix.timestamp_ms.saturating_sub(prev.timestamp_ms) as f64;
            state.bucket_distance_m += d;
            state.bucket_elapsed_ms += dt_ms;
            advance_splits(state);
        }
    }

    state.stats.accepted_fixes += 1;
    state.last_fix = Some(fix);
    verdict
}

/// Lukk alle hele kilometer i bøtta. Kan gi flere splits per fix når fixene er glisne.
///
/// Tiden for km-en interpoleres lineært (jevn fart innen segmentet som krysser grensen).
/// Resttiden skaleres ned med samme andel som distansen som ble trukket ut.
/// NB: tilnærming – ikke eksakt når ett segment spenner flere km med varierende fart.
/// Endres ikke, historiske splits avhenger av den.
fn advance_splits(state: &mut HardeningState) {
    while state.bucket_distance_m >= SPLIT_DISTANCE_M {
        let split_sec =
            (state.bucket_elapsed_ms / 1000.0) * (SPLIT_DISTANCE_M / state.bucket_distance_m);
        state.stats.splits_sec_per_km.push(split_sec);

        state.bucket_distance_m -= SPLIT_DISTANCE_M;
        let keep = state.bucket_distance_m / (state.bucket_distance_m + SPLIT_DISTANCE_M);
        state.bucket_elapsed_ms = (state.bucket_elapsed_ms * keep).max(0.0);
    }
}
