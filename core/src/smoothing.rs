use crate::geomath::ema;
use crate::models::{RunFix, SmoothedPosition};

/// EMA-glatting av lat/lon, uavhengig per akse.
/// Første aksepterte fix seedes direkte fra rådata (ingenting å glatte mot).
pub fn smooth_position(prev: Option<SmoothedPosition>, raw: &RunFix, alpha: f64) -> SmoothedPosition {
    match prev {
        None => SmoothedPosition { lat: raw.lat, lon: raw.lon },
        Some(p) => SmoothedPosition {
            lat: ema(p.lat, raw.lat, alpha),
            lon: ema(p.lon, raw.lon, alpha),
        },
    }
}

/// Glatt en hel serie fixer (f.eks. ved re-analyse av en lagret økt).
/// Alle andre felter beholdes uendret.
pub fn smooth_track(fixes: &[RunFix], alpha: f64) -> Vec<RunFix> {
    let mut out = Vec::with_capacity(fixes.len());
    let mut pos: Option<SmoothedPosition> = None;

    for f in fixes {
        let p = smooth_position(pos, f, alpha);
        pos = Some(p);
        out.push(RunFix { lat: p.lat, lon: p.lon, ..*f });
    }

    out
}
