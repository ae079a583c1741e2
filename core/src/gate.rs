use crate::geomath::is_valid_coord;
use crate::models::RunFix;
use crate::types::{FixVerdict, HardeningConfig, RejectReason};

/// Kvalitetsport for én innkommende fix mot forrige *aksepterte* fix.
///
/// Reglene evalueres i rekkefølge, første som feiler vinner:
/// 1. `accuracy` – nøyaktighet over grensen (gjelder også første fix i økta)
/// 2. `stale`    – dt <= 0 (duplikat/bakover i tid) eller dt > max_stale_ms
/// 3. `jump`     – avstand over max_jump_m (anti-teleport)
/// 4. `speed`    – max(implisert fart, oppgitt fart) over max_speed_mps
///
/// Ren funksjon: ingen skjult tilstand utover de to fixene og konfigen.
pub fn assess_fix(prev: Option<&RunFix>, next: &RunFix, cfg: &HardeningConfig) -> FixVerdict {
    // NaN-nøyaktighet eller ubrukelig posisjon behandles som lav konfidens
    if !(next.accuracy_m <= cfg.max_accuracy_m) || !is_valid_coord(next.lat, next.lon) {
        return FixVerdict::Rejected(RejectReason::Accuracy);
    }

    let Some(prev) = prev else {
        return FixVerdict::Accepted;
    };

    let dt_ms = next.timestamp_ms.saturating_sub(prev.timestamp_ms);
    if dt_ms <= 0 || dt_ms > cfg.max_stale_ms {
        return FixVerdict::Rejected(RejectReason::Stale);
    }

    let d = prev.distance_to(next);
    if d > cfg.max_jump_m {
        return FixVerdict::Rejected(RejectReason::Jump);
    }

    let implied = d / (dt_ms as f64 / 1000.0);
    let declared = next.speed_mps.filter(|v| v.is_finite()).unwrap_or(0.0);
    if implied.max(declared) > cfg.max_speed_mps {
        return FixVerdict::Rejected(RejectReason::Speed);
    }

    FixVerdict::Accepted
}
