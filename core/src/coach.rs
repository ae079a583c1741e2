use crate::metrics::{detect_pauses, pace_stats, segment_paces, signal_grade, PaceStats, PauseInfo};
use crate::models::RunFix;
use crate::types::{CoachLabel, CoachScore, SignalGrade};

/// Fast straff når variasjon ikke kan estimeres.
pub const INSUFFICIENT_DATA_PENALTY: f64 = 20.0;

const REASON_NO_DATA: &str = "Dados insuficientes para avaliar o ritmo.";

/// Konsistens – ~0 straff under 6 % CV, stiger lineært, tak på 35.
pub fn penalty_consistency(cv: f64) -> f64 {
    if !cv.is_finite() { return 35.0; }
    ((cv - 0.06) * 220.0).max(0.0).min(35.0)
}

/// Signal – A/B/C = 0/8/18.
pub fn penalty_signal(grade: SignalGrade) -> f64 {
    match grade {
        SignalGrade::A => 0.0,
        SignalGrade::B => 8.0,
        SignalGrade::C => 18.0,
    }
}

/// Pauser – antall (maks 20) + minutter stillestående (maks 15).
pub fn penalty_pauses(pauses: &PauseInfo) -> f64 {
    let by_count = (pauses.count as f64 * 5.0).min(20.0);
    let by_minutes = (pauses.paused_minutes() * 1.2).min(15.0);
    by_count + by_minutes
}

/// Kombiner til 0–100, avrundet.
pub fn combine_score(consistency: f64, signal: f64, pauses: f64) -> u8 {
    let raw = 100.0 - consistency - signal - pauses;
    raw.clamp(0.0, 100.0).round() as u8
}

fn consistency_reason(stats: Option<&PaceStats>) -> &'static str {
    match stats {
        None => REASON_NO_DATA,
        Some(s) if s.cv < 0.06 => "Ritmo muito estável.",
        Some(s) if s.cv < 0.12 => "Boa consistência de ritmo.",
        Some(_) => "Ritmo oscilando, tente manter constância.",
    }
}

fn signal_reason(grade: SignalGrade) -> &'static str {
    match grade {
        SignalGrade::A => "Sinal GPS estável.",
        SignalGrade::B => "Sinal GPS razoável, algumas leituras descartadas.",
        SignalGrade::C => "Sinal GPS oscilou, evite áreas fechadas/sombra.",
    }
}

fn pause_reason(pauses: &PauseInfo) -> Option<String> {
    match pauses.count {
        0 => None,
        1 => Some("1 pausa detectada, tente blocos contínuos.".to_string()),
        n => Some(format!("{n} pausas detectadas, tente blocos contínuos.")),
    }
}

/// Coach score fra historikken av aksepterte fixer.
///
/// Tilstandsløs og idempotent: regnes på nytt ved behov fordi formelen
/// bruker fordelingsstatistikk over hele økta.
pub fn coach_score(fixes: &[RunFix], dropped_fixes: u32) -> CoachScore {
    let paces = segment_paces(fixes);
    let stats = pace_stats(&paces);
    let grade = signal_grade(fixes, dropped_fixes);
    let pauses = detect_pauses(fixes);

    let p_cons = match &stats {
        Some(s) => penalty_consistency(s.cv),
        None => INSUFFICIENT_DATA_PENALTY,
    };
    let score = combine_score(p_cons, penalty_signal(grade), penalty_pauses(&pauses));

    // rekkefølge: konsistens, signal, pauser
    let mut reasons = vec![
        consistency_reason(stats.as_ref()).to_string(),
        signal_reason(grade).to_string(),
    ];
    if let Some(r) = pause_reason(&pauses) {
        reasons.push(r);
    }

    CoachScore {
        score,
        label: CoachLabel::from_score(score),
        reasons,
        sufficient_data: stats.is_some(),
    }
}
