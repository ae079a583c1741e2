use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RunProError};

/// Terskler for kvalitetsporten + glatting. Settes ved start av økt, endres aldri.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HardeningConfig {
    #[serde(alias = "max_accuracy_m")]
    pub max_accuracy_m: f64, // typ 25 m (løping)
    #[serde(alias = "max_speed_mps")]
    pub max_speed_mps: f64,  // typ 9 m/s ≈ 32 km/t
    #[serde(alias = "max_jump_m")]
    pub max_jump_m: f64,     // anti-teleport
    #[serde(alias = "max_stale_ms")]
    pub max_stale_ms: i64,   // lengste lovlige hull mellom fixer
    #[serde(alias = "smooth_alpha")]
    pub smooth_alpha: f64,   // (0, 1]
}

impl Default for HardeningConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: 25.0,
            max_speed_mps: 9.0,
            max_jump_m: 120.0,
            max_stale_ms: 12_000,
            smooth_alpha: 0.22,
        }
    }
}

impl HardeningConfig {
    /// Sjekker konfig-invariantene. Brudd her er en programmeringsfeil, ikke støy i data.
    pub fn validate(&self) -> Result<()> {
        if !(self.smooth_alpha.is_finite() && self.smooth_alpha > 0.0 && self.smooth_alpha <= 1.0) {
            return Err(RunProError::InvalidConfig(format!(
                "smooth_alpha must be in (0, 1], got {}",
                self.smooth_alpha
            )));
        }
        let thresholds = [
            ("max_accuracy_m", self.max_accuracy_m),
            ("max_speed_mps", self.max_speed_mps),
            ("max_jump_m", self.max_jump_m),
        ];
        for (name, v) in thresholds {
            if !v.is_finite() || v <= 0.0 {
                return Err(RunProError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {v}"
                )));
            }
        }
        if self.max_stale_ms <= 0 {
            return Err(RunProError::InvalidConfig(format!(
                "max_stale_ms must be positive, got {}",
                self.max_stale_ms
            )));
        }
        Ok(())
    }
}

/// Hvorfor en fix ble avvist. Første regel som feiler vinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectReason {
    Accuracy,
    Stale,
    Jump,
    Speed,
}

impl RejectReason {
    pub const ALL: [RejectReason; 4] = [
        RejectReason::Accuracy,
        RejectReason::Stale,
        RejectReason::Jump,
        RejectReason::Speed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Accuracy => "accuracy",
            RejectReason::Stale => "stale",
            RejectReason::Jump => "jump",
            RejectReason::Speed => "speed",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resultat fra kvalitetsporten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixVerdict {
    Accepted,
    Rejected(RejectReason),
}

impl FixVerdict {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, FixVerdict::Accepted)
    }

    #[inline]
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            FixVerdict::Accepted => None,
            FixVerdict::Rejected(r) => Some(*r),
        }
    }
}

/// GPS-signalkarakter: A (godt), B (ok), C (svakt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalGrade {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachLabel {
    Elite,
    Bom,
    #[serde(rename = "Instável")]
    Instavel,
}

impl CoachLabel {
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            CoachLabel::Elite
        } else if score >= 65 {
            CoachLabel::Bom
        } else {
            CoachLabel::Instavel
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoachLabel::Elite => "Elite",
            CoachLabel::Bom => "Bom",
            CoachLabel::Instavel => "Instável",
        }
    }
}

impl fmt::Display for CoachLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachScore {
    pub score: u8,
    pub label: CoachLabel,
    /// 2–3 korte innsikter: konsistens, signal, pauser.
    pub reasons: Vec<String>,
    /// false når det er for få segmenter til å vurdere variasjon.
    pub sufficient_data: bool,
}

/// Portabelt sammendrag for eksport (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// ISO-8601 (UTC)
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub distance_km: f64,
    pub elapsed_sec: f64,
    /// `None` før første segment i bevegelse.
    pub moving_time_sec: Option<f64>,
    pub paused_time_sec: f64,
    pub pauses_count: u32,
    pub avg_pace_sec_per_km: Option<f64>,
    pub best_split_sec: Option<f64>,
    pub worst_split_sec: Option<f64>,
    pub splits_sec_per_km: Vec<f64>,
    /// Standardavvik av segment-pace (s/km).
    pub stability_sec: Option<f64>,
    pub signal_grade: SignalGrade,
    pub accepted_fixes: u32,
    pub dropped_fixes: u32,
    pub coach: CoachScore,
}
