use serde::{Deserialize, Serialize};

use crate::geomath::haversine_m;

/// Én GPS-fix slik plattformen leverer den. Uforanderlig etter opprettelse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFix {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
    #[serde(alias = "ts", alias = "timestamp_ms", alias = "t")]
    pub timestamp_ms: i64,
    #[serde(alias = "accuracy", alias = "accuracy_m")]
    pub accuracy_m: f64,
    #[serde(default, alias = "speed", alias = "speed_mps", skip_serializing_if = "Option::is_none")]
    pub speed_mps: Option<f64>,
    #[serde(default, alias = "heading", alias = "heading_deg", skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
    #[serde(default, alias = "altitude", alias = "altitude_m", skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
}

impl RunFix {
    pub fn new(lat: f64, lon: f64, timestamp_ms: i64, accuracy_m: f64) -> Self {
        Self {
            lat,
            lon,
            timestamp_ms,
            accuracy_m,
            speed_mps: None,
            heading_deg: None,
            altitude_m: None,
        }
    }

    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = Some(speed_mps);
        self
    }

    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = Some(altitude_m);
        self
    }

    /// Avstand (m) til en annen fix.
    #[inline]
    pub fn distance_to(&self, other: &RunFix) -> f64 {
        haversine_m(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Glattet posisjon; finnes først etter første aksepterte fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPosition {
    pub lat: f64,
    pub lon: f64,
}

/// Løpende statistikk for én økt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub started_at_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<i64>,
    pub elapsed_ms: i64,
    pub distance_m: f64,
    pub accepted_fixes: u32,
    pub dropped_fixes: u32,
    /// Snittpace (s/km) hittil i økta, ikke momentan.
    pub pace_sec_per_km: Option<f64>,
    pub speed_mps: Option<f64>,
    /// Ett element per fullført kilometer, kun append.
    pub splits_sec_per_km: Vec<f64>,
}

impl RunStats {
    pub fn new(started_at_ms: i64) -> Self {
        Self {
            started_at_ms,
            ..Default::default()
        }
    }

    /// Totalt antall fixer sendt inn til akkumulatoren.
    #[inline]
    pub fn total_fixes(&self) -> u32 {
        self.accepted_fixes + self.dropped_fixes
    }
}
