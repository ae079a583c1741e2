// core/src/geomath.rs
use geo::{Distance, Haversine, Point};

// --- RoundTo trait (offentlig, brukt av summary.rs) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Storsirkel-avstand i meter mellom to koordinater (grader).
/// Identiske koordinater gir eksakt 0.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    // geo bruker (x, y) = (lon, lat)
    let a = Point::new(lon1, lat1);
    let b = Point::new(lon2, lat2);
    Haversine::distance(a, b)
}

/// Eksponentiell glatting: alpha*raw + (1-alpha)*prev.
#[inline]
pub fn ema(prev_smoothed: f64, raw: f64, alpha: f64) -> f64 {
    alpha * raw + (1.0 - alpha) * prev_smoothed
}

/// Gyldig posisjon: endelige tall innenfor WGS84-grensene.
#[inline]
pub fn is_valid_coord(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}
