use geo::Point;
use gpx::{Gpx, GpxVersion, Metadata, Track, TrackSegment, Waypoint};
use time::OffsetDateTime;

use crate::error::Result;
use crate::models::RunFix;

/// Epoch ms → `gpx::Time`. `None` utenfor gyldig område.
pub fn gpx_time(ts_ms: i64) -> Option<gpx::Time> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ts_ms) * 1_000_000)
        .ok()
        .map(gpx::Time::from)
}

fn waypoint(f: &RunFix) -> Waypoint {
    // geo bruker (x, y) = (lon, lat)
    let mut wp = Waypoint::new(Point::new(f.lon, f.lat));
    wp.elevation = f.altitude_m.filter(|a| a.is_finite());
    wp.time = gpx_time(f.timestamp_ms);
    wp
}

/// Ett spor med ett segment, ett punkt per fix.
pub fn build_route(fixes: &[RunFix], name: &str) -> Gpx {
    let mut segment = TrackSegment::new();
    segment.points = fixes.iter().map(waypoint).collect();

    let mut track = Track::new();
    track.name = Some(name.to_string());
    track.segments.push(segment);

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("RunPro".to_string()),
        metadata: Some(Metadata {
            name: Some(name.to_string()),
            time: fixes.first().and_then(|f| gpx_time(f.timestamp_ms)),
            ..Default::default()
        }),
        tracks: vec![track],
        ..Default::default()
    }
}

/// GPX 1.1 rutefil som tekst.
pub fn to_gpx(fixes: &[RunFix], name: &str) -> Result<String> {
    let mut buf = Vec::new();
    gpx::write(&build_route(fixes, name), &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}
