use std::fs;
use std::path::PathBuf;

use runpro_core::storage::{load_config, load_fixes, save_gpx, save_summary};
use runpro_core::{replay, HardeningConfig};

fn tmp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("runpro_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tmp_dir("missing_cfg");
    let cfg = load_config(&dir.join("nope.json")).unwrap();
    assert_eq!(cfg, HardeningConfig::default());
}

#[test]
fn partial_config_keeps_other_defaults() {
    let dir = tmp_dir("partial_cfg");
    let path = dir.join("config.json");
    fs::write(&path, r#"{"maxAccuracyM": 15.0, "smooth_alpha": 0.5}"#).unwrap();

    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.max_accuracy_m, 15.0);
    assert_eq!(cfg.smooth_alpha, 0.5);
    assert_eq!(cfg.max_speed_mps, 9.0);
    assert_eq!(cfg.max_stale_ms, 12_000);
}

#[test]
fn fixes_load_by_extension_and_export_round_trip() {
    let dir = tmp_dir("export");
    let csv_path = dir.join("run.csv");
    let mut csv = String::from("lat,lon,timestampMs,accuracyM\n");
    for i in 0..30 {
        csv.push_str(&format!("{:.7},10.7522,{},5.0\n", 59.9139 + i as f64 * 0.00009, i * 3_000));
    }
    fs::write(&csv_path, csv).unwrap();

    let fixes = load_fixes(&csv_path).unwrap();
    assert_eq!(fixes.len(), 30);

    let run = replay(HardeningConfig::default(), &fixes, None).unwrap();
    let summary_path = dir.join("summary.json");
    save_summary(&run.summary(), &summary_path).unwrap();
    let written = fs::read_to_string(&summary_path).unwrap();
    assert!(written.contains("\"distanceKm\""));
    assert!(written.contains("\"coach\""));

    let gpx_path = dir.join("run.gpx");
    save_gpx(&run.to_gpx("test").unwrap(), &gpx_path).unwrap();
    let route = gpx::read(fs::File::open(&gpx_path).unwrap()).unwrap();
    assert_eq!(route.tracks[0].segments[0].points.len(), run.track().len());

    let json_path = dir.join("run.json");
    fs::write(&json_path, r#"[{"lat": 1.0, "lon": 2.0, "ts": 5, "accuracy": 3.0}]"#).unwrap();
    assert_eq!(load_fixes(&json_path).unwrap().len(), 1);

    let _ = fs::remove_dir_all(&dir);
}
