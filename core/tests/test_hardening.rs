use runpro_core::geomath::haversine_m;
use runpro_core::hardening::SPLIT_DISTANCE_M;
use runpro_core::{apply_fix, FixVerdict, HardeningConfig, HardeningState, RejectReason, RunFix};

const LAT0: f64 = 59.9139;
const LON0: f64 = 10.7522;

fn deg_per_m() -> f64 {
    1.0 / haversine_m(0.0, 0.0, 1.0, 0.0)
}

fn fix_at(north_m: f64, t_ms: i64, acc: f64) -> RunFix {
    RunFix::new(LAT0 + north_m * deg_per_m(), LON0, t_ms, acc)
}

/// Glisne fixer: ingen glatting, store hopp og lange hull er lov.
fn sparse_cfg() -> HardeningConfig {
    HardeningConfig {
        max_jump_m: 5_000.0,
        max_stale_ms: 1_000_000,
        smooth_alpha: 1.0,
        ..HardeningConfig::default()
    }
}

/// Jevn løping: 10 m hvert 3. sekund (300 s/km).
fn steady_run(n: usize) -> Vec<RunFix> {
    (0..n).map(|i| fix_at(i as f64 * 10.0, i as i64 * 3_000, 5.0)).collect()
}

#[test]
fn low_accuracy_fix_is_only_counted_as_dropped() {
    let cfg = HardeningConfig::default();
    let mut st = HardeningState::new(0);
    apply_fix(&mut st, &fix_at(0.0, 0, 5.0), &cfg);
    apply_fix(&mut st, &fix_at(10.0, 3_000, 5.0), &cfg);
    let before = st.stats().clone();

    let v = apply_fix(&mut st, &fix_at(20.0, 6_000, 50.0), &cfg);
    assert_eq!(v, FixVerdict::Rejected(RejectReason::Accuracy));
    assert_eq!(st.stats().dropped_fixes, before.dropped_fixes + 1);
    assert_eq!(st.stats().accepted_fixes, before.accepted_fixes);
    assert_eq!(st.stats().distance_m, before.distance_m);
    assert_eq!(st.stats().elapsed_ms, before.elapsed_ms);
}

#[test]
fn smoothed_position_is_undefined_until_first_accept() {
    let cfg = HardeningConfig::default();
    let mut st = HardeningState::new(0);
    assert!(st.smoothed().is_none());

    apply_fix(&mut st, &fix_at(0.0, 0, 80.0), &cfg);
    assert!(st.smoothed().is_none());
    assert_eq!(st.stats().distance_m, 0.0);

    apply_fix(&mut st, &fix_at(0.0, 1_000, 5.0), &cfg);
    assert!(st.smoothed().is_some());
    assert_eq!(st.stats().accepted_fixes, 1);
}

#[test]
fn one_kilometer_in_300_seconds_gives_one_split() {
    let cfg = sparse_cfg();
    let mut st = HardeningState::new(0);
    apply_fix(&mut st, &fix_at(0.0, 0, 5.0), &cfg);
    apply_fix(&mut st, &fix_at(1_001.0, 300_300, 5.0), &cfg);

    let splits = &st.stats().splits_sec_per_km;
    assert_eq!(splits.len(), 1);
    assert!((splits[0] - 300.0).abs() < 0.5, "split = {}", splits[0]);

    let pace = st.stats().pace_sec_per_km.expect("pace");
    assert!((pace - 300.0).abs() < 0.5);
    assert!((st.stats().speed_mps.expect("speed") - 1000.0 / 300.0).abs() < 0.01);
}

#[test]
fn sparse_segment_can_close_several_kilometers() {
    let cfg = sparse_cfg();
    let mut st = HardeningState::new(0);
    apply_fix(&mut st, &fix_at(0.0, 0, 5.0), &cfg);
    apply_fix(&mut st, &fix_at(2_500.0, 750_000, 5.0), &cfg);

    let splits = &st.stats().splits_sec_per_km;
    assert_eq!(splits.len(), 2);
    for s in splits {
        assert!((s - 300.0).abs() < 0.5, "split = {}", s);
    }
    assert!((st.bucket_distance_m() - 500.0).abs() < 1e-6);
    assert!((st.bucket_elapsed_ms() - 150_000.0).abs() < 1.0);
}

#[test]
fn stationary_fix_updates_time_but_not_distance() {
    let cfg = sparse_cfg();
    let mut st = HardeningState::new(0);
    apply_fix(&mut st, &fix_at(0.0, 0, 5.0), &cfg);
    let v = apply_fix(&mut st, &fix_at(0.0, 5_000, 5.0), &cfg);

    assert!(v.is_accepted());
    assert_eq!(st.stats().accepted_fixes, 2);
    assert_eq!(st.stats().elapsed_ms, 5_000);
    assert_eq!(st.stats().distance_m, 0.0);
    assert!(st.stats().splits_sec_per_km.is_empty());
    assert!(st.stats().pace_sec_per_km.is_none());
}

#[test]
fn pace_waits_for_ten_meters() {
    let cfg = sparse_cfg();
    let mut st = HardeningState::new(0);
    apply_fix(&mut st, &fix_at(0.0, 0, 5.0), &cfg);
    apply_fix(&mut st, &fix_at(4.0, 2_000, 5.0), &cfg);
    assert!(st.stats().pace_sec_per_km.is_none());

    apply_fix(&mut st, &fix_at(12.0, 4_000, 5.0), &cfg);
    assert!(st.stats().pace_sec_per_km.is_some());
}

#[test]
fn counters_and_totals_never_decrease() {
    let cfg = HardeningConfig { smooth_alpha: 1.0, ..HardeningConfig::default() };
    let mut st = HardeningState::new(0);

    let mut fixes = steady_run(400);
    // støy: dårlig nøyaktighet, teleport, duplikat, tilbake i tid
    fixes.insert(50, fix_at(500.0, 150_000, 60.0));
    fixes.insert(100, fix_at(9_000.0, 297_500, 5.0));
    let dup = fixes[149];
    fixes.insert(150, dup);
    fixes.insert(200, fix_at(20.0, 1, 5.0));

    let mut prev = st.stats().clone();
    for f in &fixes {
        apply_fix(&mut st, f, &cfg);
        let s = st.stats();
        assert!(s.distance_m >= prev.distance_m);
        assert!(s.elapsed_ms >= prev.elapsed_ms);
        assert!(s.accepted_fixes >= prev.accepted_fixes);
        assert!(s.dropped_fixes >= prev.dropped_fixes);
        assert!(s.splits_sec_per_km.len() >= prev.splits_sec_per_km.len());
        prev = s.clone();
    }

    assert_eq!(st.stats().total_fixes() as usize, fixes.len());
    assert_eq!(st.stats().dropped_fixes, 4);
    assert_eq!(st.stats().accepted_fixes, 400);
}

#[test]
fn split_bucket_does_not_leak_distance() {
    let cfg = sparse_cfg();
    let mut st = HardeningState::new(0);
    for f in steady_run(1_200) {
        apply_fix(&mut st, &f, &cfg);
    }

    let s = st.stats();
    assert!(s.splits_sec_per_km.len() >= 11);
    let accounted = s.splits_sec_per_km.len() as f64 * SPLIT_DISTANCE_M + st.bucket_distance_m();
    assert!(
        (accounted - s.distance_m).abs() < 1e-6,
        "accounted {} vs distance {}",
        accounted,
        s.distance_m
    );
    // jevn fart → hver split ≈ 300 s
    for split in &s.splits_sec_per_km[1..] {
        assert!((split - 300.0).abs() < 1.0, "split = {}", split);
    }
}

#[test]
#[should_panic]
fn invalid_alpha_fails_loudly() {
    let cfg = HardeningConfig { smooth_alpha: 0.0, ..HardeningConfig::default() };
    let mut st = HardeningState::new(0);
    apply_fix(&mut st, &fix_at(0.0, 0, 5.0), &cfg);
}

#[test]
fn extreme_timestamps_do_not_overflow() {
    let cfg = HardeningConfig::default();
    let mut st = HardeningState::new(i64::MAX);
    assert!(apply_fix(&mut st, &fix_at(0.0, i64::MIN + 1, 5.0), &cfg).is_accepted());
    assert_eq!(st.stats().elapsed_ms, i64::MIN);

    let v = apply_fix(&mut st, &fix_at(5.0, i64::MAX, 5.0), &cfg);
    assert_eq!(v, FixVerdict::Rejected(RejectReason::Stale));
    assert_eq!(st.stats().accepted_fixes, 1);
    assert_eq!(st.stats().dropped_fixes, 1);
}
