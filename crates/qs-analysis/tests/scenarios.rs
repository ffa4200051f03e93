//! Integration test: synthetic energy histories through detection and grading.
//!
//! Histories are sampled once per second over 0..=100 s with constant internal
//! energy, so RI is simply `ke` in percent of 100.

use qs_analysis::{Grade, StableTime, classify, find_critical_times};
use qs_core::{Real, s};
use qs_series::{TimeSeries, align, compute_ret, compute_ri};

const T_END: usize = 100;

fn history(name: &str, f: impl Fn(Real) -> Real) -> TimeSeries {
    TimeSeries::from_samples(name, (0..=T_END).map(|i| (i as Real, f(i as Real)))).unwrap()
}

fn grade_run(ri_pct: impl Fn(Real) -> Real, work: impl Fn(Real) -> Real) -> qs_analysis::Verdict {
    let ke = history("ALLKE", ri_pct);
    let ie = history("ALLIE", |_| 100.0);
    let wk = history("ALLWK", work);

    let energy = compute_ri(align(&ke, &ie));
    let work = compute_ret(&wk);
    let times = find_critical_times(&energy, &work).unwrap();
    let total = energy.total_duration().unwrap();
    classify(&times, s(total))
}

/// Work ramps so that RET hits 1% at t=5 and 5% at t=20, reaching 100% at the end.
fn staged_work(t: Real) -> Real {
    if t < 5.0 {
        0.0
    } else if t < 20.0 {
        1.0
    } else {
        5.0 + (t - 20.0) * 95.0 / 80.0
    }
}

#[test]
fn ri_settling_at_ten_with_staged_work() {
    let v = grade_run(|t| if t < 10.0 { 20.0 } else { 3.0 }, staged_work);
    let fraction = v.stable_fraction.unwrap();
    assert!((fraction - 90.0).abs() < 1e-9);
    // RI < 5% settles at 10 s, after RET 1% (5 s) but before RET 5% (20 s).
    assert_eq!(v.grade, Grade::Acceptable);
    assert!(v.rationale.contains("10.000 s"));
}

#[test]
fn ri_settling_before_any_work_is_good() {
    let v = grade_run(|t| if t < 3.0 { 20.0 } else { 3.0 }, staged_work);
    assert_eq!(v.grade, Grade::Good);
    assert!(v.rationale.contains("3.000 s"));
}

#[test]
fn ri_below_one_early_is_perfect() {
    let v = grade_run(|t| if t < 2.0 { 20.0 } else { 0.5 }, staged_work);
    assert_eq!(v.grade, Grade::Perfect);
    assert_eq!(v.cited_time, None);
}

#[test]
fn ri_never_below_five_is_never_quasi_static() {
    let v = grade_run(|_| 7.5, staged_work);
    assert_eq!(v.grade, Grade::NeverQuasiStatic);
    assert_eq!(v.stable_fraction, None);
}

#[test]
fn late_spike_resets_stability() {
    // Below 5% for most of the run, then a burst near the end.
    let v = grade_run(|t| if (80.0..85.0).contains(&t) { 12.0 } else { 1.5 }, staged_work);
    assert_eq!(v.grade, Grade::InsufficientStableDuration);
    let fraction = v.stable_fraction.unwrap();
    assert!((fraction - 15.0).abs() < 1e-9);
}

#[test]
fn zero_final_work_leaves_ret_flat() {
    let ke = history("ALLKE", |_| 0.5);
    let ie = history("ALLIE", |_| 100.0);
    let wk = history("ALLWK", |t| if t < 50.0 { t } else { 0.0 });

    let energy = compute_ri(align(&ke, &ie));
    let work = compute_ret(&wk);
    let times = find_critical_times(&energy, &work).unwrap();
    assert_eq!(times.ret_reaches_early, StableTime::Never);
    assert_eq!(times.ret_reaches_late, StableTime::Never);

    let v = classify(&times, s(100.0));
    assert_eq!(v.grade, Grade::Perfect);
}
