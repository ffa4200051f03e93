//! Stability-window detection on ratio columns.

use std::cmp::Ordering;
use std::fmt;

use qs_core::{QsError, Real, Time, s, seconds};
use qs_series::{AlignedEnergyFrame, Column, ColumnRef, Frame, WorkFrame};

use crate::error::{AnalysisError, AnalysisResult};
use crate::thresholds::{RET_EARLY_PCT, RET_LATE_PCT, RI_LOOSE_PCT, RI_STRICT_PCT};

/// When a condition became stable, or `Never`.
///
/// `Never` orders after every finite time, so `a < b` reads as "a happens
/// strictly before b" without an infinity sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StableTime {
    At(Time),
    Never,
}

impl StableTime {
    pub fn at_seconds(t: Real) -> Self {
        StableTime::At(s(t))
    }

    pub fn time(self) -> Option<Time> {
        match self {
            StableTime::At(t) => Some(t),
            StableTime::Never => None,
        }
    }

    pub fn seconds(self) -> Option<Real> {
        self.time().map(seconds)
    }

    pub fn is_never(self) -> bool {
        matches!(self, StableTime::Never)
    }
}

impl PartialOrd for StableTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (StableTime::At(a), StableTime::At(b)) => a.partial_cmp(b),
            (StableTime::At(_), StableTime::Never) => Some(Ordering::Less),
            (StableTime::Never, StableTime::At(_)) => Some(Ordering::Greater),
            (StableTime::Never, StableTime::Never) => Some(Ordering::Equal),
        }
    }
}

/// Threshold test on one ratio value. Undefined values never satisfy it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Below(Real),
    AtLeast(Real),
}

impl Condition {
    pub fn holds(self, value: Option<Real>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Condition::Below(limit), Some(v)) => v < limit,
            (Condition::AtLeast(limit), Some(v)) => v >= limit,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Below(limit) => write!(f, "< {limit}%"),
            Condition::AtLeast(limit) => write!(f, ">= {limit}%"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Earliest time from which the condition holds through the last row.
    StableUntilEnd,
    /// Time of the first row where the condition holds.
    FirstOccurrence,
}

/// Locate when `condition` on `column` becomes stable according to `mode`.
pub fn find_first_stable<F>(
    frame: &F,
    column: Column,
    condition: Condition,
    mode: ScanMode,
) -> AnalysisResult<StableTime>
where
    F: Frame + ?Sized,
{
    let values = frame
        .column(column)
        .ok_or(AnalysisError::MissingColumn { column })?;
    let times = frame.times();
    if values.len() != times.len() {
        return Err(QsError::LengthMismatch {
            what: "frame column vs time",
            left: values.len(),
            right: times.len(),
        }
        .into());
    }

    let found = match mode {
        ScanMode::StableUntilEnd => scan_backward(times, values, condition),
        ScanMode::FirstOccurrence => scan_forward(times, values, condition),
    };

    tracing::debug!(%column, %condition, ?mode, time_s = ?found.seconds(), "stability scan");
    Ok(found)
}

fn scan_backward(times: &[Real], values: ColumnRef<'_>, condition: Condition) -> StableTime {
    let Some(&first) = times.first() else {
        return StableTime::Never;
    };

    let last_false = (0..times.len())
        .rev()
        .find(|&i| !condition.holds(values.get(i)));

    match last_false {
        None => StableTime::at_seconds(first),
        Some(i) if i + 1 == times.len() => StableTime::Never,
        Some(i) => StableTime::at_seconds(times[i + 1]),
    }
}

fn scan_forward(times: &[Real], values: ColumnRef<'_>, condition: Condition) -> StableTime {
    (0..times.len())
        .find(|&i| condition.holds(values.get(i)))
        .map_or(StableTime::Never, |i| StableTime::at_seconds(times[i]))
}

/// The four threshold times the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalTimes {
    /// RI < 1% from here to the end.
    pub ri_below_strict: StableTime,
    /// RI < 5% from here to the end.
    pub ri_below_loose: StableTime,
    /// First RET >= 1%.
    pub ret_reaches_early: StableTime,
    /// First RET >= 5%.
    pub ret_reaches_late: StableTime,
}

pub fn find_critical_times(
    energy: &AlignedEnergyFrame,
    work: &WorkFrame,
) -> AnalysisResult<CriticalTimes> {
    Ok(CriticalTimes {
        ri_below_strict: find_first_stable(
            energy,
            Column::InertialRatio,
            Condition::Below(RI_STRICT_PCT),
            ScanMode::StableUntilEnd,
        )?,
        ri_below_loose: find_first_stable(
            energy,
            Column::InertialRatio,
            Condition::Below(RI_LOOSE_PCT),
            ScanMode::StableUntilEnd,
        )?,
        ret_reaches_early: find_first_stable(
            work,
            Column::WorkRatio,
            Condition::AtLeast(RET_EARLY_PCT),
            ScanMode::FirstOccurrence,
        )?,
        ret_reaches_late: find_first_stable(
            work,
            Column::WorkRatio,
            Condition::AtLeast(RET_LATE_PCT),
            ScanMode::FirstOccurrence,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qs_series::{TimeSeries, align, compute_ret, compute_ri};

    const TIMES: [Real; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];

    /// Values 0.0 (condition true) / 10.0 (false) under `Below(5)`.
    fn scan(flags: [bool; 5], mode: ScanMode) -> StableTime {
        let values: Vec<Real> = flags.iter().map(|&ok| if ok { 0.0 } else { 10.0 }).collect();
        let series =
            TimeSeries::from_samples("RI", TIMES.iter().copied().zip(values)).unwrap();
        find_first_stable(&series, Column::Value, Condition::Below(5.0), mode).unwrap()
    }

    #[test]
    fn backward_point_after_last_false() {
        let t = scan([true, true, false, true, true], ScanMode::StableUntilEnd);
        assert_eq!(t.seconds(), Some(3.0));
    }

    #[test]
    fn backward_all_true_is_first_time() {
        let t = scan([true; 5], ScanMode::StableUntilEnd);
        assert_eq!(t.seconds(), Some(0.0));
    }

    #[test]
    fn backward_false_at_end_is_never() {
        let t = scan([true, false, true, true, false], ScanMode::StableUntilEnd);
        assert!(t.is_never());
    }

    #[test]
    fn forward_first_true() {
        let t = scan([false, false, true, false, true], ScanMode::FirstOccurrence);
        assert_eq!(t.seconds(), Some(2.0));
    }

    #[test]
    fn forward_all_false_is_never() {
        let t = scan([false; 5], ScanMode::FirstOccurrence);
        assert_eq!(t, StableTime::Never);
    }

    #[test]
    fn empty_frame_is_never() {
        let series = TimeSeries::empty("RI");
        for mode in [ScanMode::StableUntilEnd, ScanMode::FirstOccurrence] {
            let t = find_first_stable(&series, Column::Value, Condition::Below(5.0), mode);
            assert_eq!(t, Ok(StableTime::Never));
        }
    }

    #[test]
    fn undefined_values_fail_the_condition() {
        assert!(!Condition::Below(5.0).holds(None));
        assert!(!Condition::AtLeast(-1.0).holds(None));
        assert!(Condition::AtLeast(1.0).holds(Some(1.0)));
        assert!(!Condition::Below(1.0).holds(Some(1.0)));
    }

    #[test]
    fn undefined_ri_at_end_is_never_stable() {
        let ke = TimeSeries::from_samples("ALLKE", [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
        let ie = TimeSeries::from_samples("ALLIE", [(0.0, 10.0), (1.0, 10.0), (2.0, 0.0)]).unwrap();
        let energy = compute_ri(align(&ke, &ie));
        let t = find_first_stable(
            &energy,
            Column::InertialRatio,
            Condition::Below(5.0),
            ScanMode::StableUntilEnd,
        )
        .unwrap();
        assert!(t.is_never());
    }

    #[test]
    fn missing_column_is_an_error() {
        let ke = TimeSeries::from_samples("ALLKE", [(0.0, 1.0)]).unwrap();
        let energy = align(&ke, &ke);
        let err = find_first_stable(
            &energy,
            Column::InertialRatio,
            Condition::Below(5.0),
            ScanMode::StableUntilEnd,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MissingColumn {
                column: Column::InertialRatio
            }
        );
    }

    #[test]
    fn never_orders_after_every_time() {
        let early = StableTime::at_seconds(1.0);
        let late = StableTime::at_seconds(1e300);
        assert!(early < late);
        assert!(late < StableTime::Never);
        assert!(!(StableTime::Never < StableTime::Never));
        assert!(!(early < early));
    }

    #[test]
    fn critical_times_from_frames() {
        let ke = TimeSeries::from_samples(
            "ALLKE",
            [(0.0, 10.0), (1.0, 3.0), (2.0, 0.5), (3.0, 0.5), (4.0, 0.5)],
        )
        .unwrap();
        let ie = TimeSeries::from_samples("ALLIE", (0..5).map(|i| (i as Real, 100.0))).unwrap();
        let wk = TimeSeries::from_samples(
            "ALLWK",
            [(0.0, 0.0), (1.0, 0.5), (2.0, 2.0), (3.0, 10.0), (4.0, 100.0)],
        )
        .unwrap();

        let energy = compute_ri(align(&ke, &ie));
        let work = compute_ret(&wk);
        let times = find_critical_times(&energy, &work).unwrap();

        assert_eq!(times.ri_below_strict.seconds(), Some(2.0));
        assert_eq!(times.ri_below_loose.seconds(), Some(1.0));
        assert_eq!(times.ret_reaches_early.seconds(), Some(2.0));
        assert_eq!(times.ret_reaches_late.seconds(), Some(3.0));
    }
}
