//! Dimensionless ratio columns: inertial ratio (RI) and work evolution (RET).

use qs_core::Real;

use crate::align::AlignedEnergyFrame;
use crate::frame::{Column, ColumnRef, Frame};
use crate::series::TimeSeries;

/// Denominators at or below this magnitude are not divided by.
pub const DENOMINATOR_EPSILON: Real = 1e-9;

/// `KE / IE * 100`, undefined when `IE` does not exceed [`DENOMINATOR_EPSILON`].
pub fn inertial_ratio(kinetic: Real, internal: Real) -> Option<Real> {
    if internal > DENOMINATOR_EPSILON {
        Some(kinetic / internal * 100.0)
    } else {
        None
    }
}

/// Fill the RI column of an aligned frame.
pub fn compute_ri(mut frame: AlignedEnergyFrame) -> AlignedEnergyFrame {
    let ri: Vec<Option<Real>> = frame
        .kinetic
        .iter()
        .zip(&frame.internal)
        .map(|(&ke, &ie)| inertial_ratio(ke, ie))
        .collect();

    let undefined = ri.iter().filter(|v| v.is_none()).count();
    if undefined > 0 {
        tracing::debug!(undefined, rows = ri.len(), "RI undefined where IE is near zero");
    }

    frame.inertial_ratio = Some(ri);
    frame
}

/// External work with its evolution ratio against the final value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkFrame {
    time: Vec<Real>,
    work: Vec<Real>,
    work_ratio: Vec<Real>,
    final_work: Real,
}

impl WorkFrame {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn times(&self) -> &[Real] {
        &self.time
    }

    pub fn work(&self) -> &[Real] {
        &self.work
    }

    /// RET per row, percent.
    pub fn work_ratio(&self) -> &[Real] {
        &self.work_ratio
    }

    /// WK at the latest time point (0 for an empty series).
    pub fn final_work(&self) -> Real {
        self.final_work
    }
}

impl Frame for WorkFrame {
    fn times(&self) -> &[Real] {
        &self.time
    }

    fn column(&self, column: Column) -> Option<ColumnRef<'_>> {
        match column {
            Column::ExternalWork => Some(ColumnRef::Dense(&self.work)),
            Column::WorkRatio => Some(ColumnRef::Dense(&self.work_ratio)),
            _ => None,
        }
    }
}

/// Normalize a work series against its final value.
///
/// A final value within [`DENOMINATOR_EPSILON`] of zero means no meaningful
/// work was accumulated; RET is then 0 everywhere.
pub fn compute_ret(work: &TimeSeries) -> WorkFrame {
    let final_work = work.last_value().unwrap_or(0.0);

    let work_ratio = if final_work.abs() < DENOMINATOR_EPSILON {
        if !work.is_empty() {
            tracing::debug!(final_work, "final work is ~0, RET set to 0");
        }
        vec![0.0; work.len()]
    } else {
        work.values()
            .iter()
            .map(|wk| wk / final_work * 100.0)
            .collect()
    };

    WorkFrame {
        time: work.times().to_vec(),
        work: work.values().to_vec(),
        work_ratio,
        final_work,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use qs_core::{Tolerances, nearly_equal};

    fn series(name: &str, rows: &[(Real, Real)]) -> TimeSeries {
        TimeSeries::from_samples(name, rows.iter().copied()).unwrap()
    }

    #[test]
    fn ri_matches_ratio_and_is_undefined_at_zero_ie() {
        let ke = series("ALLKE", &[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        let ie = series("ALLIE", &[(0.0, 0.0), (1.0, 1e-10), (2.0, 60.0)]);

        let frame = compute_ri(align(&ke, &ie));
        let ri = frame.inertial_ratio().unwrap();
        assert_eq!(ri[0], None);
        assert_eq!(ri[1], None);
        assert!(nearly_equal(ri[2].unwrap(), 5.0, Tolerances::default()));
        assert_eq!(frame.column(Column::InertialRatio).unwrap().get(0), None);
    }

    #[test]
    fn negative_ie_is_undefined() {
        assert_eq!(inertial_ratio(1.0, -5.0), None);
        assert_eq!(inertial_ratio(1.0, DENOMINATOR_EPSILON), None);
        assert_eq!(inertial_ratio(0.0, 2.0), Some(0.0));
    }

    #[test]
    fn ret_normalizes_to_final_value() {
        let wk = series("ALLWK", &[(0.0, 0.0), (1.0, 5.0), (2.0, 50.0), (3.0, 200.0)]);
        let frame = compute_ret(&wk);
        let tol = Tolerances::default();
        assert!(nearly_equal(frame.work_ratio()[1], 2.5, tol));
        assert!(nearly_equal(frame.work_ratio()[2], 25.0, tol));
        assert!(nearly_equal(frame.work_ratio()[3], 100.0, tol));
        assert_eq!(frame.final_work(), 200.0);
    }

    #[test]
    fn ret_is_zero_when_final_work_vanishes() {
        let wk = series("ALLWK", &[(0.0, 3.0), (1.0, 8.0), (2.0, 1e-12)]);
        let frame = compute_ret(&wk);
        assert_eq!(frame.work_ratio(), &[0.0, 0.0, 0.0]);
        assert_eq!(frame.work(), &[3.0, 8.0, 1e-12]);
    }

    #[test]
    fn ret_uses_latest_time_not_input_order() {
        let wk = series("ALLWK", &[(2.0, 10.0), (0.0, 0.0), (1.0, 20.0)]);
        let frame = compute_ret(&wk);
        assert_eq!(frame.final_work(), 10.0);
        assert!(nearly_equal(frame.work_ratio()[1], 200.0, Tolerances::default()));
    }

    #[test]
    fn ret_of_empty_series() {
        let frame = compute_ret(&TimeSeries::empty("ALLWK"));
        assert!(frame.is_empty());
        assert_eq!(frame.final_work(), 0.0);
    }
}
