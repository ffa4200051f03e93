//! Alignment of two independently sampled series onto a shared time grid.

use std::cmp::Ordering;

use qs_core::{Real, lerp};

use crate::frame::{Column, ColumnRef, Frame};
use crate::series::TimeSeries;

/// Kinetic and internal energy on the union of their time points.
///
/// Rows where either energy would be undefined (outside the other series'
/// observed range) are not present. The RI column is absent until
/// [`compute_ri`](crate::ratio::compute_ri) fills it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedEnergyFrame {
    pub(crate) time: Vec<Real>,
    pub(crate) kinetic: Vec<Real>,
    pub(crate) internal: Vec<Real>,
    pub(crate) inertial_ratio: Option<Vec<Option<Real>>>,
}

impl AlignedEnergyFrame {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn times(&self) -> &[Real] {
        &self.time
    }

    pub fn kinetic(&self) -> &[Real] {
        &self.kinetic
    }

    pub fn internal(&self) -> &[Real] {
        &self.internal
    }

    /// RI per row (percent), if computed. `None` entries are undefined.
    pub fn inertial_ratio(&self) -> Option<&[Option<Real>]> {
        self.inertial_ratio.as_deref()
    }

    /// Last time point of the frame.
    pub fn total_duration(&self) -> Option<Real> {
        self.time.last().copied()
    }
}

impl Frame for AlignedEnergyFrame {
    fn times(&self) -> &[Real] {
        &self.time
    }

    fn column(&self, column: Column) -> Option<ColumnRef<'_>> {
        match column {
            Column::KineticEnergy => Some(ColumnRef::Dense(&self.kinetic)),
            Column::InternalEnergy => Some(ColumnRef::Dense(&self.internal)),
            Column::InertialRatio => self.inertial_ratio.as_deref().map(ColumnRef::Sparse),
            _ => None,
        }
    }
}

/// Merge kinetic and internal energy onto the sorted union of their times.
///
/// Each column is linearly interpolated in time where it has no direct sample.
/// An empty input, or no overlap between the two time ranges, gives an empty
/// frame.
pub fn align(kinetic: &TimeSeries, internal: &TimeSeries) -> AlignedEnergyFrame {
    if kinetic.is_empty() || internal.is_empty() {
        tracing::debug!(
            kinetic_rows = kinetic.len(),
            internal_rows = internal.len(),
            "alignment skipped: empty input"
        );
        return AlignedEnergyFrame::default();
    }

    let grid = union_times(kinetic.times(), internal.times());
    let ke = resample(kinetic, &grid);
    let ie = resample(internal, &grid);

    let mut frame = AlignedEnergyFrame::default();
    for ((t, ke), ie) in grid.iter().zip(ke).zip(ie) {
        if let (Some(ke), Some(ie)) = (ke, ie) {
            frame.time.push(*t);
            frame.kinetic.push(ke);
            frame.internal.push(ie);
        }
    }

    tracing::debug!(
        grid_points = grid.len(),
        rows = frame.len(),
        trimmed = grid.len() - frame.len(),
        "aligned energy series"
    );
    frame
}

/// Sorted, de-duplicated union of two sorted time vectors.
fn union_times(a: &[Real], b: &[Real]) -> Vec<Real> {
    let mut grid: Vec<Real> = a.iter().chain(b).copied().collect();
    grid.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));
    grid.dedup();
    grid
}

/// Values of `series` at each grid time.
///
/// Direct samples are used where present (the first one for duplicated
/// times). Times outside the series range are `None`.
fn resample(series: &TimeSeries, grid: &[Real]) -> Vec<Option<Real>> {
    let times = series.times();
    let values = series.values();
    let n = times.len();

    let mut out = Vec::with_capacity(grid.len());
    let mut j = 0;
    for &t in grid {
        while j < n && times[j] < t {
            j += 1;
        }

        let value = if j < n && times[j] == t {
            Some(values[j])
        } else if j == 0 || j == n {
            None
        } else {
            Some(lerp(times[j - 1], values[j - 1], times[j], values[j], t))
        };
        out.push(value);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn samples() -> impl Strategy<Value = Vec<(Real, Real)>> {
        prop::collection::vec((0.0_f64..100.0, -1e3_f64..1e3), 0..25)
    }

    proptest! {
        #[test]
        fn alignment_is_commutative(a in samples(), b in samples()) {
            let sa = TimeSeries::from_samples("a", a).unwrap();
            let sb = TimeSeries::from_samples("b", b).unwrap();

            let ab = align(&sa, &sb);
            let ba = align(&sb, &sa);

            prop_assert_eq!(ab.times(), ba.times());
            prop_assert_eq!(ab.kinetic(), ba.internal());
            prop_assert_eq!(ab.internal(), ba.kinetic());
            prop_assert!(ab.times().windows(2).all(|w| w[0] < w[1]));
        }
    }
}
