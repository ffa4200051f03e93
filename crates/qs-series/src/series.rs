//! Ordered (time, value) series.

use std::cmp::Ordering;

use qs_core::{QsResult, Real, ensure_finite};

use crate::frame::{Column, ColumnRef, Frame};

/// Two-column numeric series sorted ascending by time.
///
/// Every stored time and value is finite. Duplicate times are kept in their
/// original relative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    name: String,
    time: Vec<Real>,
    value: Vec<Real>,
}

impl TimeSeries {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: Vec::new(),
            value: Vec::new(),
        }
    }

    /// Build a series from unordered samples.
    ///
    /// Fails on the first non-finite time or value. Samples are stable-sorted
    /// by time.
    pub fn from_samples(
        name: impl Into<String>,
        samples: impl IntoIterator<Item = (Real, Real)>,
    ) -> QsResult<Self> {
        let mut rows = Vec::new();
        for (t, v) in samples {
            rows.push((ensure_finite(t, "time")?, ensure_finite(v, "value")?));
        }
        rows.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let (time, value) = rows.into_iter().unzip();
        Ok(Self {
            name: name.into(),
            time,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn times(&self) -> &[Real] {
        &self.time
    }

    pub fn values(&self) -> &[Real] {
        &self.value
    }

    pub fn iter(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.time.iter().copied().zip(self.value.iter().copied())
    }

    /// First and last time, if any.
    pub fn time_range(&self) -> Option<(Real, Real)> {
        Some((*self.time.first()?, *self.time.last()?))
    }

    /// Value at the latest time point (last element after the sort).
    pub fn last_value(&self) -> Option<Real> {
        self.value.last().copied()
    }
}

impl Frame for TimeSeries {
    fn times(&self) -> &[Real] {
        &self.time
    }

    fn column(&self, column: Column) -> Option<ColumnRef<'_>> {
        match column {
            Column::Value => Some(ColumnRef::Dense(&self.value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_sorts_stably() {
        let series =
            TimeSeries::from_samples("ALLKE", [(2.0, 20.0), (1.0, 10.0), (2.0, 21.0), (0.0, 0.0)])
                .unwrap();
        assert_eq!(series.times(), &[0.0, 1.0, 2.0, 2.0]);
        assert_eq!(series.values(), &[0.0, 10.0, 20.0, 21.0]);
        assert_eq!(series.time_range(), Some((0.0, 2.0)));
        assert_eq!(series.last_value(), Some(21.0));
    }

    #[test]
    fn from_samples_rejects_nan() {
        let err = TimeSeries::from_samples("ALLWK", [(0.0, 1.0), (1.0, Real::NAN)]).unwrap_err();
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn empty_series_has_no_range() {
        let series = TimeSeries::empty("ALLIE");
        assert!(series.is_empty());
        assert_eq!(series.time_range(), None);
        assert_eq!(series.last_value(), None);
        assert_eq!(series.name(), "ALLIE");
    }

    #[test]
    fn exposes_only_value_column() {
        let series = TimeSeries::from_samples("x", [(0.0, 3.0)]).unwrap();
        assert_eq!(series.column(Column::Value).unwrap().get(0), Some(3.0));
        assert!(series.column(Column::InertialRatio).is_none());
    }
}
