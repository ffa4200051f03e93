//! Named column access over series and frames.

use std::fmt;

use qs_core::Real;

/// Columns a frame may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Raw value column of a single ingested series.
    Value,
    KineticEnergy,
    InternalEnergy,
    /// RI, percent.
    InertialRatio,
    ExternalWork,
    /// RET, percent.
    WorkRatio,
}

impl Column {
    pub fn label(self) -> &'static str {
        match self {
            Column::Value => "value",
            Column::KineticEnergy => "ALLKE",
            Column::InternalEnergy => "ALLIE",
            Column::InertialRatio => "RI",
            Column::ExternalWork => "ALLWK",
            Column::WorkRatio => "RET",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of one column.
///
/// `Sparse` columns may hold undefined entries (`None`), e.g. RI where the
/// internal energy is too small to divide by.
#[derive(Debug, Clone, Copy)]
pub enum ColumnRef<'a> {
    Dense(&'a [Real]),
    Sparse(&'a [Option<Real>]),
}

impl<'a> ColumnRef<'a> {
    pub fn len(self) -> usize {
        match self {
            ColumnRef::Dense(v) => v.len(),
            ColumnRef::Sparse(v) => v.len(),
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Value at `index`; `None` when undefined or out of range.
    pub fn get(self, index: usize) -> Option<Real> {
        match self {
            ColumnRef::Dense(v) => v.get(index).copied(),
            ColumnRef::Sparse(v) => v.get(index).copied().flatten(),
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Option<Real>> + 'a {
        (0..self.len()).map(move |i| self.get(i))
    }
}

/// A time-indexed table with named columns.
pub trait Frame {
    fn times(&self) -> &[Real];

    /// The requested column, or `None` if this frame does not carry it.
    fn column(&self, column: Column) -> Option<ColumnRef<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_column_reports_undefined_as_none() {
        let values = [Some(1.0), None, Some(3.0)];
        let col = ColumnRef::Sparse(&values);
        assert_eq!(col.len(), 3);
        assert_eq!(col.get(1), None);
        assert_eq!(col.get(2), Some(3.0));
        assert_eq!(col.get(7), None);
        assert_eq!(col.iter().collect::<Vec<_>>(), values.to_vec());
    }

    #[test]
    fn labels_match_exported_names() {
        assert_eq!(Column::KineticEnergy.to_string(), "ALLKE");
        assert_eq!(Column::WorkRatio.label(), "RET");
    }
}
