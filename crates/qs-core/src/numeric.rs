use crate::QsError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, QsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QsError::NonFinite { what, value: v })
    }
}

/// Parse a text cell as a finite number.
///
/// Surrounding whitespace is ignored. `inf`, `NaN` and anything `f64::from_str`
/// rejects yield `None`.
pub fn parse_finite(cell: &str) -> Option<Real> {
    cell.trim()
        .parse::<Real>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Linear interpolation of `y` at `x` between `(x0, y0)` and `(x1, y1)`.
///
/// Degenerate intervals return `y0`.
pub fn lerp(x0: Real, y0: Real, x1: Real, y1: Real, x: Real) -> Real {
    let dx = x1 - x0;
    if dx.abs() < 1e-15 {
        return y0;
    }
    y0 + (x - x0) / dx * (y1 - y0)
}
