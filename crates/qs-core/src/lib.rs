//! qs-core: numeric foundation for the quasi-static checker.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI time + constructors)
//! - timing (wall-clock stage timers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

pub use error::{QsError, QsResult};
pub use numeric::*;
pub use units::*;
