//! Fixed decision thresholds, all in percent.

use qs_core::Real;

/// RI below this is fully quasi-static.
pub const RI_STRICT_PCT: Real = 1.0;

/// RI below this is adequately quasi-static.
pub const RI_LOOSE_PCT: Real = 5.0;

/// RET at which loading is considered started.
pub const RET_EARLY_PCT: Real = 1.0;

/// RET at which loading is considered well under way.
pub const RET_LATE_PCT: Real = 5.0;

/// Minimum share of the total duration over which RI < [`RI_LOOSE_PCT`] must hold.
pub const MIN_STABLE_FRACTION_PCT: Real = 60.0;
