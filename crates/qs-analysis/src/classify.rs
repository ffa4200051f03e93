//! Quasi-static quality verdict.
//!
//! The rule has two gates and then an ordered ladder:
//! 1. RI must eventually stay below 5% (otherwise never quasi-static).
//! 2. It must do so for at least 60% of the run.
//! 3. The earlier RI settles relative to the start of loading (RET reaching
//!    1% then 5%), the better the grade. Comparisons are strict, so a tie
//!    falls through to the next rung.

use serde::{Deserialize, Serialize};

use qs_core::{Real, Time, seconds};

use crate::stability::{CriticalTimes, StableTime};
use crate::thresholds::{
    MIN_STABLE_FRACTION_PCT, RET_EARLY_PCT, RET_LATE_PCT, RI_LOOSE_PCT, RI_STRICT_PCT,
};

/// Verdict categories, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Perfect,
    VeryGood,
    Good,
    Acceptable,
    /// RI < 5% lasts long enough but settles too late relative to loading.
    TimingMismatch,
    /// RI < 5% holds for less than the minimum share of the run.
    InsufficientStableDuration,
    /// RI never stays below 5%, or the run has no positive duration.
    NeverQuasiStatic,
}

impl Grade {
    pub fn label(self) -> &'static str {
        match self {
            Grade::Perfect => "PERFECT",
            Grade::VeryGood => "VERY GOOD",
            Grade::Good => "GOOD",
            Grade::Acceptable => "ACCEPTABLE",
            Grade::TimingMismatch
            | Grade::InsufficientStableDuration
            | Grade::NeverQuasiStatic => "NOT ACCEPTABLE",
        }
    }

    pub fn is_acceptable(self) -> bool {
        self <= Grade::Acceptable
    }
}

/// Classification outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub grade: Grade,
    pub rationale: String,
    /// Share of the run over which RI < 5% holds, percent.
    ///
    /// `None` when RI never stays below 5%.
    pub stable_fraction: Option<Real>,
    /// Time the rationale asks the user to check results after.
    pub cited_time: Option<Time>,
}

impl Verdict {
    /// Label and rationale as one line of text.
    pub fn decision_text(&self) -> String {
        format!("{}. {}", self.grade.label(), self.rationale)
    }
}

const RESCALE: &str = "RESCALE TIME AND MASS.";

pub fn classify(times: &CriticalTimes, total_duration: Time) -> Verdict {
    let total = seconds(total_duration);

    let t_ri_loose = match times.ri_below_loose {
        StableTime::At(t) if total > 0.0 => t,
        StableTime::At(_) => {
            return never_quasi_static(Some(0.0));
        }
        StableTime::Never => {
            return never_quasi_static(None);
        }
    };

    let stable_fraction = (total - seconds(t_ri_loose)) / total * 100.0;
    tracing::debug!(
        stable_fraction,
        total_duration_s = total,
        "RI < {RI_LOOSE_PCT}% stable share"
    );

    if stable_fraction < MIN_STABLE_FRACTION_PCT {
        return Verdict {
            grade: Grade::InsufficientStableDuration,
            rationale: format!(
                "The run does not stay quasi-static long enough (RI < {RI_LOOSE_PCT}% stable for \
                 less than {MIN_STABLE_FRACTION_PCT}% of the total time). {RESCALE}"
            ),
            stable_fraction: Some(stable_fraction),
            cited_time: None,
        };
    }

    let ri_strict = times.ri_below_strict;
    let ri_loose = times.ri_below_loose;
    let ret_early = times.ret_reaches_early;
    let ret_late = times.ret_reaches_late;

    let (grade, rationale, cited_time) = if ri_strict < ret_early {
        (
            Grade::Perfect,
            format!(
                "The run is fully quasi-static (RI < {RI_STRICT_PCT}% stable before work \
                 reaches {RET_EARLY_PCT}%)."
            ),
            None,
        )
    } else if ri_strict < ret_late {
        (
            Grade::VeryGood,
            format!(
                "The run is sufficiently quasi-static (RI < {RI_STRICT_PCT}% stable before work \
                 reaches {RET_LATE_PCT}%)."
            ),
            None,
        )
    } else if ri_loose < ret_early {
        (
            Grade::Good,
            format!(
                "The run is quasi-static (RI < {RI_LOOSE_PCT}% stable before work reaches \
                 {RET_EARLY_PCT}%). {}",
                check_before(t_ri_loose)
            ),
            Some(t_ri_loose),
        )
    } else if ri_loose < ret_late {
        (
            Grade::Acceptable,
            format!(
                "The run is marginally quasi-static (RI < {RI_LOOSE_PCT}% stable before work \
                 reaches {RET_LATE_PCT}%). {}",
                check_before(t_ri_loose)
            ),
            Some(t_ri_loose),
        )
    } else {
        (
            Grade::TimingMismatch,
            format!(
                "Although RI < {RI_LOOSE_PCT}% holds for more than {MIN_STABLE_FRACTION_PCT}% \
                 of the time, its onset relative to the start of work is unfavorable. {RESCALE}"
            ),
            None,
        )
    };

    Verdict {
        grade,
        rationale,
        stable_fraction: Some(stable_fraction),
        cited_time,
    }
}

fn never_quasi_static(stable_fraction: Option<Real>) -> Verdict {
    Verdict {
        grade: Grade::NeverQuasiStatic,
        rationale: format!(
            "The run never becomes quasi-static (RI always >= {RI_LOOSE_PCT}% or no valid \
             duration). {RESCALE}"
        ),
        stable_fraction,
        cited_time: None,
    }
}

fn check_before(t: Time) -> String {
    format!(
        "CHECK: verify that the result variables of interest (stress, strain, contacts) are \
         not significant before t = {:.3} s.",
        seconds(t)
    )
}
