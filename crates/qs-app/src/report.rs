//! Shaping an analysis outcome into the serializable report.

use qs_analysis::{StableTime, Verdict};
use qs_core::Real;
use qs_results::{AnalysisReport, GraphData, PlotSeries, SummaryTable, VerdictRecord};
use qs_series::{Column, Frame};

use crate::analysis_service::AnalysisOutcome;
use crate::error::AppResult;

pub const COMPLETED_MESSAGE: &str = "Analysis complete.";

/// `"<t> s"` to three decimals, or `"N/A"` when the condition never held.
pub fn format_time(time: StableTime) -> String {
    match time.seconds() {
        Some(t) => format!("{t:.3} s"),
        None => "N/A".to_string(),
    }
}

/// `"<p>%"` to two decimals, or `"N/A"`.
pub fn format_percentage(value: Option<Real>) -> String {
    match value {
        Some(p) => format!("{p:.2}%"),
        None => "N/A".to_string(),
    }
}

/// One frame column as a plot curve; an absent column gives an empty curve.
pub fn plot_series<F: Frame + ?Sized>(frame: &F, column: Column) -> PlotSeries {
    match frame.column(column) {
        Some(values) => PlotSeries {
            x: frame.times().to_vec(),
            y: values.iter().collect(),
        },
        None => PlotSeries::default(),
    }
}

pub fn verdict_record(verdict: &Verdict) -> VerdictRecord {
    VerdictRecord {
        grade: verdict.grade,
        label: verdict.grade.label().to_string(),
        rationale: verdict.rationale.clone(),
        final_decision_text: verdict.decision_text(),
    }
}

pub fn build_report(
    outcome: &AnalysisOutcome,
    analysis_id: String,
    tool_version: &str,
) -> AnalysisReport {
    let times = &outcome.critical_times;

    AnalysisReport {
        analysis_id,
        timestamp: qs_results::timestamp_now(),
        tool_version: tool_version.to_string(),
        message: COMPLETED_MESSAGE.to_string(),
        graph_data: GraphData {
            kinetic: plot_series(&outcome.energy, Column::KineticEnergy),
            internal: plot_series(&outcome.energy, Column::InternalEnergy),
            inertial_ratio: plot_series(&outcome.energy, Column::InertialRatio),
            work: plot_series(&outcome.work, Column::ExternalWork),
            work_ratio: plot_series(&outcome.work, Column::WorkRatio),
        },
        summary_table: SummaryTable {
            t_ri_below_1: format_time(times.ri_below_strict),
            t_ri_below_5: format_time(times.ri_below_loose),
            t_ret_reaches_1: format_time(times.ret_reaches_early),
            t_ret_reaches_5: format_time(times.ret_reaches_late),
            stable_percentage: format_percentage(outcome.verdict.stable_fraction),
        },
        verdict: verdict_record(&outcome.verdict),
    }
}

/// Serialize a report as JSON text.
pub fn report_json(report: &AnalysisReport, pretty: bool) -> AppResult<String> {
    let text = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(text)
}
