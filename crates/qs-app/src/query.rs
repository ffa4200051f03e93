//! Query helpers over stored reports.

use std::path::Path;

use qs_analysis::Grade;
use qs_results::{AnalysisReport, GraphData, PlotSeries, ReportStore};

use crate::error::{AppError, AppResult};

/// One line of a report listing.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub analysis_id: String,
    pub timestamp: String,
    pub grade: Grade,
    pub label: String,
    pub stable_percentage: String,
}

impl From<&AnalysisReport> for ReportSummary {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            analysis_id: report.analysis_id.clone(),
            timestamp: report.timestamp.clone(),
            grade: report.verdict.grade,
            label: report.verdict.label.clone(),
            stable_percentage: report.summary_table.stable_percentage.clone(),
        }
    }
}

pub fn open_store(dir: &Path) -> AppResult<ReportStore> {
    Ok(ReportStore::new(dir)?)
}

/// Summaries of every stored report, oldest first.
pub fn list_reports(store: &ReportStore) -> AppResult<Vec<ReportSummary>> {
    let reports = store.list_reports()?;
    Ok(reports.iter().map(ReportSummary::from).collect())
}

pub fn load_report(store: &ReportStore, analysis_id: &str) -> AppResult<AnalysisReport> {
    Ok(store.load_report(analysis_id)?)
}

/// A plotted curve by report key (`ALLKE`, `ALLIE`, `RI`, `ALLWK`, `RET`).
pub fn extract_series<'a>(report: &'a AnalysisReport, name: &str) -> AppResult<&'a PlotSeries> {
    report.graph_data.series(name).ok_or_else(|| {
        AppError::UnknownSeries(format!(
            "{name} (expected one of {})",
            GraphData::SERIES_NAMES.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qs_results::{SummaryTable, VerdictRecord};

    fn report() -> AnalysisReport {
        AnalysisReport {
            analysis_id: "id".to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
            tool_version: "0.1.0".to_string(),
            message: "Analysis complete.".to_string(),
            graph_data: GraphData {
                work_ratio: PlotSeries {
                    x: vec![0.0, 1.0],
                    y: vec![Some(0.0), Some(100.0)],
                },
                ..GraphData::default()
            },
            summary_table: SummaryTable {
                t_ri_below_1: "N/A".to_string(),
                t_ri_below_5: "N/A".to_string(),
                t_ret_reaches_1: "1.000 s".to_string(),
                t_ret_reaches_5: "1.000 s".to_string(),
                stable_percentage: "N/A".to_string(),
            },
            verdict: VerdictRecord {
                grade: Grade::NeverQuasiStatic,
                label: "NOT ACCEPTABLE".to_string(),
                rationale: String::new(),
                final_decision_text: "NOT ACCEPTABLE. ".to_string(),
            },
        }
    }

    #[test]
    fn extract_known_and_unknown_series() {
        let report = report();
        assert_eq!(extract_series(&report, "RET").unwrap().len(), 2);
        let err = extract_series(&report, "ALLXX").unwrap_err();
        assert!(matches!(err, AppError::UnknownSeries(_)));
        assert!(err.to_string().contains("ALLKE, ALLIE, RI, ALLWK, RET"));
    }

    #[test]
    fn summary_copies_listing_fields() {
        let summary = ReportSummary::from(&report());
        assert_eq!(summary.grade, Grade::NeverQuasiStatic);
        assert_eq!(summary.stable_percentage, "N/A");
    }
}
