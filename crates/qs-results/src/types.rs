//! Report data types.

use serde::{Deserialize, Serialize};

use qs_analysis::Grade;

pub type AnalysisId = String;

/// Current UTC time in the report's RFC 3339 format.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Everything one analysis produced, as written to `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    /// RFC 3339.
    pub timestamp: String,
    pub tool_version: String,
    pub message: String,
    pub graph_data: GraphData,
    pub summary_table: SummaryTable,
    pub verdict: VerdictRecord,
}

/// One plotted curve. `None` points serialize as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub x: Vec<f64>,
    pub y: Vec<Option<f64>>,
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, Option<f64>)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(rename = "ALLKE")]
    pub kinetic: PlotSeries,
    #[serde(rename = "ALLIE")]
    pub internal: PlotSeries,
    #[serde(rename = "RI")]
    pub inertial_ratio: PlotSeries,
    #[serde(rename = "ALLWK")]
    pub work: PlotSeries,
    #[serde(rename = "RET")]
    pub work_ratio: PlotSeries,
}

impl GraphData {
    pub const SERIES_NAMES: [&'static str; 5] = ["ALLKE", "ALLIE", "RI", "ALLWK", "RET"];

    /// Look up a curve by its report key (case-insensitive).
    pub fn series(&self, name: &str) -> Option<&PlotSeries> {
        match name.to_ascii_uppercase().as_str() {
            "ALLKE" => Some(&self.kinetic),
            "ALLIE" => Some(&self.internal),
            "RI" => Some(&self.inertial_ratio),
            "ALLWK" => Some(&self.work),
            "RET" => Some(&self.work_ratio),
            _ => None,
        }
    }
}

/// Display strings: times as `"<v> s"`, percentage as `"<v>%"`, or `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub t_ri_below_1: String,
    pub t_ri_below_5: String,
    pub t_ret_reaches_1: String,
    pub t_ret_reaches_5: String,
    pub stable_percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub grade: Grade,
    pub label: String,
    pub rationale: String,
    pub final_decision_text: String,
}
