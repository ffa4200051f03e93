//! Report storage API.

use crate::hash::is_analysis_id;
use crate::types::AnalysisReport;
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

const REPORT_FILE: &str = "report.json";

/// Directory of `<analysis_id>/report.json` entries.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    pub fn new(root_dir: impl Into<PathBuf>) -> ResultsResult<Self> {
        let root_dir = root_dir.into();
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn report_dir(&self, analysis_id: &str) -> ResultsResult<PathBuf> {
        if !is_analysis_id(analysis_id) {
            return Err(ResultsError::InvalidId(analysis_id.to_string()));
        }
        Ok(self.root_dir.join(analysis_id))
    }

    pub fn has_report(&self, analysis_id: &str) -> bool {
        self.report_dir(analysis_id)
            .map(|dir| dir.join(REPORT_FILE).exists())
            .unwrap_or(false)
    }

    pub fn save_report(&self, report: &AnalysisReport) -> ResultsResult<PathBuf> {
        let report_dir = self.report_dir(&report.analysis_id)?;
        fs::create_dir_all(&report_dir)?;

        let report_path = report_dir.join(REPORT_FILE);
        let report_json = serde_json::to_string_pretty(report)?;
        fs::write(&report_path, report_json)?;

        Ok(report_path)
    }

    pub fn load_report(&self, analysis_id: &str) -> ResultsResult<AnalysisReport> {
        let report_path = self.report_dir(analysis_id)?.join(REPORT_FILE);

        if !report_path.exists() {
            return Err(ResultsError::ReportNotFound {
                analysis_id: analysis_id.to_string(),
            });
        }

        let content = fs::read_to_string(report_path)?;
        let report = serde_json::from_str(&content)?;
        Ok(report)
    }

    /// All readable reports, oldest first. Unreadable entries are skipped.
    pub fn list_reports(&self) -> ResultsResult<Vec<AnalysisReport>> {
        let mut reports = Vec::new();

        if !self.root_dir.exists() {
            return Ok(reports);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let analysis_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(report) = self.load_report(&analysis_id) {
                    reports.push(report);
                }
            }
        }

        reports.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.analysis_id.cmp(&b.analysis_id))
        });
        Ok(reports)
    }

    pub fn delete_report(&self, analysis_id: &str) -> ResultsResult<()> {
        let report_dir = self.report_dir(analysis_id)?;
        if report_dir.exists() {
            fs::remove_dir_all(report_dir)?;
        }
        Ok(())
    }
}
