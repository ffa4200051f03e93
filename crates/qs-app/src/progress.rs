use std::fmt;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    CheckingInputs,
    CheckingCache,
    LoadingCachedReport,
    Ingesting,
    Aligning,
    ComputingRatios,
    DetectingStability,
    Classifying,
    BuildingReport,
    SavingReport,
    Completed,
}

impl AnalysisStage {
    pub fn label(self) -> &'static str {
        match self {
            AnalysisStage::CheckingInputs => "checking inputs",
            AnalysisStage::CheckingCache => "checking report cache",
            AnalysisStage::LoadingCachedReport => "loading cached report",
            AnalysisStage::Ingesting => "ingesting",
            AnalysisStage::Aligning => "aligning",
            AnalysisStage::ComputingRatios => "computing ratios",
            AnalysisStage::DetectingStability => "detecting stability",
            AnalysisStage::Classifying => "classifying",
            AnalysisStage::BuildingReport => "building report",
            AnalysisStage::SavingReport => "saving report",
            AnalysisStage::Completed => "completed",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisProgressEvent {
    pub stage: AnalysisStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}
