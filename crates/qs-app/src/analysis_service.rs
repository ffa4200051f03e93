//! Analysis execution and report caching service.

use std::time::Instant;

use qs_analysis::{CriticalTimes, Verdict, classify, find_critical_times};
use qs_core::{s, timing::Timer};
use qs_results::{AnalysisReport, ReportStore, compute_analysis_id};
use qs_series::{
    AlignedEnergyFrame, IngestReport, WorkFrame, align, compute_ret, compute_ri,
    ingest_with_report,
};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::input::{AnalysisInputs, IE_INPUT, KE_INPUT, WK_INPUT};
use crate::progress::{AnalysisProgressEvent, AnalysisStage};
use crate::report;

/// Options for running analyses.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub use_cache: bool,
    pub tool_version: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to analyze one set of inputs.
pub struct AnalysisRequest<'a> {
    pub inputs: &'a AnalysisInputs,
    /// Reports are looked up and saved here when present.
    pub store: Option<&'a ReportStore>,
    pub options: AnalysisOptions,
}

/// Wall-clock seconds spent per pipeline stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    pub check_s: f64,
    pub ingest_s: f64,
    pub align_s: f64,
    pub ratios_s: f64,
    pub detect_s: f64,
    pub classify_s: f64,
    pub report_s: f64,
    pub save_s: f64,
    pub load_cache_s: f64,
    pub total_s: f64,
}

impl StageTimings {
    /// Non-zero stages as `(label, seconds)`, in pipeline order.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        [
            ("check", self.check_s),
            ("ingest", self.ingest_s),
            ("align", self.align_s),
            ("ratios", self.ratios_s),
            ("detect", self.detect_s),
            ("classify", self.classify_s),
            ("report", self.report_s),
            ("save", self.save_s),
            ("load_cache", self.load_cache_s),
            ("total", self.total_s),
        ]
        .into_iter()
        .filter(|(_, secs)| *secs > 0.0)
        .collect()
    }
}

/// What ingestion detected for each input.
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    pub kinetic: IngestReport,
    pub internal: IngestReport,
    pub work: IngestReport,
}

/// Full in-memory result of one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub energy: AlignedEnergyFrame,
    pub work: WorkFrame,
    pub critical_times: CriticalTimes,
    pub verdict: Verdict,
    pub ingest: IngestSummary,
    pub timings: StageTimings,
}

/// Response from [`ensure_analysis`].
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub report: AnalysisReport,
    pub loaded_from_cache: bool,
    pub timings: StageTimings,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(AnalysisProgressEvent)>,
    stage: AnalysisStage,
    started: Instant,
    message: Option<String>,
) {
    tracing::debug!(%stage, "analysis stage");
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(AnalysisProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            message,
        });
    }
}

fn stop_stage(timer: Timer) -> f64 {
    let stage = timer.label();
    let elapsed_s = timer.stop();
    tracing::debug!(stage, elapsed_s, "stage timed");
    elapsed_s
}

/// Run the pipeline on `inputs`: ingest, align, ratios, detection, verdict.
///
/// All input checks happen before any computation; no partial verdict is
/// ever returned.
pub fn analyze(inputs: &AnalysisInputs, config: &AppConfig) -> AppResult<AnalysisOutcome> {
    analyze_with_progress(inputs, config, &mut None)
}

fn analyze_with_progress(
    inputs: &AnalysisInputs,
    config: &AppConfig,
    progress_cb: &mut Option<&mut dyn FnMut(AnalysisProgressEvent)>,
) -> AppResult<AnalysisOutcome> {
    let started = Instant::now();
    let mut timings = StageTimings::default();

    emit_progress(progress_cb, AnalysisStage::CheckingInputs, started, None);
    let timer = Timer::start("check");
    let checked = inputs.check(config.max_input_bytes)?;
    timings.check_s = stop_stage(timer);

    emit_progress(progress_cb, AnalysisStage::Ingesting, started, None);
    let timer = Timer::start("ingest");
    let (ke, ke_report) = ingest_with_report(&checked.kinetic.data, "ALLKE");
    let (ie, ie_report) = ingest_with_report(&checked.internal.data, "ALLIE");
    let (wk, wk_report) = ingest_with_report(&checked.work.data, "ALLWK");
    timings.ingest_s = stop_stage(timer);

    let empty: Vec<String> = [(KE_INPUT, &ke), (IE_INPUT, &ie), (WK_INPUT, &wk)]
        .into_iter()
        .filter(|(_, series)| series.is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    if !empty.is_empty() {
        tracing::info!(inputs = ?empty, "inputs produced no valid rows");
        return Err(AppError::EmptySeries { inputs: empty });
    }

    emit_progress(progress_cb, AnalysisStage::Aligning, started, None);
    let timer = Timer::start("align");
    let energy = align(&ke, &ie);
    timings.align_s = stop_stage(timer);
    if energy.is_empty() {
        tracing::info!(
            ke_range = ?ke.time_range(),
            ie_range = ?ie.time_range(),
            "energy histories do not overlap"
        );
        return Err(AppError::EmptyAlignment);
    }

    emit_progress(progress_cb, AnalysisStage::ComputingRatios, started, None);
    let timer = Timer::start("ratios");
    let energy = compute_ri(energy);
    let work = compute_ret(&wk);
    timings.ratios_s = stop_stage(timer);

    emit_progress(progress_cb, AnalysisStage::DetectingStability, started, None);
    let timer = Timer::start("detect");
    let critical_times = find_critical_times(&energy, &work)?;
    timings.detect_s = stop_stage(timer);

    emit_progress(progress_cb, AnalysisStage::Classifying, started, None);
    let timer = Timer::start("classify");
    let total_duration = energy
        .total_duration()
        .ok_or_else(|| AppError::internal("aligned frame has no rows"))?;
    let verdict = classify(&critical_times, s(total_duration));
    timings.classify_s = stop_stage(timer);

    tracing::info!(
        grade = verdict.grade.label(),
        stable_fraction = ?verdict.stable_fraction,
        rows = energy.len(),
        "analysis classified"
    );

    timings.total_s = started.elapsed().as_secs_f64();
    Ok(AnalysisOutcome {
        energy,
        work,
        critical_times,
        verdict,
        ingest: IngestSummary {
            kinetic: ke_report,
            internal: ie_report,
            work: wk_report,
        },
        timings,
    })
}

/// Analyze inputs or load the stored report with the same content hash.
pub fn ensure_analysis(
    request: &AnalysisRequest,
    config: &AppConfig,
) -> AppResult<AnalysisResponse> {
    ensure_analysis_with_progress(request, config, None)
}

/// [`ensure_analysis`], streaming stage events to `progress_cb`.
pub fn ensure_analysis_with_progress(
    request: &AnalysisRequest,
    config: &AppConfig,
    mut progress_cb: Option<&mut dyn FnMut(AnalysisProgressEvent)>,
) -> AppResult<AnalysisResponse> {
    let started = Instant::now();

    emit_progress(&mut progress_cb, AnalysisStage::CheckingCache, started, None);
    let checked = request.inputs.check(config.max_input_bytes)?;
    let analysis_id = compute_analysis_id(&checked.payloads(), &request.options.tool_version);

    if let Some(store) = request.store
        && request.options.use_cache
        && store.has_report(&analysis_id)
    {
        emit_progress(
            &mut progress_cb,
            AnalysisStage::LoadingCachedReport,
            started,
            Some(format!("Loading cached report {analysis_id}")),
        );

        let timer = Timer::start("load_cache");
        let report = store.load_report(&analysis_id)?;
        let mut timings = StageTimings {
            load_cache_s: stop_stage(timer),
            ..StageTimings::default()
        };
        timings.total_s = started.elapsed().as_secs_f64();

        emit_progress(&mut progress_cb, AnalysisStage::Completed, started, None);
        return Ok(AnalysisResponse {
            report,
            loaded_from_cache: true,
            timings,
        });
    }

    let outcome = analyze_with_progress(request.inputs, config, &mut progress_cb)?;
    let mut timings = outcome.timings.clone();

    emit_progress(&mut progress_cb, AnalysisStage::BuildingReport, started, None);
    let timer = Timer::start("report");
    let report = report::build_report(&outcome, analysis_id, &request.options.tool_version);
    timings.report_s = stop_stage(timer);

    if let Some(store) = request.store {
        emit_progress(&mut progress_cb, AnalysisStage::SavingReport, started, None);
        let timer = Timer::start("save");
        let path = store.save_report(&report)?;
        timings.save_s = stop_stage(timer);
        tracing::debug!(path = %path.display(), "report saved");
    }

    timings.total_s = started.elapsed().as_secs_f64();
    emit_progress(
        &mut progress_cb,
        AnalysisStage::Completed,
        started,
        Some(report.verdict.final_decision_text.clone()),
    );

    Ok(AnalysisResponse {
        report,
        loaded_from_cache: false,
        timings,
    })
}
