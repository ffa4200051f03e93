use clap::{Parser, Subcommand};
use qs_app::{
    AnalysisInputs, AnalysisOptions, AnalysisProgressEvent, AnalysisRequest, AppConfig, AppError,
    AppResult, IE_INPUT, KE_INPUT, StageTimings, Upload, WK_INPUT, query, report_json,
};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qs")]
#[command(about = "Quasi-static check for explicit dynamic simulations", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze ALLKE, ALLIE and ALLWK exports and print the verdict
    Analyze {
        /// Kinetic energy history (CSV)
        #[arg(long)]
        ke: PathBuf,
        /// Internal energy history (CSV)
        #[arg(long)]
        ie: PathBuf,
        /// External work history (CSV)
        #[arg(long)]
        wk: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report store directory (defaults to the configured one)
        #[arg(long)]
        store: Option<PathBuf>,
        /// Skip cache and force re-analysis
        #[arg(long)]
        no_cache: bool,
        /// Print per-stage timing (also enabled by QS_TIMING)
        #[arg(long)]
        timing: bool,
    },
    /// Ingest one CSV file and show what was detected
    Inspect {
        /// Path to the CSV file
        csv: PathBuf,
        /// Label for the value column
        #[arg(long, default_value = "value")]
        name: String,
    },
    /// List stored reports
    Reports {
        /// Report store directory
        dir: PathBuf,
    },
    /// Show a stored report
    ShowReport {
        /// Report store directory
        dir: PathBuf,
        /// Analysis ID
        analysis_id: String,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export one plotted series of a stored report as CSV
    ExportSeries {
        /// Report store directory
        dir: PathBuf,
        /// Analysis ID
        analysis_id: String,
        /// Series name: ALLKE, ALLIE, RI, ALLWK or RET
        series: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err.user_message());
            return ExitCode::from(2);
        }
    };

    let default_filter = if cli.verbose {
        "debug"
    } else {
        config.log_filter.as_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    tracing::debug!(?config, "configuration loaded");

    let result = match cli.command {
        Commands::Analyze {
            ke,
            ie,
            wk,
            json,
            output,
            store,
            no_cache,
            timing,
        } => cmd_analyze(
            &config,
            AnalyzeArgs {
                ke: &ke,
                ie: &ie,
                wk: &wk,
                json,
                output: output.as_deref(),
                store: store.as_deref().or(config.store_dir.as_deref()),
                use_cache: !no_cache,
                timing: timing || qs_core::timing::env_enabled(),
            },
        ),
        Commands::Inspect { csv, name } => cmd_inspect(&config, &csv, &name),
        Commands::Reports { dir } => cmd_reports(&dir),
        Commands::ShowReport {
            dir,
            analysis_id,
            json,
        } => cmd_show_report(&config, &dir, &analysis_id, json),
        Commands::ExportSeries {
            dir,
            analysis_id,
            series,
            output,
        } => cmd_export_series(&dir, &analysis_id, &series, output.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            clear_progress_line();
            eprintln!("error: {}", err.user_message());
            if err.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
}

struct AnalyzeArgs<'a> {
    ke: &'a Path,
    ie: &'a Path,
    wk: &'a Path,
    json: bool,
    output: Option<&'a Path>,
    store: Option<&'a Path>,
    use_cache: bool,
    timing: bool,
}

fn cmd_analyze(config: &AppConfig, args: AnalyzeArgs<'_>) -> AppResult<()> {
    let limit = config.max_input_bytes;
    let inputs = AnalysisInputs::new(
        Upload::open(KE_INPUT, args.ke, limit)?,
        Upload::open(IE_INPUT, args.ie, limit)?,
        Upload::open(WK_INPUT, args.wk, limit)?,
    );

    let store = args.store.map(query::open_store).transpose()?;
    let request = AnalysisRequest {
        inputs: &inputs,
        store: store.as_ref(),
        options: AnalysisOptions {
            use_cache: args.use_cache,
            ..AnalysisOptions::default()
        },
    };

    let show_progress = !args.json && io::stderr().is_terminal();
    let response = qs_app::ensure_analysis_with_progress(
        &request,
        config,
        Some(&mut |event| {
            if show_progress {
                render_cli_progress(&event);
            }
        }),
    )?;
    if show_progress {
        clear_progress_line();
    }

    let report = &response.report;
    if let Some(path) = args.output {
        std::fs::write(path, report_json(report, config.pretty_json)?)?;
        if !args.json {
            println!("✓ Report written to {}", path.display());
        }
    }

    if args.json {
        println!("{}", report_json(report, config.pretty_json)?);
    } else {
        if response.loaded_from_cache {
            println!("✓ Loaded from cache: {}", report.analysis_id);
        } else {
            println!("✓ {} {}", report.message, report.analysis_id);
        }
        print_summary(report);
    }

    if args.timing {
        print_timing_summary(&response.timings);
    }
    Ok(())
}

fn print_summary(report: &qs_results::AnalysisReport) {
    let table = &report.summary_table;
    println!("\nCritical times:");
    println!("  RI  < 1% stable from: {}", table.t_ri_below_1);
    println!("  RI  < 5% stable from: {}", table.t_ri_below_5);
    println!("  RET >= 1% first at:   {}", table.t_ret_reaches_1);
    println!("  RET >= 5% first at:   {}", table.t_ret_reaches_5);
    println!("  RI  < 5% stable share: {}", table.stable_percentage);
    println!("\nVerdict: {}", report.verdict.final_decision_text);
}

fn render_cli_progress(event: &AnalysisProgressEvent) {
    let mut line = format!(
        "\r{}  elapsed={:.3}s",
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    eprint!("{}\x1b[K", line);
    let _ = io::stderr().flush();
}

fn clear_progress_line() {
    if io::stderr().is_terminal() {
        eprint!("\r\x1b[K");
        let _ = io::stderr().flush();
    }
}

fn print_timing_summary(timings: &StageTimings) {
    let total = timings.total_s.max(1.0e-12);
    println!("\nTiming summary:");
    for (label, secs) in timings.entries() {
        if label == "total" {
            println!("  {:<10} {:.6}s", label, secs);
        } else {
            println!("  {:<10} {:.6}s ({:.1}%)", label, secs, 100.0 * secs / total);
        }
    }
}

fn cmd_inspect(config: &AppConfig, csv_path: &Path, name: &str) -> AppResult<()> {
    let upload = Upload::open(name, csv_path, config.max_input_bytes)?;
    let (series, report) = qs_series::ingest_with_report(&upload.data, name);

    println!("File: {}", csv_path.display());
    match report.layout {
        Some(layout) => {
            println!("  Delimiter: '{}'", char::from(layout.delimiter));
            println!("  Header: {}", if layout.has_header { "yes" } else { "no" });
        }
        None => println!("  Layout: not recognized"),
    }
    if report.lossy_decode {
        println!("  Encoding: invalid UTF-8 replaced");
    }
    println!("  Data rows: {}", report.data_rows);
    println!("  Valid rows: {}", series.len());
    println!("  Dropped rows: {}", report.dropped_rows());
    if let Some((t0, t1)) = series.time_range() {
        println!("  Time range: {:.3} - {:.3} s", t0, t1);
    }
    if let Some(last) = series.last_value() {
        println!("  Final {}: {}", name, last);
    }
    Ok(())
}

fn cmd_reports(dir: &Path) -> AppResult<()> {
    let store = query::open_store(dir)?;
    let reports = query::list_reports(&store)?;

    if reports.is_empty() {
        println!("No stored reports in {}", dir.display());
    } else {
        println!("Stored reports in {}:", dir.display());
        for summary in reports {
            println!(
                "  {} ({})  {}  stable {}",
                summary.analysis_id, summary.timestamp, summary.label, summary.stable_percentage
            );
        }
    }
    Ok(())
}

fn cmd_show_report(config: &AppConfig, dir: &Path, analysis_id: &str, json: bool) -> AppResult<()> {
    let store = query::open_store(dir)?;
    let report = query::load_report(&store, analysis_id)?;

    if json {
        println!("{}", report_json(&report, config.pretty_json)?);
        return Ok(());
    }

    println!("Report: {}", report.analysis_id);
    println!("  Created: {}", report.timestamp);
    println!("  Tool version: {}", report.tool_version);
    for name in qs_results::GraphData::SERIES_NAMES {
        let points = query::extract_series(&report, name).map(|s| s.len())?;
        println!("  {:<6} {} points", name, points);
    }
    print_summary(&report);
    Ok(())
}

fn cmd_export_series(
    dir: &Path,
    analysis_id: &str,
    series_name: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let store = query::open_store(dir)?;
    let report = query::load_report(&store, analysis_id)?;
    let series = query::extract_series(&report, series_name)?;

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(["time_s", "value"]).map_err(csv_error)?;
    for (t, value) in series.points() {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        writer
            .write_record([t.to_string(), value])
            .map_err(csv_error)?;
    }
    writer.flush()?;

    if let Some(path) = output {
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    }
    Ok(())
}

fn csv_error(err: csv::Error) -> AppError {
    AppError::Io(err.into())
}
