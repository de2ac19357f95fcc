//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Opens the log file under the size limit
//! 2. Counts ban events per address
//! 3. Renders the bar chart
//! 4. Writes or prints the JSON report

use crate::aggregator::{aggregate, calculate_ban_distribution};
use crate::chart::{generate_text_summary, ChartConfig, ChartRenderer, SvgChartRenderer};
use crate::intake::{open_log, source_name};
use crate::output::{report_to_string, write_report};
use crate::parser::AnalysisReport;
use crate::utils::config::{
    DEFAULT_CHART_DIR, DEFAULT_GRAPH_URL_PREFIX, DEFAULT_MAX_LOG_BYTES, DEFAULT_TOP_OFFENDERS,
};
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

/// Message reported when the log cannot be read to completion
pub const PROCESSING_FAILURE: &str = "Error processing the file";

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Log file to analyze
    pub log_path: PathBuf,

    /// Output path for the JSON report (stdout when absent)
    pub output_json: Option<PathBuf>,

    /// Directory for the chart (no chart when absent)
    pub chart_dir: Option<PathBuf>,

    /// Prefix of the returned graph URL
    pub graph_url_prefix: String,

    /// Chart title override
    pub chart_title: Option<String>,

    /// Largest accepted log file in bytes
    pub max_bytes: u64,

    /// Number of offenders in the text summary
    pub top: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            log_path: PathBuf::new(),
            output_json: None,
            chart_dir: Some(PathBuf::from(DEFAULT_CHART_DIR)),
            graph_url_prefix: DEFAULT_GRAPH_URL_PREFIX.to_string(),
            chart_title: None,
            max_bytes: DEFAULT_MAX_LOG_BYTES,
            top: DEFAULT_TOP_OFFENDERS,
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The finished report, which has already been written or printed
///
/// # Errors
/// * Intake failures (missing file, file too large)
/// * `PROCESSING_FAILURE` if the log cannot be read
/// * Chart or report write errors
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<AnalysisReport> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.log_path.display());

    // Step 1: Intake
    info!("Step 1/3: Opening log file...");
    let reader = open_log(&args.log_path, args.max_bytes).context("Failed to open log file")?;

    let renderer = args.chart_dir.as_ref().map(|dir| {
        let mut chart = ChartConfig::new();
        if let Some(title) = &args.chart_title {
            chart = chart.with_title(title.as_str());
        }
        SvgChartRenderer::new(dir)
            .with_url_prefix(args.graph_url_prefix.as_str())
            .with_chart_config(chart)
    });
    if let Some(renderer) = &renderer {
        debug!("Chart directory: {}", renderer.output_dir().display());
    }

    // Step 2: Aggregate and chart
    info!("Step 2/3: Counting ban events and rendering chart...");
    let report = run_analysis(
        reader,
        source_name(&args.log_path),
        renderer.as_ref().map(|r| r as &dyn ChartRenderer),
    )?;

    let distribution = calculate_ban_distribution(&report.counts);
    info!("Ban distribution: {}", distribution.summary());
    if distribution.is_repeat_heavy() {
        info!("Most bans come from repeat offenders");
    }

    // Step 3: Write outputs
    info!("Step 3/3: Writing report...");
    match &args.output_json {
        Some(path) => {
            write_report(&report, path).context("Failed to write report JSON")?;
            info!("✓ Report written to: {}", path.display());
        }
        None => {
            println!("{}", report_to_string(&report).context("Failed to serialize report")?);
        }
    }

    if args.print_summary {
        let summary = format_summary(&report, args.top);
        // Keep stdout parseable when it carries the JSON report
        if summary_on_stderr(args) {
            eprintln!("{}", summary);
        } else {
            println!("{}", summary);
        }
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Whether the text summary must go to stderr
fn summary_on_stderr(args: &AnalyzeArgs) -> bool {
    args.output_json.is_none()
}

/// Render the human-readable summary block for a report
fn format_summary(report: &AnalysisReport, top: usize) -> String {
    let rule = "=".repeat(72);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "BAN SUMMARY".to_string(),
        rule.clone(),
        format!("Source:        {}", report.source),
        format!("Total Bans:    {}", report.total_bans),
        format!("Unique IPs:    {}", report.unique_ips),
    ];
    if !report.graph_url.is_empty() {
        lines.push(format!("Chart:         {}", report.graph_url));
    }
    if !report.counts.is_empty() {
        lines.push(String::new());
        lines.push(generate_text_summary(&report.counts, top));
    }
    lines.push(rule);

    lines.join("\n")
}

/// Aggregate a log stream and render its chart
///
/// **Public** - the request-level flow, independent of where the log came from
///
/// # Arguments
/// * `source` - Log contents
/// * `source_name` - Name recorded in the report
/// * `renderer` - Chart renderer, or `None` to skip charting
///
/// # Errors
/// * `PROCESSING_FAILURE` with the read error as its cause
pub fn run_analysis<R: BufRead>(
    source: R,
    source_name: impl Into<String>,
    renderer: Option<&dyn ChartRenderer>,
) -> Result<AnalysisReport> {
    let counts = aggregate(source).map_err(|e| {
        error!("Error processing file: {}", e);
        anyhow::Error::new(e).context(PROCESSING_FAILURE)
    })?;

    debug!("Counted {} ban events for {} addresses", counts.total(), counts.len());

    let graph_url = match renderer {
        Some(renderer) => renderer.render(&counts).context("Failed to render chart")?,
        None => {
            debug!("Chart rendering disabled");
            String::new()
        }
    };

    Ok(AnalysisReport::new(source_name, counts, graph_url))
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.log_path.as_os_str().is_empty() {
        anyhow::bail!("No file selected");
    }

    if args.max_bytes == 0 {
        anyhow::bail!("max_bytes must be greater than 0");
    }

    if args.top == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top > 1000 {
        anyhow::bail!("top is too large (max 1000)");
    }

    if args.chart_dir.is_some() && args.graph_url_prefix.is_empty() {
        anyhow::bail!("graph URL prefix cannot be empty");
    }

    Ok(())
}
