//! Fail2Ban Analyzer CLI
//!
//! Counts banned IPs in a fail2ban log and renders a bar chart of ban
//! frequency per address.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use fail2ban_analyzer::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};
use fail2ban_analyzer::utils::config::{
    DEFAULT_CHART_DIR, DEFAULT_GRAPH_URL_PREFIX, DEFAULT_MAX_LOG_BYTES, DEFAULT_TOP_OFFENDERS,
};

/// Fail2Ban Analyzer - ban frequency per IP address
#[derive(Parser, Debug)]
#[command(name = "fail2ban-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Count bans per IP and render a chart
    Analyze {
        /// Path to the fail2ban log file
        #[arg(short, long)]
        log: PathBuf,

        /// Output path for the JSON report (printed to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory the chart is written to
        #[arg(long, env = "FAIL2BAN_ANALYZER_CHART_DIR", default_value = DEFAULT_CHART_DIR)]
        chart_dir: PathBuf,

        /// Prefix of the graph URL placed in the report
        #[arg(long, env = "FAIL2BAN_ANALYZER_GRAPH_URL_PREFIX", default_value = DEFAULT_GRAPH_URL_PREFIX)]
        graph_url_prefix: String,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Skip chart rendering
        #[arg(long)]
        no_chart: bool,

        /// Largest accepted log file in bytes
        #[arg(long, env = "FAIL2BAN_ANALYZER_MAX_BYTES", default_value_t = DEFAULT_MAX_LOG_BYTES)]
        max_bytes: u64,

        /// Number of top offenders in the summary
        #[arg(long, default_value_t = DEFAULT_TOP_OFFENDERS)]
        top: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            log,
            output,
            chart_dir,
            graph_url_prefix,
            title,
            no_chart,
            max_bytes,
            top,
            summary,
        } => {
            let args = AnalyzeArgs {
                log_path: log,
                output_json: output,
                chart_dir: (!no_chart).then_some(chart_dir),
                graph_url_prefix,
                chart_title: title,
                max_bytes,
                top,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_analyze(&args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
