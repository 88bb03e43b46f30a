//! Web Analyzer main entry point
//!
//! This is the command-line interface for the single-page web analyzer.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use web_analyzer::config::{load_config_with_hash, Config};
use web_analyzer::output::{
    render_failure, render_report, write_output, AnalysisOutput, FailureOutput, OutputFormat,
};
use web_analyzer::{validate_target_url, Analyzer, AnalyzerError, FailureKind};

/// Web Analyzer: report on the structure and links of one web page
///
/// Fetches the page, reports its HTML version, title, heading counts,
/// internal/external/inaccessible links and whether it has a login form.
#[derive(Parser, Debug)]
#[command(name = "web-analyzer")]
#[command(version)]
#[command(about = "Analyze the structure and links of a web page", long_about = None)]
struct Cli {
    /// Absolute http(s) URL of the page to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return report_failure(&cli, &e);
        }
    };

    if cli.show_config {
        print_config(&config);
        return ExitCode::SUCCESS;
    }

    let target = match validate_target_url(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Rejected target {}: {}", cli.url, e);
            let failure = FailureOutput {
                url: cli.url.clone(),
                error: FailureKind::InvalidUrl.as_str(),
                message: e.to_string(),
                status_code: None,
            };
            emit(&cli, render_failure(&failure, cli.format));
            return exit_code(FailureKind::InvalidUrl);
        }
    };

    let analyzer = match Analyzer::new(config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            tracing::error!("Failed to initialize analyzer: {}", e);
            return report_failure(&cli, &e);
        }
    };

    let started = Instant::now();
    match analyzer.analyze(target.as_str()).await {
        Ok(report) => {
            let output = AnalysisOutput::new(target.as_str(), report, started.elapsed());
            if emit(&cli, render_report(&output, cli.format)) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            report_failure(&cli, &e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_analyzer=info,warn"),
            1 => EnvFilter::new("web_analyzer=debug,info"),
            2 => EnvFilter::new("web_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file when one is given, otherwise the defaults
fn load_configuration(path: Option<&Path>) -> Result<Config, AnalyzerError> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Ok(Config::default())
        }
    }
}

/// Handles --show-config: prints the effective settings
fn print_config(config: &Config) {
    println!("Fetch:");
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nLinks:");
    println!("  Max workers: {}", config.links.max_workers);
    println!("  Deadline: {}s", config.links.deadline_secs);
    println!("  Probe timeout: {}s", config.links.probe_timeout_secs);
    println!("  Max redirects: {}", config.links.max_redirects);

    println!("\nParser:");
    println!("  Max depth: {}", config.parser.max_depth);
}

/// Renders a failure for the caller and maps it to an exit code
fn report_failure(cli: &Cli, error: &AnalyzerError) -> ExitCode {
    let failure = FailureOutput::from_error(cli.url.as_str(), error);
    emit(cli, render_failure(&failure, cli.format));
    exit_code(error.kind())
}

/// Writes rendered output to the requested destination; returns false on failure
fn emit(cli: &Cli, rendered: web_analyzer::output::OutputResult<String>) -> bool {
    let result = rendered.and_then(|text| match &cli.output {
        Some(path) => {
            write_output(&text, path)?;
            tracing::info!("Report written to: {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", text);
            Ok(())
        }
    });

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Failed to write output: {}", e);
            false
        }
    }
}

fn exit_code(kind: FailureKind) -> ExitCode {
    let code = match kind {
        FailureKind::BadStatus => 2,
        FailureKind::Transport => 3,
        FailureKind::Timeout => 4,
        FailureKind::Parse => 5,
        FailureKind::InvalidUrl => 64,
        FailureKind::Internal => 1,
    };
    ExitCode::from(code)
}
