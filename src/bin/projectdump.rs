//! projectdump CLI - Summarize one or more codebases into markdown.

use std::path::PathBuf;

use clap::Parser;
use projectdump::builder::scan_all;
use projectdump::detect::PatternSet;
use projectdump::errors::{exit_code, ProjectDumpError};
use projectdump::filter::{FilterConfig, DEFAULT_MAX_FILE_SIZE};
use projectdump::report::{format_report, timestamp_now, write_report, OutputFormat, ReportOptions};
use projectdump::walker::WalkOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "projectdump")]
#[command(about = "Summarize a codebase's stack, layout, and sources into one markdown document")]
#[command(version)]
struct Cli {
    /// Project directories to analyze
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Skip files larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Honor .gitignore files
    #[arg(long)]
    respect_gitignore: bool,

    /// Follow symbolic links
    #[arg(long)]
    follow_symlinks: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<(), ProjectDumpError> {
    if let Some(missing) = cli.paths.iter().find(|p| !p.exists()) {
        return Err(ProjectDumpError::PathNotFound(missing.clone()));
    }

    let filter_config = FilterConfig::default().max_file_size(cli.max_file_size);
    let patterns = PatternSet::builtin();
    let walk_options = WalkOptions {
        respect_gitignore: cli.respect_gitignore,
        follow_symlinks: cli.follow_symlinks,
    };

    for path in &cli.paths {
        info!("Analyzing project at: {}", path.display());
    }
    let scans = scan_all(&cli.paths, &filter_config, &patterns, &walk_options)?;

    let options = ReportOptions {
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Markdown
        },
        ..Default::default()
    };
    let report = format_report(&scans, &options, &timestamp_now())?;

    write_report(&report, cli.output.as_deref())?;
    if let Some(output) = &cli.output {
        info!("Output written to: {}", output.display());
    }

    Ok(())
}
