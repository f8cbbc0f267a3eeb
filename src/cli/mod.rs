//! CLI command definitions and handlers

mod audit;
mod checks;
mod init;

use anyhow::Result;
use auditor::scoring::Weighting;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate a 0-10 score threshold
fn parse_threshold(s: &str) -> Result<f64, String> {
    let n: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=10.0).contains(&n) {
        Err("threshold must be between 0 and 10".to_string())
    } else {
        Ok(n)
    }
}

/// Auditor - static compliance auditing
#[derive(Parser, Debug)]
#[command(name = "auditor")]
#[command(
    version,
    about = "Static compliance auditor: probe a project's files for required patterns \
             and score each category",
    long_about = "Auditor reads a fixed set of files from the target project, checks each one for \
the presence or absence of literal text, and scores every check 10 (pass) or 0 (fail). \
Scores are averaged per category into a report.\n\n\
Run without a subcommand to audit the current directory:\n  \
auditor .",
    after_help = "\
Examples:
  auditor .                              Audit current directory
  auditor /path/to/project audit --format json -o audit_results.json
  auditor . audit --fail-under 7.5       Exit code 1 if the overall score is below 7.5
  auditor . checks                       List configured checks
  auditor . init                         Write an example auditor.toml"
)]
pub struct Cli {
    /// Path to the audited project (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    /// Config file (default: auditor.toml or .auditorrc.json in the project)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all checks and print the report
    #[command(after_help = "\
Examples:
  auditor . audit                                    Text report
  auditor . audit --format json                      JSON report on stdout
  auditor . audit --format md -o AUDIT.md            Markdown report file
  auditor . audit --weighting impact                 Impact-weighted category scores
  auditor . audit --skip \"Task Tracking\"             Skip one check")]
    Audit {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file, or a directory to write audit_results.<ext> into (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if the overall score is below this value (0-10)
        #[arg(long, value_parser = parse_threshold)]
        fail_under: Option<f64>,

        /// Category averaging: unweighted (default) or impact
        #[arg(long)]
        weighting: Option<Weighting>,

        /// Skip checks by name
        #[arg(long)]
        skip: Vec<String>,
    },

    /// List configured checks without running them
    Checks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an example auditor.toml into the project
    Init,

    /// Show version information
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Audit {
            format,
            output,
            fail_under,
            weighting,
            skip,
        }) => audit::run(
            &cli.path,
            audit::AuditOptions {
                format,
                output,
                fail_under,
                weighting,
                skip,
                config: cli.config,
            },
        ),

        Some(Commands::Checks { json }) => checks::run(&cli.path, cli.config.as_deref(), json),

        Some(Commands::Init) => init::run(&cli.path),

        Some(Commands::Version) => {
            println!("auditor {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        None => {
            check_unknown_subcommand(&cli.path)?;
            audit::run(
                &cli.path,
                audit::AuditOptions {
                    config: cli.config,
                    ..Default::default()
                },
            )
        }
    }
}

/// Check if the path looks like a mistyped subcommand and bail with a helpful message
fn check_unknown_subcommand(path: &std::path::Path) -> Result<()> {
    let path_str = path.to_string_lossy();
    let looks_like_command = !path.exists()
        && !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.starts_with('.');
    if looks_like_command {
        anyhow::bail!(
            "Unknown command or missing path '{}'. Run 'auditor --help' for available commands.\n\n\
             Did you mean one of: audit, checks, init, version?",
            path_str
        );
    }
    Ok(())
}
