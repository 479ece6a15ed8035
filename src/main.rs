//! CLI entry point for canopy

use std::io::{self, BufWriter, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use canopy::output::DEFAULT_IGNORE_NAMES;
use canopy::{ExitStatus, OutputConfig, Request, WalkerConfig, run};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Separator between names given in a single --ignore value
#[cfg(windows)]
const LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const LIST_SEPARATOR: char = ':';

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "List a directory tree, read concurrently")]
#[command(version)]
struct Args {
    /// Directory to display
    path: Option<PathBuf>,

    /// Directory to display (alternative to the positional argument)
    #[arg(long = "root", value_name = "PATH", conflicts_with = "path")]
    root: Option<PathBuf>,

    /// Directory names to list without descending into (repeatable, or
    /// several names joined by the path list separator)
    #[arg(
        short = 'I',
        long = "ignore",
        value_name = "NAME",
        value_delimiter = LIST_SEPARATOR,
        default_values_t = DEFAULT_IGNORE_NAMES.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    ignore: Vec<String>,

    /// List directories only
    #[arg(short = 'd', long = "dirs-only")]
    dirs_only: bool,

    /// Print the full path of each entry
    #[arg(short = 'f', long = "full-path")]
    full_path: bool,

    /// Print the number of directories and files after the listing
    #[arg(long = "total")]
    total: bool,

    /// Stop at the first unreadable directory and print nothing
    #[arg(long = "abort")]
    abort: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Disable colors (same as --color never)
    #[arg(long = "no-color")]
    no_color: bool,

    /// Number of worker threads reading directories (0 = auto-detect)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Output the listing as JSON
    #[arg(long = "json")]
    json: bool,

    /// Do not report unreadable directories
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,

    /// Report traversal details
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn setup_logging(quiet: bool, verbose: bool) -> Result<(), String> {
    if quiet {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("canopy=debug")
        } else {
            EnvFilter::new("canopy=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            // --help and --version
            let _ = e.print();
            return ExitStatus::Success.into();
        }
        Err(e) => {
            let _ = e.print();
            return ExitStatus::Initialize.into();
        }
    };

    if let Err(e) = setup_logging(args.quiet, args.verbose) {
        eprintln!("canopy: cannot set up logging: {}", e);
        return ExitStatus::Initialize.into();
    }

    let request = Request {
        root: args
            .root
            .or(args.path)
            .unwrap_or_else(|| PathBuf::from(".")),
        walker: WalkerConfig {
            parallel_workers: args.jobs,
            abort_on_error: args.abort,
            ..Default::default()
        },
        output: OutputConfig {
            use_color: !args.json && !args.no_color && should_use_color(args.color),
            full_path: args.full_path,
            dirs_only: args.dirs_only,
            show_totals: args.total,
            ignore_names: args.ignore.into_iter().filter(|s| !s.is_empty()).collect(),
        },
        json: args.json,
    };

    let mut stdout = BufWriter::new(io::stdout().lock());
    match run(&mut stdout, &request) {
        Ok(report) => report.exit_status().into(),
        Err(e) => {
            eprintln!("canopy: {}", e);
            e.exit_status().into()
        }
    }
}
