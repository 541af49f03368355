//! xfmt - XAML/XML formatter CLI
//!
//! Formats `.xaml` files in place and lists names, keys and namespaces that
//! look unused.

mod discover;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xaml_fmt::{Error, FormatOptions, Formatted, Formatter, UsageReport};

use discover::{collect_targets, Target};

/// XAML/XML formatter
#[derive(Parser)]
#[command(name = "xfmt")]
#[command(version)]
#[command(about = "Formats XAML files and reports possibly unused names, keys and namespaces", long_about = None)]
struct Cli {
    /// Files ending in .xaml, or directories to search recursively
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// TOML file with formatter options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spaces per indentation level
    #[arg(short, long)]
    indent_size: Option<usize>,

    /// Element whose `Key` attribute is not a resource key (repeatable)
    #[arg(long = "exclude-key-element", value_name = "ELEMENT")]
    exclude_key_elements: Vec<String>,

    /// Write formatted files under this directory instead of in place
    #[arg(short, long, conflicts_with = "check")]
    output_dir: Option<PathBuf>,

    /// Report files that would change without writing anything
    #[arg(long)]
    check: bool,
}

/// Totals printed at the end of a run.
#[derive(Debug, Default)]
struct Summary {
    total: usize,
    formatted: usize,
    errors: usize,
    read_only: usize,
    would_change: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xfmt=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let options = match load_options(&cli) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let formatter = Formatter::with_options(options);

    let mut summary = Summary::default();
    for item in &cli.paths {
        for target in collect_targets(item) {
            summary.total += 1;
            println!("{}", target.path.display());
            run_target(&formatter, &cli, &target, &mut summary);
            println!();
        }
    }

    print_summary(&summary, cli.check);

    if summary.errors > 0 || summary.would_change > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Builds formatter options from the config file and command-line overrides.
fn load_options(cli: &Cli) -> xaml_fmt::Result<FormatOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            FormatOptions::load(path)?
        }
        None => FormatOptions::default(),
    };

    if let Some(indent_size) = cli.indent_size {
        options.indent_size = indent_size;
    }
    options
        .key_rewrite_exclusions
        .extend(cli.exclude_key_elements.iter().cloned());

    options.validate()?;
    Ok(options)
}

/// Formats one file and prints its report, recording the outcome.
fn run_target(formatter: &Formatter, cli: &Cli, target: &Target, summary: &mut Summary) {
    let result = if cli.check {
        check_file(formatter, &target.path).map(|(formatted, changed)| {
            if changed {
                summary.would_change += 1;
                println!("Would reformat.");
            }
            formatted
        })
    } else {
        let destination = match &cli.output_dir {
            Some(dir) => dir.join(&target.relative),
            None => target.path.clone(),
        };
        format_file(formatter, &target.path, &destination)
    };

    match result {
        Ok(formatted) => {
            summary.formatted += 1;
            if formatted.usage.is_empty() {
                debug!(path = %target.path.display(), "no unused declarations");
            } else {
                print_usage(&formatted.usage);
            }
        }
        Err(e) => {
            summary.errors += 1;
            if is_permission_denied(&e) {
                summary.read_only += 1;
            }
            if e.is_internal_defect() {
                error!(path = %target.path.display(), "{}", e);
            }
            println!("{}", e);
        }
    }
}

fn format_file(
    formatter: &Formatter,
    source: &Path,
    destination: &Path,
) -> xaml_fmt::Result<Formatted> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    info!(source = %source.display(), destination = %destination.display(), "formatting");
    formatter.format_file(source, destination)
}

/// Formats without writing; returns whether the file would change.
fn check_file(formatter: &Formatter, source: &Path) -> xaml_fmt::Result<(Formatted, bool)> {
    info!(source = %source.display(), "checking");
    let original = fs::read_to_string(source)?;
    let formatted = formatter.format_str(&original)?;
    let changed = formatted.text != original;
    Ok((formatted, changed))
}

fn is_permission_denied(error: &Error) -> bool {
    matches!(error, Error::Io(e) if e.kind() == io::ErrorKind::PermissionDenied)
}

fn print_usage(usage: &UsageReport) {
    print_list("Possibly unused x:Name's:", "Names", &usage.unused_names);
    print_list("Possibly unused x:Key's:", "Keys", &usage.unused_keys);
    print_list("Unused Namespaces:", "Namespaces", &usage.unused_namespaces);
}

fn print_list(heading: &str, noun: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}", heading);
    for item in items {
        println!("     {}", item);
    }
    println!("     {} {} listed.", items.len(), noun);
}

fn print_summary(summary: &Summary, check: bool) {
    println!(
        "Finished: {} files of {} total.",
        summary.formatted, summary.total
    );
    if check && summary.would_change > 0 {
        println!("{} files would be reformatted.", summary.would_change);
    }
    if summary.errors > 0 {
        println!("{} ERRORS OCCURRED", summary.errors);
    }
    if summary.read_only > 0 {
        println!(
            "{} destination files are read-only. Make sure you check the files out first.",
            summary.read_only
        );
    }
}
