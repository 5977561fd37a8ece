//! retree - SWC to typescript-estree translator
//!
//! This is the main CLI entry point that reads, parses, translates and
//! optionally verifies each input.

mod cli;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::{bail, Context};
use retree_core::{
    expand_globs, process_files_parallel, process_source, FileReport, KindCensus,
    ProcessOptions, ReferenceSource, TranslateConfig,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Args;
use clap::Parser;

/// How translated trees are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Indented JSON
    Pretty,
    /// One compact JSON document per line
    Json,
    None,
}

impl OutputFormat {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "pretty" => Some(OutputFormat::Pretty),
            "json" => Some(OutputFormat::Json),
            "none" => Some(OutputFormat::None),
            _ => None,
        }
    }

    fn valid_formats() -> &'static [&'static str] {
        &["pretty", "json", "none"]
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins, `-v` raises the default to debug
fn init_logging(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(rust_log) => EnvFilter::new(rust_log),
        Err(_) if verbose => EnvFilter::new("warn,retree=debug,retree_core=debug"),
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether every input passed
fn run(args: Args) -> anyhow::Result<bool> {
    let format = OutputFormat::from_str(&args.output).with_context(|| {
        format!(
            "invalid format '{}'. Valid formats: {}",
            args.output,
            OutputFormat::valid_formats().join(", ")
        )
    })?;

    let reference = args.reference.as_deref().map(|reference| match reference {
        "sibling" => ReferenceSource::Sibling,
        command => ReferenceSource::Command(command.to_string()),
    });
    let options = ProcessOptions {
        config: TranslateConfig::default().with_span_base(args.span_base),
        parser: args.parser.clone(),
        reference,
        check: args.check,
        census: args.kinds,
        concurrency: None,
    };

    let files = expand_globs(&args.files);
    let reports = if files.is_empty() {
        if !args.files.is_empty() {
            bail!("no files match {}", args.files.join(" "));
        }
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Usage: retree <files...> [OPTIONS]");
            eprintln!("   or: cat module.swc.json | retree");
            eprintln!("\nUse --help for more information.");
            bail!("no input files");
        }
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("cannot read stdin")?;
        vec![process_source("<stdin>", &text, &options)]
    } else {
        // Configure thread pool
        let concurrency = args.concurrency.unwrap_or_else(num_cpus::get);
        rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .build_global()
            .ok();
        debug!(files = files.len(), concurrency, "processing");
        process_files_parallel(&files, &options)
    };

    print_outputs(&reports, format)?;
    let passed = report_failures(&reports);

    if args.kinds {
        let mut census = KindCensus::new();
        for report in &reports {
            if let Some(counts) = &report.census {
                census.merge(counts.clone());
            }
        }
        print!("{}", census.report());
    }

    Ok(passed)
}

fn print_outputs(reports: &[FileReport], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::None {
        return Ok(());
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in reports {
        let Some(output) = &report.output else {
            continue;
        };
        let text = match format {
            OutputFormat::Pretty => serde_json::to_string_pretty(output)?,
            _ => serde_json::to_string(output)?,
        };
        writeln!(out, "{}", text)?;
    }
    out.flush()?;
    Ok(())
}

/// Print every failure, divergence and violation to stderr
fn report_failures(reports: &[FileReport]) -> bool {
    let mut passed = true;
    let (mut failed, mut differing, mut violating) = (0usize, 0usize, 0usize);

    for report in reports {
        if let Some(error) = &report.error {
            eprintln!("error: {}", error);
            failed += 1;
        }
        if let Some(difference) = &report.difference {
            eprintln!("{}: differs from reference at {}", report.path, difference);
            differing += 1;
        }
        for violation in &report.violations {
            eprintln!("{}: {}", report.path, violation);
        }
        if !report.violations.is_empty() {
            violating += 1;
        }
        passed &= report.is_ok();
    }

    if reports.len() > 1 || !passed {
        eprintln!(
            "{} files: {} failed, {} differ, {} with violations",
            reports.len(),
            failed,
            differing,
            violating
        );
    }
    passed
}
