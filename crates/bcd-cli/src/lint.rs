//! # Lint Subcommand
//!
//! Runs the consistency checker over every discovered data file and renders
//! the findings.
//!
//! Exit codes: 0 when every file is clean, 1 when any file has findings,
//! 2 when a file could not be read, parsed, or walked.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use bcd_consistency::{check_document, ConsistencyReport};

use crate::config::{LintConfig, OutputFormat};
use crate::discover::find_json_files;

/// Arguments for the `bcd lint` subcommand.
#[derive(Args, Debug, Default)]
pub struct LintArgs {
    /// Files or directories to check. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format (overrides the config file).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Stop at the first file with findings or errors.
    #[arg(long)]
    pub fail_fast: bool,

    /// File or directory name to skip. Repeatable; adds to the config file list.
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,
}

/// Result of checking one file.
#[derive(Debug, Serialize)]
pub struct FileOutcome {
    /// The file that was checked.
    pub file: PathBuf,
    /// Findings, in document order.
    pub features: ConsistencyReport,
}

/// Execute the lint subcommand, writing findings to stdout.
pub fn run_lint(args: &LintArgs, config: &LintConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_lint_to(args, config, &mut out)
}

/// Execute the lint subcommand, writing findings to `out`.
pub fn run_lint_to(args: &LintArgs, config: &LintConfig, out: &mut impl Write) -> Result<u8> {
    let settings = merge_settings(args, config);

    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };
    let files = find_json_files(&roots, &settings.exclude);
    tracing::info!(files = files.len(), "discovered data files");

    let mut outcomes = Vec::new();
    let mut operational_errors = 0usize;

    for path in &files {
        match check_file(path) {
            Ok(report) => {
                let clean = report.is_clean();
                tracing::debug!(
                    file = %path.display(),
                    violations = report.violation_count(),
                    "checked file"
                );
                outcomes.push(FileOutcome {
                    file: path.clone(),
                    features: report,
                });
                if !clean && settings.fail_fast {
                    tracing::info!(file = %path.display(), "stopping at first file with findings");
                    break;
                }
            }
            Err(e) => {
                tracing::error!(file = %path.display(), "{e:#}");
                operational_errors += 1;
                if settings.fail_fast {
                    break;
                }
            }
        }
    }

    match settings.format {
        OutputFormat::Text => render_text(out, &outcomes, operational_errors)?,
        OutputFormat::Json => render_json(out, &outcomes)?,
    }

    let has_findings = outcomes.iter().any(|o| !o.features.is_clean());
    Ok(if operational_errors > 0 {
        2
    } else if has_findings {
        1
    } else {
        0
    })
}

/// Load, parse, and check one data file.
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid JSON, or its root is not
/// an object.
pub fn check_file(path: &Path) -> Result<ConsistencyReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let document: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    check_document(&document).with_context(|| format!("cannot check {}", path.display()))
}

fn merge_settings(args: &LintArgs, config: &LintConfig) -> LintConfig {
    let mut exclude = config.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());
    LintConfig {
        exclude,
        format: args.format.unwrap_or(config.format),
        fail_fast: args.fail_fast || config.fail_fast,
    }
}

fn render_text(out: &mut impl Write, outcomes: &[FileOutcome], errors: usize) -> Result<()> {
    let mut problems = 0usize;
    let mut failing_files = 0usize;

    for outcome in outcomes.iter().filter(|o| !o.features.is_clean()) {
        let count = outcome.features.violation_count();
        problems += count;
        failing_files += 1;
        writeln!(
            out,
            "FAIL: {}: {} consistency problem(s)",
            outcome.file.display(),
            count
        )?;
        for line in outcome.features.to_string().lines() {
            writeln!(out, "  {line}")?;
        }
    }

    // Files that could not be checked count toward the total but never pass.
    writeln!(
        out,
        "Consistency: {}/{} file(s) passed, {} problem(s), {} error(s)",
        outcomes.len() - failing_files,
        outcomes.len() + errors,
        problems,
        errors
    )?;
    Ok(())
}

fn render_json(out: &mut impl Write, outcomes: &[FileOutcome]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcomes).context("failed to write JSON report")?;
    writeln!(out)?;
    Ok(())
}
