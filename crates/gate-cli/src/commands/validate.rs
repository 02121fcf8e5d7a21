//! Validate command implementation
//!
//! Runs the full pipeline against the repository at the context root.

use colored::Colorize;
use serde_json::json;

use gate_core::{CommandLabeler, Outcome, Pipeline, PipelineReport, ReqwestProbe};
use gate_git::GitRepository;

use super::print_verdict;
use crate::context::Context;
use crate::error::Result;

/// Run the validate command, returning the exit status.
///
/// When `pr` is given and a label command is configured, the pull request
/// is labeled after the verdict is known.
pub async fn run_validate(context: &Context, pr: Option<u64>, json: bool) -> Result<i32> {
    let vcs = GitRepository::open(&context.root)?;
    let http = ReqwestProbe::new(&context.config.http)?;

    let mut pipeline = Pipeline::new(&context.root, context.config.clone(), &vcs, &http);
    if let Some(pr) = pr {
        match CommandLabeler::from_command(&context.config.labels.command) {
            Some(labeler) => pipeline = pipeline.with_labeler(labeler, pr),
            None => tracing::warn!(pr, "No label command configured; not labeling"),
        }
    }

    let report = pipeline.run().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_report(context, &report);
    }

    Ok(report.exit_code())
}

fn report_json(report: &PipelineReport) -> serde_json::Value {
    json!({
        "success": report.passed(),
        "classification": report.classification,
        "outcome": report.outcome,
        "registry": report.registry,
        "changed_paths": report.changed_paths,
        "entries": report.entries,
        "diagnostics": report.verdict.diagnostics(),
    })
}

fn print_report(context: &Context, report: &PipelineReport) {
    let base = &context.config.git.base_ref;
    let head = context.config.git.head_ref.as_deref().unwrap_or("working tree");

    println!(
        "{} {} ({}..{})",
        "Validate".blue().bold(),
        report.classification.to_string().cyan(),
        base.yellow(),
        head.yellow()
    );

    match report.outcome {
        Outcome::Rejected | Outcome::Skipped => {}
        Outcome::Concluded => {
            if !report.entries.is_empty() {
                println!();
                println!("{}", "Changed entries:".bold());
                for entry in &report.entries {
                    let mark = if entry.verdict.is_ok() {
                        "+".green()
                    } else {
                        "!".red()
                    };
                    println!(
                        "  {} {} {} ({})",
                        mark,
                        entry.id.cyan(),
                        entry.version,
                        entry.change.to_string().dimmed()
                    );
                }
            }
        }
    }

    println!();
    print_verdict(&report.verdict);
}
