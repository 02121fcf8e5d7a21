//! Command implementations for gate-cli

pub mod changes;
pub mod lint;
pub mod locate;
pub mod validate;

pub use changes::run_changes;
pub use lint::run_lint;
pub use locate::run_locate;
pub use validate::run_validate;

use colored::Colorize;

use gate_meta::{Level, ValidationVerdict};

/// Exit status for a verdict.
pub(crate) fn exit_code(verdict: &ValidationVerdict) -> i32 {
    if verdict.is_ok() { 0 } else { 1 }
}

/// Print every diagnostic, then a final PASS or FAIL line.
pub(crate) fn print_verdict(verdict: &ValidationVerdict) {
    for diagnostic in verdict.diagnostics() {
        match diagnostic.level {
            Level::Info => println!("  {} {}", "-".dimmed(), diagnostic.message),
            Level::Error => println!("  {} {}", "!".red(), diagnostic.message.red()),
        }
    }

    println!();
    if verdict.is_ok() {
        println!("{}", "PASS".green().bold());
    } else {
        let errors = verdict.errors().count();
        println!(
            "{} ({} problem{})",
            "FAIL".red().bold(),
            errors,
            if errors == 1 { "" } else { "s" }
        );
    }
}
