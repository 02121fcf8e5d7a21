//! Changes command implementation
//!
//! Prints the entries the validate command would check, without any
//! network access.

use colored::Colorize;
use serde_json::json;

use gate_core::{RegistrySnapshot, Revision};
use gate_git::GitRepository;
use gate_meta::RegistryKind;

use crate::context::Context;
use crate::error::Result;

/// Run the changes command
pub fn run_changes(context: &Context, kind: RegistryKind, json: bool) -> Result<i32> {
    let config = &context.config;
    let file = config.registries.file_for(kind);
    let vcs = GitRepository::open(&context.root)?;
    let head = Revision::from_option(config.git.head_ref.as_deref());

    let snapshot =
        RegistrySnapshot::load(&context.root, &vcs, kind, file, &config.git.base_ref, &head)?;
    let changes = snapshot.changes();

    if json {
        let output = json!({
            "registry": kind,
            "file": file,
            "base": config.git.base_ref,
            "base_available": snapshot.base.is_some(),
            "changes": changes,
            "skipped": snapshot.current.rejected(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(0);
    }

    println!(
        "{} {} ({} entries, base {})",
        "Changes".blue().bold(),
        file.yellow(),
        snapshot.current.len(),
        config.git.base_ref.yellow()
    );
    if snapshot.base.is_none() {
        println!(
            "  {} base unavailable; every entry counts as changed",
            "!".yellow()
        );
    }
    for rejected in snapshot.current.rejected() {
        println!("  {} {rejected}; skipped", "!".red());
    }
    println!();

    if changes.is_empty() {
        println!("{} No new or re-versioned entries.", "OK".green().bold());
        return Ok(0);
    }

    for changed in changes.iter() {
        println!(
            "  {} {} {} ({})",
            "+".green(),
            changed.entry.id.cyan(),
            changed.entry.version,
            changed.change.to_string().dimmed()
        );
    }

    Ok(0)
}
