//! The registry-change validation pipeline
//!
//! ```text
//! Start -> Classified -> Rejected   (both registries touched)
//!                     -> Skipped    (no registry touched)
//!                     -> Validating -> Concluded(pass | fail)
//! ```
//!
//! Validation never stops at the first failure: every stage and every
//! changed entry is checked and the verdict is the AND of all of them. The
//! only early exit is the exclusivity rule, which is decided before any
//! registry is read or any request is made.

use std::path::PathBuf;

use serde::Serialize;

use gate_git::VersionControl;
use gate_meta::{GateConfig, Registry, RegistryEntry, RegistryKind, RepoRef, ValidationVerdict};

use crate::{Error, Result};
use crate::changeset::ChangeKind;
use crate::classify::ChangeClassification;
use crate::format::{FormatCheck, LintFormatCheck};
use crate::http::HttpProbe;
use crate::labels::{LabelPlan, Labeler};
use crate::release::ReleaseValidator;
use crate::scan::{CommandScanner, ContentScanner};
use crate::snapshot::{RegistrySnapshot, Revision};

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Exclusivity violation; nothing was validated.
    Rejected,
    /// No registry touched; nothing to validate.
    Skipped,
    /// Validation ran to completion.
    Concluded,
}

/// Result of validating one changed entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub id: String,
    pub version: String,
    pub change: ChangeKind,
    pub verdict: ValidationVerdict,
}

/// Everything a run found.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub classification: ChangeClassification,
    pub outcome: Outcome,
    pub changed_paths: Vec<String>,
    /// Registry that was validated, for concluded runs.
    pub registry: Option<RegistryKind>,
    pub entries: Vec<EntryReport>,
    /// Aggregate over every stage and entry.
    pub verdict: ValidationVerdict,
}

impl PipelineReport {
    fn new(classification: ChangeClassification, changed_paths: Vec<String>) -> Self {
        Self {
            classification,
            outcome: Outcome::Concluded,
            changed_paths,
            registry: None,
            entries: Vec::new(),
            verdict: ValidationVerdict::pass(),
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.is_ok()
    }

    /// Process exit status for this report: 0 on pass, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

/// Orchestrates one validation run over a repository.
pub struct Pipeline<'a> {
    root: PathBuf,
    config: GateConfig,
    vcs: &'a dyn VersionControl,
    http: &'a dyn HttpProbe,
    format: Box<dyn FormatCheck>,
    scanner: Option<Box<dyn ContentScanner>>,
    labeler: Option<(Box<dyn Labeler>, u64)>,
}

impl<'a> Pipeline<'a> {
    /// A pipeline over the repository at `root`.
    ///
    /// The format check is the built-in lint and the content scanner comes
    /// from `config.scan`; no labeler is attached.
    pub fn new(
        root: impl Into<PathBuf>,
        config: GateConfig,
        vcs: &'a dyn VersionControl,
        http: &'a dyn HttpProbe,
    ) -> Self {
        let format: Box<dyn FormatCheck> =
            Box::new(LintFormatCheck::new(config.http.github_host.clone()));
        let scanner = CommandScanner::from_command(&config.scan.command)
            .map(|s| Box::new(s) as Box<dyn ContentScanner>);

        Self {
            root: root.into(),
            config,
            vcs,
            http,
            format,
            scanner,
            labeler: None,
        }
    }

    pub fn with_format_check(mut self, check: impl FormatCheck + 'static) -> Self {
        self.format = Box::new(check);
        self
    }

    pub fn with_scanner(mut self, scanner: impl ContentScanner + 'static) -> Self {
        self.scanner = Some(Box::new(scanner));
        self
    }

    /// Label `pull_request` once the verdict is final.
    pub fn with_labeler(mut self, labeler: impl Labeler + 'static, pull_request: u64) -> Self {
        self.labeler = Some((Box::new(labeler), pull_request));
        self
    }

    /// Paths changed by the proposal.
    ///
    /// Fails with [`Error::ReferenceUnavailable`] when the diff cannot be
    /// computed, for example when the base was never fetched.
    pub fn changed_paths(&self) -> Result<Vec<String>> {
        let base = &self.config.git.base_ref;
        let result = match &self.config.git.head_ref {
            Some(head) => self.vcs.diff_names_between(base, head),
            None => self.vcs.diff_names(base),
        };

        result.map_err(|e| Error::ReferenceUnavailable {
            reference: base.clone(),
            message: e.to_string(),
        })
    }

    /// Run the pipeline to a verdict.
    pub async fn run(&self) -> PipelineReport {
        let registries = &self.config.registries;

        // Without a diff nothing proves which registry is untouched, so both
        // count as changed and the exclusivity rule rejects the run.
        let (changed_paths, unavailable) = match self.changed_paths() {
            Ok(paths) => (paths, None),
            Err(e) => {
                tracing::warn!("{e}; assuming every registry changed");
                let every = vec![registries.plugins.clone(), registries.themes.clone()];
                (every, Some(e))
            }
        };

        let classification = ChangeClassification::classify(
            &changed_paths,
            registries,
            self.config.classifier.match_mode,
        );
        tracing::info!(classification = %classification, "Change classified");

        let mut report = PipelineReport::new(classification, changed_paths);

        match classification.kind() {
            Some(kind) => self.validate(kind, &mut report).await,
            None if classification == ChangeClassification::Both => {
                let violation = match unavailable {
                    Some(e) => Error::PolicyViolation {
                        message: format!(
                            "{e}; cannot tell which registry changed, fetch the base and re-run"
                        ),
                    },
                    None => Error::PolicyViolation {
                        message: format!(
                            "A single change may not modify both {} and {}; \
                             split it into separate pull requests",
                            registries.plugins, registries.themes
                        ),
                    },
                };
                tracing::error!("{violation}");
                report.outcome = Outcome::Rejected;
                report.verdict.error(violation.to_string());
            }
            None => {
                report.outcome = Outcome::Skipped;
                report
                    .verdict
                    .info("No registry file changed; nothing to validate");
            }
        }

        self.label(&report).await;
        report
    }

    async fn validate(&self, kind: RegistryKind, report: &mut PipelineReport) {
        report.registry = Some(kind);
        report.outcome = Outcome::Concluded;

        let file = self.config.registries.file_for(kind).to_string();
        let head = Revision::from_option(self.config.git.head_ref.as_deref());

        let content = match head.read(&self.root, self.vcs, &file) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(file = %file, error = %e, "Registry unreadable");
                report.verdict.error(format!("{file}: {e}"));
                return;
            }
        };

        // (1) whole-file format
        let format = self.format.check(kind, &content);
        report.verdict.merge(format.with_prefix(&file));

        let current = match Registry::parse(kind, &content) {
            Ok(registry) => registry,
            Err(e) => {
                report.verdict.error(format!("{file}: {e}"));
                return;
            }
        };
        for rejected in current.rejected() {
            report
                .verdict
                .error(format!("{file}: {rejected}; not validated"));
        }

        let snapshot =
            RegistrySnapshot::with_base(current, self.vcs, &self.config.git.base_ref, &file);
        let changes = snapshot.changes();
        tracing::info!(registry = %kind, changed = changes.len(), "Resolved change set");

        if changes.is_empty() {
            report
                .verdict
                .info(format!("{file}: no new or re-versioned entries"));
        }

        // (2) content scan of each changed plugin's repository
        let mut scans = Vec::new();
        if kind == RegistryKind::Plugins && !changes.is_empty() {
            if self.scanner.is_none() {
                report
                    .verdict
                    .info("Content scan not configured; skipped");
            }
            for changed in changes.iter() {
                scans.push(self.scan(&changed.entry).await);
            }
        }

        // (3) release checks, entry by entry
        let validator = ReleaseValidator::new(self.http, self.config.http.github_host.clone());
        let mut scans = scans.into_iter();

        for changed in changes {
            let entry = changed.entry;
            let mut verdict = scans.next().unwrap_or_default();
            verdict.merge(validator.validate(kind, &entry).await);

            if verdict.is_ok() {
                tracing::info!(entry = %entry.id, version = %entry.version, "Entry passed");
            } else {
                tracing::warn!(entry = %entry.id, version = %entry.version, "Entry failed");
            }

            report.verdict.merge(verdict.clone().with_prefix(&entry.id));
            report.entries.push(EntryReport {
                id: entry.id,
                version: entry.version,
                change: changed.change,
                verdict,
            });
        }
    }

    async fn scan(&self, entry: &RegistryEntry) -> ValidationVerdict {
        let Some(scanner) = &self.scanner else {
            return ValidationVerdict::pass();
        };

        match RepoRef::parse_with_host(&entry.repo, &self.config.http.github_host) {
            Ok(repo) => scanner.scan(&repo).await,
            Err(e) => {
                // The release check reports the bad reference for this entry.
                tracing::debug!(
                    entry = %entry.id,
                    error = %e,
                    "Not scanning unparsable repository"
                );
                ValidationVerdict::pass()
            }
        }
    }

    async fn label(&self, report: &PipelineReport) {
        let Some((labeler, pull_request)) = &self.labeler else {
            return;
        };

        let plan = LabelPlan::for_outcome(report.classification, report.passed());
        if let Err(e) = labeler.apply(*pull_request, &plan).await {
            tracing::warn!(pr = *pull_request, error = %e, "Labeling failed; verdict unaffected");
        }
    }
}
