//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gate_meta::{MatchMode, RegistryKind};

/// registry-gate - Validate changes to plugin and theme registries
#[derive(Parser, Debug)]
#[command(name = "registry-gate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root holding the registry files
    #[arg(short = 'C', long, global = true, default_value = ".", env = "REGISTRY_GATE_ROOT")]
    pub root: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate the registry change between a base and the working tree
    ///
    /// Examples:
    ///   registry-gate validate                        # working tree vs origin/main
    ///   registry-gate validate --base main --head pr  # two committed refs
    ///   registry-gate validate --pr 1234              # also label the pull request
    Validate {
        #[command(flatten)]
        refs: RefArgs,

        /// Pull request to label once the verdict is known
        #[arg(long, env = "REGISTRY_GATE_PR")]
        pr: Option<u64>,

        /// How changed paths are matched against registry file names
        #[arg(long = "match", value_name = "MODE")]
        match_mode: Option<MatchMode>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List the entries a change adds or re-versions
    Changes {
        /// Registry to inspect (plugins or themes)
        kind: RegistryKind,

        #[command(flatten)]
        refs: RefArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Find the release of a repository that carries an asset
    ///
    /// Examples:
    ///   registry-gate locate owner/plugin 1.2.0
    ///   registry-gate locate https://github.com/owner/theme 2.0 --asset theme.json
    Locate {
        /// Repository reference (owner/name or URL)
        repo: String,

        /// Version as recorded in the registry
        version: String,

        /// Asset the release must carry
        #[arg(long, default_value = "main.js")]
        asset: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check the format of a registry file
    Lint {
        /// Registry to check (plugins or themes)
        kind: RegistryKind,

        /// File to check instead of the configured registry file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

/// Git references a change is judged between
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RefArgs {
    /// Base reference [default: configured base_ref]
    #[arg(long)]
    pub base: Option<String>,

    /// Head reference [default: the working tree]
    #[arg(long)]
    pub head: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::parse_from([
            "registry-gate",
            "validate",
            "--base",
            "main",
            "--pr",
            "12",
            "--match",
            "basename",
            "--json",
        ]);

        assert_eq!(
            cli.command,
            Commands::Validate {
                refs: RefArgs {
                    base: Some("main".to_string()),
                    head: None,
                },
                pr: Some(12),
                match_mode: Some(MatchMode::Basename),
                json: true,
            }
        );
    }

    #[test]
    fn test_parse_registry_kind() {
        let cli = Cli::parse_from(["registry-gate", "-C", "/tmp/repo", "lint", "themes"]);
        assert_eq!(cli.root, PathBuf::from("/tmp/repo"));
        assert!(matches!(
            cli.command,
            Commands::Lint {
                kind: RegistryKind::Themes,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["registry-gate", "changes", "widgets"]).is_err());
    }

    #[test]
    fn test_locate_default_asset() {
        let cli = Cli::parse_from(["registry-gate", "locate", "owner/p", "1.0"]);
        match cli.command {
            Commands::Locate { asset, .. } => assert_eq!(asset, "main.js"),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
