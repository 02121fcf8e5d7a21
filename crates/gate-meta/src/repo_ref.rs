//! Structured repository references
//!
//! Registry entries name their source repository loosely: a bare
//! `owner/name`, or a full GitHub URL with or without scheme and trailing
//! slash. [`RepoRef`] parses all of those once so URL builders never do
//! string surgery of their own.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{Error, Result};

/// Host used when a reference does not name one.
pub const DEFAULT_HOST: &str = "github.com";

/// A repository on a GitHub-compatible host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoRef {
    host: String,
    owner: String,
    name: String,
}

impl RepoRef {
    /// Parse a reference hosted on [`DEFAULT_HOST`].
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_host(input, DEFAULT_HOST)
    }

    /// Parse a reference, accepting URLs on `host` or bare `owner/name`.
    pub fn parse_with_host(input: &str, host: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidRepoRef {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);

        let host_prefix = format!("{host}/");
        let path = match without_scheme.strip_prefix(&host_prefix) {
            Some(path) => path,
            None if without_scheme.len() != trimmed.len() => {
                return Err(invalid(&format!("only {host} repositories are supported")));
            }
            None => without_scheme,
        };

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        let mut segments = path.split('/');
        let (Some(owner), Some(name), None) = (segments.next(), segments.next(), segments.next())
        else {
            return Err(invalid("expected 'owner/name'"));
        };

        for segment in [owner, name] {
            if segment.is_empty() {
                return Err(invalid("owner and name must not be empty"));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            {
                return Err(invalid(&format!("'{segment}' contains invalid characters")));
            }
        }

        Ok(Self {
            host: host.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `owner/name`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Browsable URL of the repository, also usable as a clone URL.
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.name)
    }

    /// Prefix under which the assets of release `tag` are downloadable.
    ///
    /// Always ends in `/` so asset names can be appended directly.
    pub fn release_download_url(&self, tag: &str) -> String {
        format!("{}/releases/download/{}/", self.web_url(), tag)
    }
}

impl FromStr for RepoRef {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
