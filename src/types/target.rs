// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

/// An organization or repository that receives Actions secrets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Org { org: String },
    Repo { org: String, repo: String },
}

impl Target {
    pub fn org(org: impl Into<String>) -> Self {
        Target::Org { org: org.into() }
    }

    pub fn repo(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Target::Repo {
            org: org.into(),
            repo: repo.into(),
        }
    }

    /// Short label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Target::Org { .. } => "org",
            Target::Repo { .. } => "repo",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Org { org } => write!(f, "{}", org),
            Target::Repo { org, repo } => write!(f, "{}/{}", org, repo),
        }
    }
}
