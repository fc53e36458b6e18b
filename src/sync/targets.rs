// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Parsing of the configured org and repo target lists

use crate::error::ResolutionError;
use crate::sync::split_list;
use crate::types::Target;

/// Validated targets plus the specifiers that were rejected
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub targets: Vec<Target>,
    pub errors: Vec<ResolutionError>,
}

impl Resolution {
    fn push(&mut self, target: Target) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }
}

/// Resolve comma-separated org and `org/repo` lists into targets.
///
/// Org targets come first, then repo targets, each in input order with
/// duplicates dropped. A malformed repo entry is reported in
/// [`Resolution::errors`] and does not stop the remaining entries.
pub fn resolve_targets(raw_orgs: &str, raw_repos: &str) -> Resolution {
    let mut resolution = Resolution::default();

    for org in split_list(raw_orgs) {
        resolution.push(Target::org(org));
    }

    for segment in split_list(raw_repos) {
        match parse_repo(segment) {
            Ok(target) => resolution.push(target),
            Err(e) => resolution.errors.push(e),
        }
    }

    resolution
}

/// Parse a single `org/repo` specifier. Exactly one `/` with both sides
/// non-empty is accepted.
pub fn parse_repo(raw: &str) -> Result<Target, ResolutionError> {
    let parts: Vec<&str> = raw.split('/').map(str::trim).collect();

    match parts.as_slice() {
        [org, repo] if !org.is_empty() && !repo.is_empty() => Ok(Target::repo(*org, *repo)),
        _ => Err(ResolutionError::invalid_repo_format(raw)),
    }
}
