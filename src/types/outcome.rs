// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::exit;
use crate::error::ApiError;
use crate::types::target::Target;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Success,
    /// Recorded in dry-run mode instead of calling the platform
    Skipped,
    Failed,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncStatus::Success => "success",
            SyncStatus::Skipped => "skipped",
            SyncStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result of one (target, secret) attempt
#[derive(Debug)]
pub struct SyncOutcome {
    pub target: Target,
    pub secret_name: String,
    pub status: SyncStatus,
    pub error: Option<ApiError>,
}

impl SyncOutcome {
    pub fn success(target: &Target, secret_name: &str) -> Self {
        Self::new(target, secret_name, SyncStatus::Success, None)
    }

    pub fn skipped(target: &Target, secret_name: &str) -> Self {
        Self::new(target, secret_name, SyncStatus::Skipped, None)
    }

    pub fn failed(target: &Target, secret_name: &str, error: ApiError) -> Self {
        Self::new(target, secret_name, SyncStatus::Failed, Some(error))
    }

    fn new(
        target: &Target,
        secret_name: &str,
        status: SyncStatus,
        error: Option<ApiError>,
    ) -> Self {
        Self {
            target: target.clone(),
            secret_name: secret_name.to_string(),
            status,
            error,
        }
    }
}

/// Append-only outcome log of a single run
#[derive(Debug, Default)]
pub struct SyncReport {
    outcomes: Vec<SyncOutcome>,
    cancelled: bool,
}

impl SyncReport {
    pub(crate) fn record(&mut self, outcome: SyncOutcome) {
        self.outcomes.push(outcome);
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn outcomes(&self) -> &[SyncOutcome] {
        &self.outcomes
    }

    /// Whether the run stopped early because of a shutdown signal
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn count(&self, status: SyncStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.status == SyncStatus::Failed)
    }

    /// Targets with at least one failed outcome, in run order
    pub fn failed_targets(&self) -> Vec<&Target> {
        let mut targets: Vec<&Target> = Vec::new();
        for outcome in self.outcomes.iter().filter(|o| o.status == SyncStatus::Failed) {
            if !targets.contains(&&outcome.target) {
                targets.push(&outcome.target);
            }
        }
        targets
    }

    pub fn exit_code(&self) -> u8 {
        if self.cancelled {
            exit::INTERRUPTED
        } else if self.has_failures() {
            exit::FAILURE
        } else {
            exit::SUCCESS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn forbidden() -> ApiError {
        ApiError::Status {
            status: StatusCode::FORBIDDEN,
            message: "forbidden".to_string(),
        }
    }

    #[test]
    fn test_empty_report_exits_cleanly() {
        let report = SyncReport::default();

        assert!(!report.has_failures());
        assert_eq!(report.exit_code(), exit::SUCCESS);
    }

    #[test]
    fn test_counts_per_status() {
        let org = Target::org("orgA");
        let mut report = SyncReport::default();
        report.record(SyncOutcome::success(&org, "A"));
        report.record(SyncOutcome::success(&org, "B"));
        report.record(SyncOutcome::skipped(&org, "C"));

        assert_eq!(report.count(SyncStatus::Success), 2);
        assert_eq!(report.count(SyncStatus::Skipped), 1);
        assert_eq!(report.count(SyncStatus::Failed), 0);
        assert_eq!(report.exit_code(), exit::SUCCESS);
    }

    #[test]
    fn test_failure_sets_exit_code() {
        let org = Target::org("orgA");
        let repo = Target::repo("orgA", "repo1");
        let mut report = SyncReport::default();
        report.record(SyncOutcome::success(&org, "A"));
        report.record(SyncOutcome::failed(&repo, "A", forbidden()));

        assert!(report.has_failures());
        assert_eq!(report.failed_targets(), vec![&repo]);
        assert_eq!(report.exit_code(), exit::FAILURE);
    }

    #[test]
    fn test_failed_targets_are_deduplicated() {
        let org = Target::org("orgA");
        let mut report = SyncReport::default();
        report.record(SyncOutcome::failed(&org, "A", forbidden()));
        report.record(SyncOutcome::failed(&org, "B", forbidden()));

        assert_eq!(report.failed_targets().len(), 1);
    }

    #[test]
    fn test_cancelled_takes_precedence() {
        let org = Target::org("orgA");
        let mut report = SyncReport::default();
        report.record(SyncOutcome::failed(&org, "A", forbidden()));
        report.mark_cancelled();

        assert!(report.cancelled());
        assert_eq!(report.exit_code(), exit::INTERRUPTED);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SyncStatus::Success.to_string(), "success");
        assert_eq!(SyncStatus::Skipped.to_string(), "skipped");
        assert_eq!(SyncStatus::Failed.to_string(), "failed");
    }
}
