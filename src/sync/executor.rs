// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Sequential push of every collected secret to every resolved target.

use crate::config::RunConfig;
use crate::error::ApiError;
use crate::gitea::{SecretRecord, SecretsApi};
use crate::shutdown::CancelFlag;
use crate::types::{SecretEntry, SyncOutcome, SyncReport, Target};
use tracing::{error, info, instrument, warn};

/// Drives the upserts for one run.
///
/// Work is strictly sequential, target-major and secret-minor, so the
/// outcome log and the log output follow the resolver's target order.
pub struct SyncExecutor<A> {
    api: A,
    cancel: CancelFlag,
}

impl<A: SecretsApi> SyncExecutor<A> {
    pub fn new(api: A, cancel: CancelFlag) -> Self {
        Self { api, cancel }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Push every secret in `config` to every target in `config`.
    ///
    /// * In dry-run mode each pair is recorded as skipped and the platform is
    ///   never called.
    /// * When an upsert fails, the remaining secrets of that target are not
    ///   attempted; the run moves on to the next target. A target that just
    ///   rejected one secret (revoked token, missing org) would reject the
    ///   rest as well.
    /// * Nothing is retried.
    /// * Once the cancel flag is set no further pair is started and the
    ///   report is marked as cancelled.
    #[instrument(
        skip(self, config),
        fields(
            dry_run = config.dry_run,
            targets = config.targets.len(),
            secrets = config.secrets.len()
        )
    )]
    pub async fn run(&self, config: &RunConfig) -> SyncReport {
        let mut report = SyncReport::default();

        'targets: for target in &config.targets {
            for secret in &config.secrets {
                if self.cancel.is_cancelled() {
                    warn!("Run cancelled, not starting further secret updates");
                    report.mark_cancelled();
                    break 'targets;
                }

                if config.dry_run {
                    info!(
                        dest = %target,
                        secret = secret.name(),
                        status = "skipped",
                        "update {} secrets",
                        target.kind()
                    );
                    report.record(SyncOutcome::skipped(target, secret.name()));
                    continue;
                }

                match self.upsert(target, secret).await {
                    Ok(_) => {
                        info!(
                            dest = %target,
                            secret = secret.name(),
                            status = "success",
                            "update {} secrets",
                            target.kind()
                        );
                        report.record(SyncOutcome::success(target, secret.name()));
                    }
                    Err(e) => {
                        error!(
                            dest = %target,
                            secret = secret.name(),
                            status = "failed",
                            error = %e,
                            "failed to update {} secrets, skipping the rest of this target",
                            target.kind()
                        );
                        report.record(SyncOutcome::failed(target, secret.name(), e));
                        break;
                    }
                }
            }
        }

        report
    }

    async fn upsert(
        &self,
        target: &Target,
        secret: &SecretEntry,
    ) -> Result<SecretRecord, ApiError> {
        match target {
            Target::Org { org } => {
                self.api
                    .upsert_org_secret(org, secret.name(), secret.value())
                    .await
            }
            Target::Repo { org, repo } => {
                self.api
                    .upsert_repo_secret(org, repo, secret.name(), secret.value())
                    .await
            }
        }
    }
}
