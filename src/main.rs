// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};

use gitea_secrets_sync::config::{global_value, parse_bool, ClientSettings, ProcessEnv, RunConfig};
use gitea_secrets_sync::constants::{env as keys, exit, listing};
use gitea_secrets_sync::gitea::GiteaClient;
use gitea_secrets_sync::inventory;
use gitea_secrets_sync::shutdown::{install_signal_handler, CancelFlag};
use gitea_secrets_sync::sync::SyncExecutor;
use gitea_secrets_sync::types::{SyncReport, SyncStatus};

#[derive(Parser)]
#[command(name = "gitea-secrets-sync", version, about)]
struct Cli {
    /// Read in a file of environment variables
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Push the configured secrets to every org and repo target (default)
    Sync,
    /// List the Actions secrets of an organization
    List {
        /// Organization to list
        #[arg(long)]
        org: String,
        /// Gitea server url, defaults to GITEA_SERVER
        #[arg(long)]
        server: Option<String>,
        /// Access token, defaults to GITEA_TOKEN
        #[arg(long)]
        token: Option<String>,
        /// Skip TLS certificate verification
        #[arg(long)]
        skip_verify: bool,
        #[arg(long, default_value_t = listing::DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = listing::DEFAULT_PAGE_SIZE)]
        page_size: u32,
        /// Walk every page instead of fetching a single one
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Real environment variables win over values from the file
    let env_file = dotenvy::from_path(&cli.env_file);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitea_secrets_sync=info".into()),
        )
        .init();

    match env_file {
        Ok(()) => debug!("Loaded environment from {}", cli.env_file.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load {}: {}", cli.env_file.display(), e),
    }

    match cli.command.unwrap_or(Command::Sync) {
        Command::Sync => sync().await,
        Command::List {
            org,
            server,
            token,
            skip_verify,
            page,
            page_size,
            all,
        } => {
            let server = server.unwrap_or_else(|| global_value(&ProcessEnv, keys::SERVER));
            let token = token.unwrap_or_else(|| global_value(&ProcessEnv, keys::TOKEN));
            let skip_verify =
                skip_verify || parse_bool(&global_value(&ProcessEnv, keys::SKIP_VERIFY));

            let settings = match ClientSettings::new(&server, &token, skip_verify) {
                Ok(s) => s,
                Err(e) => {
                    error!("{}", e);
                    return Ok(ExitCode::from(exit::FAILURE));
                }
            };

            list(&settings, &org, page, page_size, all).await
        }
    }
}

async fn sync() -> Result<ExitCode> {
    let loaded = match RunConfig::from_env(&ProcessEnv) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::from(exit::FAILURE));
        }
    };

    for e in &loaded.resolution_errors {
        warn!(repo = %e.raw, "invalid repo format");
    }

    let config = loaded.run;
    info!(value = %config.server_url, "gitea server");
    if config.dry_run {
        warn!("[DRY_RUN='true'] No changes will be written to secrets");
    }
    if config.targets.is_empty() {
        warn!("No org or repo targets configured, nothing to update");
    }

    let client =
        GiteaClient::new(&config.client_settings()).context("failed to init gitea client")?;

    let cancel = CancelFlag::new();
    install_signal_handler(cancel.clone());

    let executor = SyncExecutor::new(client, cancel);
    let report = executor.run(&config).await;
    log_summary(&report);

    Ok(ExitCode::from(report.exit_code()))
}

fn log_summary(report: &SyncReport) {
    let success = report.count(SyncStatus::Success);
    let skipped = report.count(SyncStatus::Skipped);
    let failed = report.count(SyncStatus::Failed);

    for target in report.failed_targets() {
        error!(dest = %target, "target was not fully updated");
    }

    if report.cancelled() {
        warn!(success, skipped, failed, "sync interrupted");
    } else if failed > 0 {
        error!(success, skipped, failed, "sync finished with failures");
    } else {
        info!(success, skipped, failed, "sync finished");
    }
}

async fn list(
    settings: &ClientSettings,
    org: &str,
    page: u32,
    page_size: u32,
    all: bool,
) -> Result<ExitCode> {
    let client = GiteaClient::new(settings).context("failed to init gitea client")?;

    let records = if all {
        inventory::list_all(&client, org, page_size).await
    } else {
        inventory::list_page(&client, org, page, page_size).await
    };

    match records {
        Ok(records) => {
            for record in &records {
                info!(
                    name = %record.name,
                    created = ?record.created_at,
                    "get secret"
                );
            }
            info!(org, count = records.len(), "listed org action secrets");
            Ok(ExitCode::from(exit::SUCCESS))
        }
        Err(e) => {
            error!(org, error = %e, "failed to list org action secrets");
            Ok(ExitCode::from(exit::FAILURE))
        }
    }
}
