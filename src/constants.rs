// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment keys read by the configuration layer.
///
/// Every key is looked up as `INPUT_<KEY>` first, then as `<KEY>`.
pub mod env {
    /// Prefix used by CI runners to namespace action inputs
    pub const INPUT_PREFIX: &str = "INPUT_";

    pub const SERVER: &str = "gitea_server";
    pub const TOKEN: &str = "gitea_token";
    pub const SKIP_VERIFY: &str = "gitea_skip_verify";
    pub const DRY_RUN: &str = "dry_run";
    /// Comma-separated secret names
    pub const SECRETS: &str = "secrets";
    /// Comma-separated organization names
    pub const ORGS: &str = "orgs";
    /// Comma-separated `org/repo` specifiers
    pub const REPOS: &str = "repos";
}

/// Gitea HTTP API settings
pub mod api {
    pub const BASE_PATH: &str = "api/v1";
    pub const USER_AGENT: &str = concat!("gitea-secrets-sync/", env!("CARGO_PKG_VERSION"));
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Response header carrying the total item count of a list endpoint
    pub const TOTAL_COUNT_HEADER: &str = "x-total-count";
}

/// Defaults for the secret listing command
pub mod listing {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
}

/// Process exit codes
pub mod exit {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    pub const INTERRUPTED: u8 = 130;
}
