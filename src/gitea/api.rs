// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::ApiError;
use crate::types::SecretValue;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A secret as reported by the platform. Values are never returned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecretRecord {
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SecretRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: None,
        }
    }
}

/// One page of an organization's secrets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretPage {
    pub records: Vec<SecretRecord>,
    /// Number of secrets across all pages, when the server reports it
    pub total_count: Option<usize>,
}

/// Operations the sync pass needs from the hosting platform.
///
/// Upserts must overwrite an existing secret of the same name rather than
/// fail, so repeating a run never errors on secrets that already exist.
#[async_trait]
pub trait SecretsApi: Send + Sync {
    async fn upsert_org_secret(
        &self,
        org: &str,
        name: &str,
        value: &SecretValue,
    ) -> Result<SecretRecord, ApiError>;

    async fn upsert_repo_secret(
        &self,
        org: &str,
        repo: &str,
        name: &str,
        value: &SecretValue,
    ) -> Result<SecretRecord, ApiError>;

    /// List one page of an organization's secrets. Pages start at 1.
    async fn list_org_secrets(
        &self,
        org: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SecretPage, ApiError>;
}
