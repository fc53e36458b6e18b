// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! reqwest-backed implementation of [`SecretsApi`] for Gitea

use crate::config::ClientSettings;
use crate::constants::api;
use crate::error::{ApiError, Result, SyncError};
use crate::gitea::api::{SecretPage, SecretRecord, SecretsApi};
use crate::types::SecretValue;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Body of the Gitea create/update secret call
#[derive(Serialize)]
struct CreateSecretOption<'a> {
    name: &'a str,
    data: &'a str,
}

/// Error body returned by the Gitea API
#[derive(Deserialize)]
struct GiteaErrorBody {
    message: Option<String>,
}

pub struct GiteaClient {
    base_url: Url,
    token: String,
    client: Client,
}

impl GiteaClient {
    /// Create a client for the configured server.
    ///
    /// Proxy settings are taken from the environment. With `skip_tls_verify`
    /// set, invalid server certificates are accepted.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(api::USER_AGENT)
            .connect_timeout(Duration::from_secs(api::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(api::REQUEST_TIMEOUT_SECS))
            .danger_accept_invalid_certs(settings.skip_tls_verify)
            .build()
            .map_err(SyncError::Client)?;

        Ok(Self {
            base_url: settings.server_url.clone(),
            token: settings.auth_token.clone(),
            client,
        })
    }

    /// Build `{server}/api/v1/{segments..}`, percent-encoding each segment
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(api::BASE_PATH.split('/'))
                .extend(segments);
        }
        url
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.token)
    }

    async fn put_secret(
        &self,
        url: Url,
        name: &str,
        value: &SecretValue,
    ) -> std::result::Result<SecretRecord, ApiError> {
        let body = CreateSecretOption {
            name,
            data: value.expose(),
        };

        let response = self
            .client
            .put(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(response).await);
        }

        debug!("Secret {} stored ({})", name, status);
        Ok(SecretRecord::named(name))
    }
}

/// Turn a non-success response into an [`ApiError`], preferring the
/// `message` field of Gitea's JSON error body
async fn api_error(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<GiteaErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        message
    };

    ApiError::Status { status, message }
}

#[async_trait]
impl SecretsApi for GiteaClient {
    #[instrument(skip(self, value))]
    async fn upsert_org_secret(
        &self,
        org: &str,
        name: &str,
        value: &SecretValue,
    ) -> std::result::Result<SecretRecord, ApiError> {
        let url = self.endpoint(["orgs", org, "actions", "secrets", name]);
        self.put_secret(url, name, value).await
    }

    #[instrument(skip(self, value))]
    async fn upsert_repo_secret(
        &self,
        org: &str,
        repo: &str,
        name: &str,
        value: &SecretValue,
    ) -> std::result::Result<SecretRecord, ApiError> {
        let url = self.endpoint(["repos", org, repo, "actions", "secrets", name]);
        self.put_secret(url, name, value).await
    }

    #[instrument(skip(self))]
    async fn list_org_secrets(
        &self,
        org: &str,
        page: u32,
        page_size: u32,
    ) -> std::result::Result<SecretPage, ApiError> {
        let url = self.endpoint(["orgs", org, "actions", "secrets"]);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json")
            .query(&[("page", page), ("limit", page_size)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let total_count = response
            .headers()
            .get(api::TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());

        let body = response.text().await?;
        Ok(SecretPage {
            records: serde_json::from_str(&body)?,
            total_count,
        })
    }
}
