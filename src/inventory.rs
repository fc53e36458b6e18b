// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-only listing of an organization's Actions secrets

use crate::error::{ConfigError, Result};
use crate::gitea::{SecretRecord, SecretsApi};
use tracing::{debug, instrument, warn};

/// Fetch a single page of secrets
pub async fn list_page<A: SecretsApi + ?Sized>(
    api: &A,
    org: &str,
    page: u32,
    page_size: u32,
) -> Result<Vec<SecretRecord>> {
    if page_size == 0 {
        return Err(ConfigError::InvalidPageSize.into());
    }

    let page = api.list_org_secrets(org, page.max(1), page_size).await?;
    Ok(page.records)
}

/// Fetch every secret of `org`, walking pages from the first one.
///
/// The server may cap the page size below what was asked for, so a short
/// page does not mean the listing is complete. The walk ends on an empty
/// page, once the reported total has been collected, or when a page repeats
/// the previous one (a server or proxy ignoring `page`).
#[instrument(skip(api))]
pub async fn list_all<A: SecretsApi + ?Sized>(
    api: &A,
    org: &str,
    page_size: u32,
) -> Result<Vec<SecretRecord>> {
    if page_size == 0 {
        return Err(ConfigError::InvalidPageSize.into());
    }

    let mut records = Vec::new();
    let mut previous: Option<Vec<SecretRecord>> = None;
    let mut page = 1;

    loop {
        let batch = api.list_org_secrets(org, page, page_size).await?;
        debug!("Fetched page {} with {} secrets", page, batch.records.len());

        if batch.records.is_empty() {
            break;
        }
        if previous.as_ref() == Some(&batch.records) {
            warn!(page, "Page repeats the previous one, stopping the listing");
            break;
        }

        records.extend(batch.records.iter().cloned());
        if batch.total_count.is_some_and(|total| records.len() >= total) {
            break;
        }

        previous = Some(batch.records);
        page += 1;
    }

    Ok(records)
}
