// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Gitea secrets API.

use crate::error::ApiError;
use crate::gitea::{SecretPage, SecretRecord, SecretsApi};
use crate::shutdown::CancelFlag;
use crate::types::{SecretValue, Target};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A call received by [`MockApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    UpsertOrg { org: String, name: String },
    UpsertRepo { org: String, repo: String, name: String },
    ListOrg { org: String, page: u32, page_size: u32 },
}

/// An in-memory platform that records calls and returns predefined failures.
///
/// Stored secrets are keyed by (target, name), so repeated upserts overwrite
/// instead of accumulating.
#[derive(Clone, Default)]
pub struct MockApi {
    calls: Arc<Mutex<Vec<ApiCall>>>,
    stored: Arc<Mutex<HashMap<(String, String), String>>>,
    failures: Arc<Mutex<HashMap<(String, Option<String>), u16>>>,
    org_secrets: Arc<Mutex<HashMap<String, Vec<String>>>>,
    cancel_after: Arc<Mutex<Option<(usize, CancelFlag)>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every upsert against `target` with `status`
    pub fn fail_target(self, target: &Target, status: u16) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert((target.to_string(), None), status);
        self
    }

    /// Fail only the upsert of `name` against `target`
    pub fn fail_secret(self, target: &Target, name: &str, status: u16) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert((target.to_string(), Some(name.to_string())), status);
        self
    }

    /// Secrets returned by `list_org_secrets` for `org`
    pub fn with_org_secrets(self, org: &str, names: &[&str]) -> Self {
        self.org_secrets.lock().unwrap().insert(
            org.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
        self
    }

    /// Trip `flag` once `calls` upserts have been served
    pub fn cancel_after(self, calls: usize, flag: CancelFlag) -> Self {
        *self.cancel_after.lock().unwrap() = Some((calls, flag));
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self) -> HashMap<(String, String), String> {
        self.stored.lock().unwrap().clone()
    }

    fn upsert(
        &self,
        call: ApiCall,
        target: &Target,
        name: &str,
        value: &SecretValue,
    ) -> Result<SecretRecord, ApiError> {
        let served = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            calls.len()
        };

        if let Some((after, flag)) = self.cancel_after.lock().unwrap().as_ref() {
            if served >= *after {
                flag.cancel();
            }
        }

        let key = target.to_string();
        let failures = self.failures.lock().unwrap();
        let failure = failures
            .get(&(key.clone(), Some(name.to_string())))
            .or_else(|| failures.get(&(key.clone(), None)));

        if let Some(code) = failure {
            return Err(status_error(*code));
        }

        self.stored
            .lock()
            .unwrap()
            .insert((key, name.to_string()), value.expose().to_string());
        Ok(SecretRecord::named(name))
    }
}

fn status_error(code: u16) -> ApiError {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    ApiError::Status {
        status,
        message: status.canonical_reason().unwrap_or("mock failure").to_string(),
    }
}

#[async_trait]
impl SecretsApi for MockApi {
    async fn upsert_org_secret(
        &self,
        org: &str,
        name: &str,
        value: &SecretValue,
    ) -> Result<SecretRecord, ApiError> {
        let call = ApiCall::UpsertOrg {
            org: org.to_string(),
            name: name.to_string(),
        };
        self.upsert(call, &Target::org(org), name, value)
    }

    async fn upsert_repo_secret(
        &self,
        org: &str,
        repo: &str,
        name: &str,
        value: &SecretValue,
    ) -> Result<SecretRecord, ApiError> {
        let call = ApiCall::UpsertRepo {
            org: org.to_string(),
            repo: repo.to_string(),
            name: name.to_string(),
        };
        self.upsert(call, &Target::repo(org, repo), name, value)
    }

    async fn list_org_secrets(
        &self,
        org: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SecretPage, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::ListOrg {
            org: org.to_string(),
            page,
            page_size,
        });

        let org_secrets = self.org_secrets.lock().unwrap();
        let Some(names) = org_secrets.get(org) else {
            return Err(status_error(404));
        };

        let start = (page.max(1) as usize - 1) * page_size as usize;
        Ok(SecretPage {
            records: names
                .iter()
                .skip(start)
                .take(page_size as usize)
                .map(|n| SecretRecord::named(n.as_str()))
                .collect(),
            total_count: Some(names.len()),
        })
    }
}
