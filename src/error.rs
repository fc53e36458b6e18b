// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build Gitea client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Gitea API error: {0}")]
    Api(#[from] ApiError),
}

/// Fatal precondition failures, raised before any network call is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing gitea server")]
    MissingServer,

    #[error("Missing gitea token")]
    MissingToken,

    #[error("Invalid gitea server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Gitea server url '{0}' cannot be used as an API base")]
    UnsupportedServerUrl(String),

    #[error("Can't find any secrets")]
    NoSecrets,

    #[error("Page size must be greater than zero")]
    InvalidPageSize,
}

/// A failed call against the Gitea API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Gitea returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failure, when the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status(),
            ApiError::Decode(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    InvalidRepoFormat,
}

/// A target specifier that was rejected during resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid repo format '{raw}', expected 'org/repo'")]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    pub raw: String,
}

impl ResolutionError {
    pub fn invalid_repo_format(raw: impl Into<String>) -> Self {
        Self {
            kind: ResolutionErrorKind::InvalidRepoFormat,
            raw: raw.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
