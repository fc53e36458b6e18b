// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::env as keys;
use crate::error::{ConfigError, ResolutionError};
use crate::sync::secrets::{collect_secrets, split_names};
use crate::sync::targets::resolve_targets;
use crate::types::{SecretEntry, Target};
use std::collections::HashMap;
use std::env::VarError;
use std::fmt;
use tracing::warn;
use url::Url;

/// Source of raw configuration values.
///
/// The sync core never reads the process environment itself; everything it
/// needs flows in through a value built from one of these.
pub trait EnvLookup {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(key, "ignoring environment variable that is not valid UTF-8");
                None
            }
        }
    }
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Look up `key` as `INPUT_<KEY>` first, then as `<KEY>`.
/// Returns an empty string when neither is set to a non-empty value.
pub fn global_value(env: &impl EnvLookup, key: &str) -> String {
    let upper = key.to_uppercase();
    let prefixed = format!("{}{}", keys::INPUT_PREFIX, upper);

    env.get(&prefixed)
        .filter(|v| !v.is_empty())
        .or_else(|| env.get(&upper))
        .unwrap_or_default()
}

/// Lenient boolean parsing; anything unrecognised is `false`
pub fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim(), "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Connection settings for the Gitea API
#[derive(Clone)]
pub struct ClientSettings {
    pub server_url: Url,
    pub auth_token: String,
    pub skip_tls_verify: bool,
}

impl ClientSettings {
    pub fn from_env(env: &impl EnvLookup) -> Result<Self, ConfigError> {
        Self::new(
            &global_value(env, keys::SERVER),
            &global_value(env, keys::TOKEN),
            parse_bool(&global_value(env, keys::SKIP_VERIFY)),
        )
    }

    pub fn new(server: &str, token: &str, skip_tls_verify: bool) -> Result<Self, ConfigError> {
        let server = server.trim();
        if server.is_empty() {
            return Err(ConfigError::MissingServer);
        }
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        Ok(Self {
            server_url: parse_server_url(server)?,
            auth_token: token.to_string(),
            skip_tls_verify,
        })
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("server_url", &self.server_url.as_str())
            .field("auth_token", &"***")
            .field("skip_tls_verify", &self.skip_tls_verify)
            .finish()
    }
}

fn parse_server_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidServerUrl {
        url: raw.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::UnsupportedServerUrl(raw.to_string()));
    }

    Ok(url)
}

/// Everything a sync run needs, assembled once at process start
#[derive(Clone)]
pub struct RunConfig {
    pub server_url: Url,
    pub auth_token: String,
    pub skip_tls_verify: bool,
    pub dry_run: bool,
    pub targets: Vec<Target>,
    pub secrets: Vec<SecretEntry>,
}

/// A run configuration plus the target specifiers that were rejected
#[derive(Debug)]
pub struct LoadedConfig {
    pub run: RunConfig,
    pub resolution_errors: Vec<ResolutionError>,
}

impl RunConfig {
    /// Load configuration from the given environment.
    ///
    /// Missing server or token and an empty secret set are fatal. Malformed
    /// target specifiers are not; they are returned alongside the config.
    pub fn from_env(env: &impl EnvLookup) -> Result<LoadedConfig, ConfigError> {
        let client = ClientSettings::from_env(env)?;
        let dry_run = parse_bool(&global_value(env, keys::DRY_RUN));

        let names = split_names(&global_value(env, keys::SECRETS));
        let secrets = collect_secrets(&names, env);
        if secrets.is_empty() {
            return Err(ConfigError::NoSecrets);
        }

        let resolution = resolve_targets(
            &global_value(env, keys::ORGS),
            &global_value(env, keys::REPOS),
        );

        Ok(LoadedConfig {
            run: RunConfig {
                server_url: client.server_url,
                auth_token: client.auth_token,
                skip_tls_verify: client.skip_tls_verify,
                dry_run,
                targets: resolution.targets,
                secrets,
            },
            resolution_errors: resolution.errors,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            server_url: self.server_url.clone(),
            auth_token: self.auth_token.clone(),
            skip_tls_verify: self.skip_tls_verify,
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("server_url", &self.server_url.as_str())
            .field("auth_token", &"***")
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("dry_run", &self.dry_run)
            .field("targets", &self.targets)
            .field("secrets", &self.secrets)
            .finish()
    }
}
