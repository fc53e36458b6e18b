// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access to the Gitea Actions secrets API.

pub mod api;
pub mod client;

pub use api::{SecretPage, SecretRecord, SecretsApi};
pub use client::GiteaClient;
