// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod gitea;
pub mod inventory;
pub mod shutdown;
pub mod sync;
pub mod types;

#[cfg(test)]
mod test_utils;
