// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;
use zeroize::Zeroize;

/// An opaque secret payload. Never printed, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value, only for handing it to the platform
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Drop for SecretValue {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(***)")
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// A named secret resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEntry {
    name: String,
    value: SecretValue,
}

impl SecretEntry {
    pub fn new(name: impl Into<String>, value: SecretValue) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "secret name must not be empty");
        Self { name, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SecretValue {
        &self.value
    }
}
