// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Target resolution, secret collection and the sync pass itself.

pub mod executor;
pub mod secrets;
pub mod targets;

pub use executor::SyncExecutor;
pub use secrets::{collect_secrets, split_names};
pub use targets::{resolve_targets, Resolution};

/// Split a comma-separated list, trimming entries and dropping empty ones
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_drops_empty_segments() {
        let items: Vec<&str> = split_list(",a,, b ,").collect();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[test]
    fn test_split_list_empty_input() {
        assert_eq!(split_list("").count(), 0);
    }
}
