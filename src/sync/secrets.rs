// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of secret names to values

use crate::config::{global_value, EnvLookup};
use crate::sync::split_list;
use crate::types::{SecretEntry, SecretValue};

/// Split the configured comma-separated secret names
pub fn split_names(raw: &str) -> Vec<String> {
    split_list(raw).map(str::to_string).collect()
}

/// Resolve each name through the two-tier environment lookup.
///
/// Names without a non-empty value are left out. Names are compared without
/// regard to case, matching both the upper-cased lookup and Gitea, which
/// stores secret names upper-cased. A name listed twice keeps the spelling
/// and position of its first occurrence and takes the last resolved value.
pub fn collect_secrets(names: &[String], env: &impl EnvLookup) -> Vec<SecretEntry> {
    let mut entries: Vec<SecretEntry> = Vec::new();

    for name in names.iter().filter(|n| !n.is_empty()) {
        let value = global_value(env, name);
        if value.is_empty() {
            continue;
        }

        let key = name.to_uppercase();
        match entries.iter_mut().find(|e| e.name().to_uppercase() == key) {
            Some(existing) => {
                *existing = SecretEntry::new(existing.name(), SecretValue::new(value));
            }
            None => entries.push(SecretEntry::new(name.as_str(), SecretValue::new(value))),
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn names(entries: &[SecretEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    #[test]
    fn test_collect_omits_unresolved_names() {
        let env = make_env(&[("API_KEY", "abc")]);

        let entries = collect_secrets(&split_names("API_KEY,DB_PASS"), &env);

        assert_eq!(names(&entries), vec!["API_KEY"]);
        assert_eq!(entries[0].value().expose(), "abc");
    }

    #[test]
    fn test_collect_omits_empty_values() {
        let env = make_env(&[("API_KEY", ""), ("DB_PASS", "pw")]);

        let entries = collect_secrets(&split_names("API_KEY,DB_PASS"), &env);

        assert_eq!(names(&entries), vec!["DB_PASS"]);
    }

    #[test]
    fn test_collect_prefers_input_prefixed_value() {
        let env = make_env(&[("INPUT_API_KEY", "from-input"), ("API_KEY", "bare")]);

        let entries = collect_secrets(&split_names("API_KEY"), &env);

        assert_eq!(entries[0].value().expose(), "from-input");
    }

    #[test]
    fn test_collect_upper_cases_lookup_but_keeps_name() {
        let env = make_env(&[("API_KEY", "abc")]);

        let entries = collect_secrets(&split_names("api_key"), &env);

        assert_eq!(names(&entries), vec!["api_key"]);
        assert_eq!(entries[0].value().expose(), "abc");
    }

    #[test]
    fn test_collect_collapses_duplicates() {
        let env = make_env(&[("A", "1"), ("B", "2")]);

        let entries = collect_secrets(&split_names("A,B,A"), &env);

        assert_eq!(names(&entries), vec!["A", "B"]);
    }

    #[test]
    fn test_collect_collapses_names_differing_in_case() {
        let env = make_env(&[("API_KEY", "abc"), ("B", "2")]);

        let entries = collect_secrets(&split_names("api_key,B,API_KEY,Api_Key"), &env);

        assert_eq!(names(&entries), vec!["api_key", "B"]);
        assert_eq!(entries[0].value().expose(), "abc");
    }

    #[test]
    fn test_collect_empty_names() {
        let env = make_env(&[("A", "1")]);

        assert!(collect_secrets(&split_names(""), &env).is_empty());
        assert!(collect_secrets(&[String::new()], &env).is_empty());
    }

    #[test]
    fn test_split_names_trims_and_skips_empty() {
        assert_eq!(split_names(" A ,, B,"), vec!["A", "B"]);
    }
}
